use futures_util::future::LocalBoxFuture;
use futures_util::FutureExt;
use gloo_timers::future::TimeoutFuture;

/// Source of delays for the watcher and the block observer.
pub trait Sleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()>;
}

/// Browser timer backed sleeper.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimerSleeper;

impl Sleeper for TimerSleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        TimeoutFuture::new(ms).boxed_local()
    }
}
