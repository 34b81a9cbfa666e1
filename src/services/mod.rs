pub mod refresh;
pub mod schedule;
pub mod transfer;
pub mod watcher;

pub use refresh::refresh_balance;
pub use schedule::{Sleeper, TimerSleeper};
pub use transfer::submit_transfer;
pub use watcher::{observe_block, watch_transaction, WatchHooks};
