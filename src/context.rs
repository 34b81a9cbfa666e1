//! Typed contexts shared by the dashboard components.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use ethers_core::types::Address;
use yew::prelude::*;

use crate::chain::ChainClient;
use crate::config::DashboardConfig;
use crate::models::{NetworkInfo, TxHash};
use crate::store::{BalanceStore, PendingStore};

pub type BalanceHandle = UseReducerHandle<BalanceStore>;
pub type PendingHandle = UseReducerHandle<PendingStore>;

pub fn same_client(a: &Rc<dyn ChainClient>, b: &Rc<dyn ChainClient>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Client, configuration and the current connection.
#[derive(Clone)]
pub struct ChainContext {
    pub client: Rc<dyn ChainClient>,
    pub config: Rc<DashboardConfig>,
    pub account: Option<Address>,
    pub network: Option<NetworkInfo>,
}

impl ChainContext {
    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }
}

impl PartialEq for ChainContext {
    fn eq(&self, other: &Self) -> bool {
        same_client(&self.client, &other.client)
            && Rc::ptr_eq(&self.config, &other.config)
            && self.account == other.account
            && self.network == other.network
    }
}

/// Listeners told about every confirmed transaction.
#[derive(Clone, Default)]
pub struct ConfirmListeners {
    listeners: Rc<RefCell<Vec<(u64, Callback<TxHash>)>>>,
    next_id: Rc<Cell<u64>>,
}

impl PartialEq for ConfirmListeners {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.listeners, &other.listeners)
    }
}

impl ConfirmListeners {
    pub fn register(&self, listener: Callback<TxHash>) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    pub fn unregister(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(i, _)| *i != id);
    }

    pub fn notify(&self, hash: TxHash) {
        // Listeners may (un)register while being notified.
        let listeners: Vec<_> = self.listeners.borrow().iter().map(|(_, l)| l.clone()).collect();
        for listener in listeners {
            listener.emit(hash);
        }
    }

    pub fn notifier(&self) -> Callback<TxHash> {
        let this = self.clone();
        Callback::from(move |hash| this.notify(hash))
    }
}

pub fn dispatcher_callback<T: Reducible + 'static>(handle: &UseReducerHandle<T>) -> Callback<T::Action> {
    let dispatcher = handle.dispatcher();
    Callback::from(move |action| dispatcher.dispatch(action))
}

#[hook]
pub fn use_chain() -> ChainContext {
    use_context::<ChainContext>().expect("ChainContext to be provided")
}

#[hook]
pub fn use_balances() -> BalanceHandle {
    use_context::<BalanceHandle>().expect("Balance store to be provided")
}

#[hook]
pub fn use_pending() -> PendingHandle {
    use_context::<PendingHandle>().expect("Pending store to be provided")
}

#[hook]
pub fn use_confirm_listeners() -> ConfirmListeners {
    use_context::<ConfirmListeners>().expect("ConfirmListeners to be provided")
}
