use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use ethers_core::types::Address;
use gloo_timers::callback::Interval;
use log::{debug, error, info};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::chain::ChainClient;
use crate::config::WatcherConfig;
use crate::context::{dispatcher_callback, ConfirmListeners, PendingHandle};
use crate::models::{NetworkInfo, TxHash};
use crate::services::{observe_block, watch_transaction, Sleeper, WatchHooks};

pub type Connection = (Option<Address>, Option<NetworkInfo>);

/// Polls the client for the connected account and network.
///
/// `on_account` fires before the new connection is rendered so stores can
/// drop data that belonged to the previous account.
#[hook]
pub fn use_connection(
    client: Rc<dyn ChainClient>,
    poll_ms: u32,
    on_account: Callback<Option<Address>>,
) -> Connection {
    let connection = use_state_eq({
        let client = client.clone();
        move || (client.get_connected_account(), client.get_current_network())
    });
    let last_account = use_mut_ref(|| connection.0);

    {
        let connection = connection.clone();
        use_effect_with(poll_ms, move |poll_ms| {
            let interval = Interval::new(*poll_ms, move || {
                let account = client.get_connected_account();
                if *last_account.borrow() != account {
                    match account {
                        Some(a) => info!("Wallet account changed to {:#x}", a),
                        None => info!("Wallet disconnected"),
                    }
                    *last_account.borrow_mut() = account;
                    on_account.emit(account);
                }
                connection.set((account, client.get_current_network()));
            });
            move || drop(interval)
        });
    }

    (*connection).clone()
}

/// Refreshes balances a moment after any block that touches the account.
#[hook]
pub fn use_block_refresh(
    client: Rc<dyn ChainClient>,
    sleeper: Rc<dyn Sleeper>,
    account: Option<Address>,
    delay_ms: u32,
    refresh: Callback<()>,
) {
    use_effect_with(account, move |account| {
        let account = *account;
        let subscription = account.and_then(|_| {
            let on_block = Callback::from(move |block| {
                let sleeper = sleeper.clone();
                let refresh = refresh.clone();
                spawn_local(async move {
                    observe_block(block, account, delay_ms, sleeper, refresh).await;
                });
            });
            client
                .watch_blocks(on_block)
                .map_err(|e| error!("Block subscription failed: {}", e))
                .ok()
        });
        move || drop(subscription)
    });
}

/// Starts one watcher task per pending hash.
#[hook]
pub fn use_transaction_watcher(
    client: Rc<dyn ChainClient>,
    sleeper: Rc<dyn Sleeper>,
    config: WatcherConfig,
    pending: PendingHandle,
    refresh: Callback<()>,
    listeners: ConfirmListeners,
) {
    let watching = use_mut_ref(HashSet::<TxHash>::new);
    let on_pending = dispatcher_callback(&pending);

    use_effect_with(pending.pending().to_vec(), move |hashes| {
        for hash in hashes.iter().copied() {
            if !watching.borrow_mut().insert(hash) {
                continue;
            }
            let hooks = WatchHooks {
                pending: on_pending.clone(),
                refresh: refresh.clone(),
                on_confirmed: Some(listeners.notifier()),
            };
            spawn_watch(client.clone(), sleeper.clone(), config.clone(), hash, hooks, watching.clone());
        }
        || ()
    });
}

fn spawn_watch(
    client: Rc<dyn ChainClient>,
    sleeper: Rc<dyn Sleeper>,
    config: WatcherConfig,
    hash: TxHash,
    hooks: WatchHooks,
    watching: Rc<RefCell<HashSet<TxHash>>>,
) {
    debug!("Watching transaction {}", hash);
    spawn_local(async move {
        let outcome = watch_transaction(client, sleeper, config, hash, hooks).await;
        debug!("Stopped watching {}: {:?}", hash, outcome);
        watching.borrow_mut().remove(&hash);
    });
}
