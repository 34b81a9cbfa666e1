use std::rc::Rc;

use gloo_timers::callback::Interval;
use log::{info, warn};
use yew::prelude::*;

use crate::chain::{ChainClient, JsChainClient};
use crate::components::WalletDashboard;
use crate::config::DashboardConfig;
use crate::context::{dispatcher_callback, same_client, BalanceHandle, ChainContext, ConfirmListeners, PendingHandle};
use crate::error::Result;
use crate::hooks::{use_block_refresh, use_connection, use_transaction_watcher};
use crate::services::{Sleeper, TimerSleeper};
use crate::store::{BalanceAction, BalanceStore, PendingStore};

fn connect_client(config: &DashboardConfig) -> Result<Rc<dyn ChainClient>> {
    let client = JsChainClient::from_window(&config.client_namespace, config.balance.decimals)?;
    Ok(Rc::new(client))
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| DashboardConfig::load());
    let client = use_state({
        let config = config.clone();
        move || connect_client(&config).map_err(|e| warn!("{}", e)).ok()
    });

    // The page may inject the client after the bundle starts.
    {
        let client = client.clone();
        let config = config.clone();
        use_effect_with(client.is_some(), move |found| {
            let interval = (!*found).then(|| {
                Interval::new(config.account_poll_ms, move || {
                    if let Ok(found) = connect_client(&config) {
                        info!("Chain client became available");
                        client.set(Some(found));
                    }
                })
            });
            move || drop(interval)
        });
    }

    match (*client).clone() {
        Some(client) => html! {
            <div class="app-container">
                <DashboardRoot {client} config={config.clone()} />
            </div>
        },
        None => html! {
            <div class="app-container">
                <div class="screen-container" role="main" aria-label="Wallet Dashboard">
                    <div class="wallet-card placeholder">
                        <h2>{"Wallet Dashboard"}</h2>
                        <p class="error-text">{"Wallet client not available. Waiting for it to load..."}</p>
                    </div>
                </div>
            </div>
        },
    }
}

#[derive(Properties)]
pub struct DashboardRootProps {
    pub client: Rc<dyn ChainClient>,
    pub config: Rc<DashboardConfig>,
}

impl PartialEq for DashboardRootProps {
    fn eq(&self, other: &Self) -> bool {
        same_client(&self.client, &other.client) && Rc::ptr_eq(&self.config, &other.config)
    }
}

/// Owns the stores and background tasks; everything below reads them from context.
#[function_component(DashboardRoot)]
pub fn dashboard_root(props: &DashboardRootProps) -> Html {
    let client = props.client.clone();
    let config = props.config.clone();

    let balances: BalanceHandle = use_reducer({
        let client = client.clone();
        move || BalanceStore::new(client.get_connected_account())
    });
    let pending: PendingHandle = use_reducer(PendingStore::default);
    let sleeper: Rc<dyn Sleeper> = (*use_memo((), |_| Rc::new(TimerSleeper) as Rc<dyn Sleeper>)).clone();
    let listeners = (*use_memo((), |_| ConfirmListeners::default())).clone();

    let on_account = dispatcher_callback(&balances).reform(BalanceAction::SetAccount);
    let (account, network) = use_connection(client.clone(), config.account_poll_ms, on_account);

    let refresh = dispatcher_callback(&balances).reform(|_: ()| BalanceAction::RequestRefresh);

    use_transaction_watcher(
        client.clone(),
        sleeper.clone(),
        config.watcher.clone(),
        pending.clone(),
        refresh.clone(),
        listeners.clone(),
    );
    use_block_refresh(
        client.clone(),
        sleeper,
        account,
        config.watcher.block_refresh_delay_ms,
        refresh,
    );

    let chain = ChainContext {
        client,
        config,
        account,
        network,
    };

    html! {
        <ContextProvider<ChainContext> context={chain}>
            <ContextProvider<BalanceHandle> context={balances}>
                <ContextProvider<PendingHandle> context={pending}>
                    <ContextProvider<ConfirmListeners> context={listeners}>
                        <WalletDashboard />
                    </ContextProvider<ConfirmListeners>>
                </ContextProvider<PendingHandle>>
            </ContextProvider<BalanceHandle>>
        </ContextProvider<ChainContext>>
    }
}
