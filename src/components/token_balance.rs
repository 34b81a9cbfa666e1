use ethers_core::types::Address;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::context::{dispatcher_callback, use_balances, use_chain, ChainContext};
use crate::models::{AssetKey, BalanceRecord, TokenConfig};
use crate::services::refresh_balance;
use crate::store::BalanceAction;
use crate::utils::format_with_precision;

#[derive(Clone, Debug, PartialEq)]
pub enum BalanceView {
    ConnectPrompt,
    Loading,
    Ready { amount: String, symbol: String },
}

pub fn balance_view(
    connected: bool,
    record: Option<&BalanceRecord>,
    fallback_symbol: &str,
    precision: usize,
) -> BalanceView {
    match (connected, record) {
        (false, _) => BalanceView::ConnectPrompt,
        (true, None) => BalanceView::Loading,
        (true, Some(record)) => BalanceView::Ready {
            amount: format_with_precision(&record.formatted_value, precision),
            symbol: if record.symbol.is_empty() {
                fallback_symbol.to_string()
            } else {
                record.symbol.clone()
            },
        },
    }
}

/// A new value for the same account; the first value after a switch is not a change.
fn value_changed(previous: Option<&(Option<Address>, String)>, account: Option<Address>, current: &str) -> bool {
    matches!(previous, Some((prev_account, prev)) if *prev_account == account && !prev.is_empty() && prev != current)
}

fn spawn_refresh(chain: &ChainContext, store: Callback<BalanceAction>, asset: AssetKey) {
    let client = chain.client.clone();
    let account = chain.account;
    spawn_local(async move {
        // Failures are logged by the service; the last known value stays on screen.
        let _ = refresh_balance(client, account, asset, store).await;
    });
}

#[derive(Properties, PartialEq)]
pub struct TokenBalanceProps {
    /// `None` shows the native asset.
    #[prop_or_default]
    pub token_address: Option<Address>,
    #[prop_or(AttrValue::from("ETH"))]
    pub symbol: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(true)]
    pub show_symbol: bool,
    #[prop_or_default]
    pub show_refresh_button: bool,
    /// Fraction digits; the configured default when unset.
    #[prop_or_default]
    pub precision: Option<usize>,
}

#[function_component(TokenBalance)]
pub fn token_balance(props: &TokenBalanceProps) -> Html {
    let chain = use_chain();
    let balances = use_balances();
    let asset = AssetKey::from(props.token_address);
    let precision = props.precision.unwrap_or(chain.config.balance.precision);
    let highlighted = use_state(|| false);
    let previous = use_mut_ref(|| None::<(Option<Address>, String)>);

    {
        let store = dispatcher_callback(&balances);
        use_effect_with(asset, move |asset| {
            let asset = *asset;
            store.emit(BalanceAction::Watch(asset));
            move || store.emit(BalanceAction::Unwatch(asset))
        });
    }

    {
        let chain = chain.clone();
        let store = dispatcher_callback(&balances);
        use_effect_with((asset, chain.account, balances.refresh_epoch), move |(asset, _, _)| {
            spawn_refresh(&chain, store, *asset);
            || ()
        });
    }

    let formatted = balances.record(&asset).map(|r| r.formatted_value.clone());
    {
        let highlighted = highlighted.clone();
        let highlight_ms = chain.config.balance.highlight_ms;
        use_effect_with((formatted, chain.account), move |(formatted, account)| {
            let mut timeout = None;
            if let Some(current) = formatted {
                let mut previous = previous.borrow_mut();
                if value_changed(previous.as_ref(), *account, current) {
                    highlighted.set(true);
                    let highlighted = highlighted.clone();
                    timeout = Some(Timeout::new(highlight_ms, move || highlighted.set(false)));
                }
                *previous = Some((*account, current.clone()));
            } else {
                highlighted.set(false);
            }
            move || drop(timeout)
        });
    }

    let refreshing = balances.is_refreshing(&asset);
    let on_refresh = {
        let chain = chain.clone();
        let store = dispatcher_callback(&balances);
        Callback::from(move |_: MouseEvent| {
            if !refreshing {
                spawn_refresh(&chain, store.clone(), asset);
            }
        })
    };

    let view = balance_view(chain.is_connected(), balances.record(&asset), &props.symbol, precision);

    html! {
        <div class={classes!("token-balance", props.class.clone())}>
            { match view {
                BalanceView::ConnectPrompt => html! {
                    <span class="balance-placeholder">{"-"}</span>
                },
                BalanceView::Loading => html! {
                    <>
                        <div class="skeleton" aria-busy="true"></div>
                        if props.show_symbol {
                            <span class="balance-symbol muted">{ props.symbol.clone() }</span>
                        }
                    </>
                },
                BalanceView::Ready { amount, symbol } => html! {
                    <>
                        <div class="balance-value-wrapper">
                            <span key={amount.clone()} class={classes!("balance-value", if *highlighted { "updated" } else { "" })}>
                                { amount }
                            </span>
                            if *highlighted {
                                <div class="balance-updated-badge">{"Updated!"}</div>
                            }
                        </div>
                        if props.show_symbol {
                            <span class="balance-symbol">{ symbol }</span>
                        }
                    </>
                },
            }}
            if props.show_refresh_button && chain.is_connected() {
                <button
                    class={classes!("btn-refresh", if refreshing { "spinning" } else { "" })}
                    onclick={on_refresh}
                    disabled={refreshing}
                    title="Refresh balance"
                >
                    {"⟳"}
                </button>
            }
        </div>
    }
}

#[derive(Clone, PartialEq)]
pub struct TokenRow {
    pub address: Option<Address>,
    pub symbol: AttrValue,
}

/// Native asset first, then the configured tokens.
pub fn portfolio_rows(native_symbol: &str, tokens: &[TokenConfig]) -> Vec<TokenRow> {
    std::iter::once(TokenRow {
        address: None,
        symbol: AttrValue::from(native_symbol.to_string()),
    })
    .chain(tokens.iter().map(|token| TokenRow {
        address: Some(token.address),
        symbol: AttrValue::from(token.symbol.clone()),
    }))
    .collect()
}

#[derive(Properties, PartialEq)]
pub struct TokenBalanceListProps {
    pub tokens: Vec<TokenRow>,
    #[prop_or_default]
    pub class: Classes,
}

/// Compact list of balances, one row per token.
#[function_component(TokenBalanceList)]
pub fn token_balance_list(props: &TokenBalanceListProps) -> Html {
    html! {
        <div class={classes!("token-balance-list", props.class.clone())}>
            { for props.tokens.iter().map(|token| {
                let key = token
                    .address
                    .map(|a| format!("{:#x}", a))
                    .unwrap_or_else(|| token.symbol.to_string());
                html! {
                    <div key={key} class="token-balance-row">
                        <span class="token-symbol">{ token.symbol.clone() }</span>
                        <TokenBalance
                            token_address={token.address}
                            symbol={token.symbol.clone()}
                            show_symbol={false}
                        />
                    </div>
                }
            })}
        </div>
    }
}
