use yew::prelude::*;

use crate::components::token_balance::TokenBalance;
use crate::context::use_chain;
use crate::models::TokenConfig;

#[derive(Properties, PartialEq)]
pub struct WalletBalanceProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(true)]
    pub show_native_balance: bool,
    #[prop_or_default]
    pub show_token_balances: bool,
    #[prop_or_default]
    pub tokens: Vec<TokenConfig>,
}

#[function_component(WalletBalance)]
pub fn wallet_balance(props: &WalletBalanceProps) -> Html {
    let chain = use_chain();

    if !chain.is_connected() {
        return html! {
            <div class={classes!("wallet-card", "placeholder", props.class.clone())}>
                <p class="info-text">{"Connect wallet to view balances"}</p>
            </div>
        };
    }

    let network_name = chain
        .network
        .as_ref()
        .map(|n| n.name.clone())
        .unwrap_or_else(|| "Unknown Network".to_string());
    let native_symbol = chain
        .network
        .as_ref()
        .map(|n| n.native_asset_symbol.clone())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "ETH".to_string());

    html! {
        <div class={classes!("wallet-card", "fade-in", props.class.clone())} aria-live="polite">
            <div class="wallet-card-header">
                <h3>{"Wallet Balance"}</h3>
                <span class="network-name">{ network_name }</span>
            </div>

            <div class="balance-rows">
                if props.show_native_balance {
                    <div class="balance-row">
                        <div class="asset-label">
                            <span class="asset-icon native"></span>
                            <span class="asset-symbol">{ native_symbol.clone() }</span>
                        </div>
                        <TokenBalance
                            symbol={native_symbol}
                            show_symbol={false}
                            show_refresh_button={true}
                            precision={chain.config.balance.native_precision}
                            class="balance-large"
                        />
                    </div>
                }

                if props.show_token_balances && !props.tokens.is_empty() {
                    <div class="token-rows">
                        <h4>{"Token Balances"}</h4>
                        { for props.tokens.iter().map(|token| html! {
                            <div key={format!("{:#x}", token.address)} class="balance-row">
                                <div class="asset-label">
                                    <span class="asset-icon token"></span>
                                    <span class="asset-symbol">{ &token.symbol }</span>
                                </div>
                                <TokenBalance
                                    token_address={token.address}
                                    symbol={token.symbol.clone()}
                                    show_symbol={false}
                                    show_refresh_button={true}
                                    precision={chain.config.balance.precision}
                                />
                            </div>
                        })}
                    </div>
                }
            </div>

            <p class="hint">{"Balances update automatically after transactions"}</p>
        </div>
    }
}
