use log::info;
use yew::prelude::*;

use crate::components::token_balance::portfolio_rows;
use crate::components::{TokenBalanceList, TransactionStatus, TransferForm, WalletBalance};
use crate::context::use_chain;
use crate::models::TxHash;

#[derive(Properties, PartialEq)]
pub struct WalletDashboardProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(true)]
    pub show_transaction_status: bool,
}

#[function_component(WalletDashboard)]
pub fn wallet_dashboard(props: &WalletDashboardProps) -> Html {
    let chain = use_chain();

    let on_confirmed = use_callback((), |hash: TxHash, _| {
        info!("Transaction confirmed in dashboard: {}", hash);
    });

    let Some(account) = chain.account else {
        return html! {
            <div class={classes!("screen-container", props.class.clone())} role="main" aria-label="Wallet Dashboard">
                <div class="wallet-card placeholder">
                    <h2>{"Wallet Dashboard"}</h2>
                    <p>{"Connect your wallet to view balances and transactions"}</p>
                </div>
            </div>
        };
    };

    let network_name = chain
        .network
        .as_ref()
        .map(|n| n.name.clone())
        .unwrap_or_else(|| "Unknown Network".to_string());
    let native_symbol = chain
        .network
        .as_ref()
        .map(|n| n.native_asset_symbol.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("ETH");
    let tokens = chain.config.tokens.clone();
    let portfolio = portfolio_rows(native_symbol, &tokens);
    let has_tokens = !tokens.is_empty();

    html! {
        <div class={classes!("screen-container", props.class.clone())} role="main" aria-label="Wallet Dashboard">
            <div class="dashboard-grid">
                <WalletBalance show_native_balance={true} />
                if has_tokens {
                    <WalletBalance
                        show_native_balance={false}
                        show_token_balances={true}
                        tokens={tokens}
                    />
                }
                <TransferForm />
            </div>

            if has_tokens {
                <div class="portfolio-summary">
                    <h4>{"Portfolio"}</h4>
                    <TokenBalanceList tokens={portfolio} />
                </div>
            }

            <div class="network-row">
                <span class="network-label">{"Network:"}</span>
                <span class="network-name">{ network_name }</span>
                <span class="account-address mono" title={format!("{:#x}", account)}>
                    { account.to_string() }
                </span>
            </div>

            if props.show_transaction_status {
                <TransactionStatus on_transaction_confirmed={on_confirmed} />
            }
        </div>
    }
}
