use yew::prelude::*;

use crate::context::{use_confirm_listeners, use_pending};
use crate::models::TxHash;
use crate::store::PendingStore;

#[derive(Clone, Debug, PartialEq)]
pub struct StatusEntry {
    pub hash: TxHash,
    pub confirmed: bool,
}

/// Pending entries first, then the ones still shown as confirmed.
pub fn status_entries(store: &PendingStore) -> Vec<StatusEntry> {
    store
        .pending()
        .iter()
        .map(|hash| StatusEntry { hash: *hash, confirmed: false })
        .chain(store.confirmed().iter().map(|hash| StatusEntry { hash: *hash, confirmed: true }))
        .collect()
}

#[derive(Properties, PartialEq)]
pub struct TransactionStatusProps {
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub on_transaction_confirmed: Option<Callback<TxHash>>,
}

#[function_component(TransactionStatus)]
pub fn transaction_status(props: &TransactionStatusProps) -> Html {
    let pending = use_pending();
    let listeners = use_confirm_listeners();

    use_effect_with(props.on_transaction_confirmed.clone(), move |callback| {
        let id = callback.clone().map(|cb| listeners.register(cb));
        move || {
            if let Some(id) = id {
                listeners.unregister(id);
            }
        }
    });

    if pending.is_empty() {
        return html! {};
    }

    html! {
        <div class={classes!("tx-status-overlay", props.class.clone())} aria-live="polite">
            { for status_entries(&pending).into_iter().map(|entry| {
                let key = format!("{}-{}", entry.hash, entry.confirmed);
                if entry.confirmed {
                    html! {
                        <div key={key} class="tx-status-card confirmed fade-in">
                            <span class="tx-status-icon">{"✓"}</span>
                            <div class="tx-status-body">
                                <p class="tx-status-title">{"Transaction Confirmed"}</p>
                                <p class="tx-status-detail">{"Balance updated"}</p>
                            </div>
                        </div>
                    }
                } else {
                    html! {
                        <div key={key} class="tx-status-card pending fade-in">
                            <div class="spinner small"></div>
                            <div class="tx-status-body">
                                <p class="tx-status-title">{"Transaction Pending"}</p>
                                <p class="tx-status-detail mono" title={entry.hash.to_string()}>
                                    { entry.hash.short() }
                                </p>
                            </div>
                        </div>
                    }
                }
            })}
        </div>
    }
}
