use web_sys::HtmlInputElement;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::context::{dispatcher_callback, use_chain, use_pending};
use crate::error::Result;
use crate::models::TxHash;
use crate::services::submit_transfer;
use crate::utils::clear_status_after_delay;

/// Both fields filled and nothing in flight.
pub fn can_submit(recipient: &str, amount: &str, busy: bool) -> bool {
    !busy && !recipient.trim().is_empty() && !amount.trim().is_empty()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    pub recipient: String,
    pub amount: String,
    pub error: String,
}

/// A sent transfer empties the form; a failed one keeps the input next to its message.
pub fn apply_outcome(state: FormState, outcome: &Result<TxHash>) -> FormState {
    match outcome {
        Ok(_) => FormState::default(),
        Err(e) => FormState {
            error: e.to_string(),
            ..state
        },
    }
}

#[derive(Properties, PartialEq)]
pub struct TransferFormProps {
    #[prop_or_default]
    pub class: Classes,
}

#[function_component(TransferForm)]
pub fn transfer_form(props: &TransferFormProps) -> Html {
    let chain = use_chain();
    let pending = use_pending();
    let recipient = use_state(String::new);
    let amount = use_state(String::new);
    let busy = use_state(|| false);
    let error = use_state(String::new);

    let on_recipient = {
        let recipient = recipient.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                recipient.set(input.value());
            }
        })
    };

    let on_amount = {
        let amount = amount.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                amount.set(input.value());
            }
        })
    };

    let onsubmit = {
        let chain = chain.clone();
        let on_pending = dispatcher_callback(&pending);
        let recipient = recipient.clone();
        let amount = amount.clone();
        let busy = busy.clone();
        let error = error.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *busy {
                return;
            }
            busy.set(true);
            error.set(String::new());

            let client = chain.client.clone();
            let account = chain.account;
            let error_clear_ms = chain.config.error_clear_ms;
            let on_pending = on_pending.clone();
            let recipient = recipient.clone();
            let amount = amount.clone();
            let busy = busy.clone();
            let error = error.clone();
            spawn_local(async move {
                let submitted = FormState {
                    recipient: (*recipient).clone(),
                    amount: (*amount).clone(),
                    error: String::new(),
                };
                let outcome = submit_transfer(
                    client,
                    account,
                    submitted.recipient.clone(),
                    submitted.amount.clone(),
                    on_pending,
                )
                .await;
                let next = apply_outcome(submitted, &outcome);
                recipient.set(next.recipient);
                amount.set(next.amount);
                if !next.error.is_empty() {
                    clear_status_after_delay(error.clone(), error_clear_ms);
                }
                error.set(next.error);
                busy.set(false);
            });
        })
    };

    if !chain.is_connected() {
        return html! {
            <div class={classes!("wallet-card", "placeholder", props.class.clone())}>
                <p class="info-text">{"Connect wallet to test transfers"}</p>
            </div>
        };
    }

    let enabled = can_submit(&recipient, &amount, *busy);

    html! {
        <div class={classes!("wallet-card", "transfer-form", props.class.clone())}>
            <h3>{"Send Transaction"}</h3>
            <form {onsubmit}>
                <div class="form-group">
                    <label for="transfer-recipient">{"Recipient Address"}</label>
                    <input
                        id="transfer-recipient"
                        type="text"
                        placeholder="0x..."
                        value={(*recipient).clone()}
                        oninput={on_recipient}
                        disabled={*busy}
                    />
                </div>
                <div class="form-group">
                    <label for="transfer-amount">{"Amount"}</label>
                    <input
                        id="transfer-amount"
                        type="text"
                        inputmode="decimal"
                        placeholder="0.0"
                        value={(*amount).clone()}
                        oninput={on_amount}
                        disabled={*busy}
                    />
                </div>
                if !error.is_empty() {
                    <p class="error-text" role="alert">{ (*error).clone() }</p>
                }
                <button type="submit" class="btn btn-primary" disabled={!enabled}>
                    if *busy {
                        <span class="spinner small"></span>
                        {"Sending..."}
                    } else {
                        {"Send Transaction"}
                    }
                </button>
            </form>
        </div>
    }
}
