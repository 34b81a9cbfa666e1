use std::rc::Rc;

use ethers_core::types::{Address, U256};
use log::{error, info};
use yew::Callback;

use crate::chain::ChainClient;
use crate::error::{DashboardError, Result};
use crate::models::TxHash;
use crate::store::PendingAction;
use crate::utils::{parse_amount, parse_recipient};

#[derive(Clone, Debug, PartialEq)]
pub struct TransferRequest {
    pub to: Address,
    pub value: U256,
}

pub fn validate_transfer(recipient: &str, amount: &str) -> Result<TransferRequest> {
    if recipient.trim().is_empty() || amount.trim().is_empty() {
        return Err(DashboardError::Validation("Please fill in all fields".into()));
    }
    Ok(TransferRequest {
        to: parse_recipient(recipient)?,
        value: parse_amount(amount)?,
    })
}

/// Sends a native transfer and starts tracking its hash. Single attempt, no retry.
pub async fn submit_transfer(
    client: Rc<dyn ChainClient>,
    account: Option<Address>,
    recipient: String,
    amount: String,
    pending: Callback<PendingAction>,
) -> Result<TxHash> {
    if account.is_none() {
        return Err(DashboardError::Submission("Wallet not connected".into()));
    }
    let request = validate_transfer(&recipient, &amount)?;

    let hash = client
        .send_transaction(request.to, request.value)
        .await
        .map_err(|e| {
            error!("Transfer error: {}", e);
            match e {
                DashboardError::Submission(msg) => DashboardError::Submission(msg),
                other => DashboardError::Submission(other.to_string()),
            }
        })?;

    info!("Transaction sent: {}", hash);
    pending.emit(PendingAction::Track(hash));
    Ok(hash)
}
