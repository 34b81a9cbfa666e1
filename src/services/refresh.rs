use std::rc::Rc;

use ethers_core::types::Address;
use log::{debug, error};
use yew::Callback;

use crate::chain::ChainClient;
use crate::error::Result;
use crate::models::{AssetKey, BalanceRecord};
use crate::store::BalanceAction;

/// Fetches the balance of `asset` for `account` and writes it to the store.
///
/// Without a connected account nothing is fetched and `Ok(None)` is returned.
/// A failed fetch leaves the stored record as it was; the error is logged and
/// handed back so callers can decide whether to show it.
pub async fn refresh_balance(
    client: Rc<dyn ChainClient>,
    account: Option<Address>,
    asset: AssetKey,
    store: Callback<BalanceAction>,
) -> Result<Option<BalanceRecord>> {
    let Some(account) = account else {
        return Ok(None);
    };

    store.emit(BalanceAction::RefreshStarted { account, asset });
    match client.get_balance(account, asset).await {
        Ok(record) => {
            debug!("Balance of {} for {:#x}: {} {}", asset, account, record.formatted_value, record.symbol);
            store.emit(BalanceAction::Loaded {
                account,
                asset,
                record: record.clone(),
            });
            Ok(Some(record))
        }
        Err(e) => {
            error!("Balance refresh failed for {} ({:#x}): {}", asset, account, e);
            store.emit(BalanceAction::RefreshFailed { account, asset });
            Err(e)
        }
    }
}
