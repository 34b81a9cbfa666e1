//! Seam between the dashboard and the wallet/RPC library that does the real chain work.

use ethers_core::types::{Address, U256};
use futures_util::future::LocalBoxFuture;
use yew::Callback;

use crate::error::Result;
use crate::models::{AssetKey, BalanceRecord, BlockSummary, NetworkInfo, Receipt, TxHash};

pub mod js;

pub use js::JsChainClient;

pub trait ChainClient {
    fn get_balance(&self, account: Address, asset: AssetKey) -> LocalBoxFuture<'static, Result<BalanceRecord>>;

    /// Requires interactive signing in the wallet.
    fn send_transaction(&self, to: Address, value: U256) -> LocalBoxFuture<'static, Result<TxHash>>;

    fn wait_for_receipt(&self, hash: TxHash, confirmations: u32) -> LocalBoxFuture<'static, Result<Receipt>>;

    fn watch_blocks(&self, on_block: Callback<BlockSummary>) -> Result<BlockSubscription>;

    fn get_connected_account(&self) -> Option<Address>;

    fn get_current_network(&self) -> Option<NetworkInfo>;
}

/// Live block subscription; dropping it unsubscribes.
pub struct BlockSubscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl BlockSubscription {
    pub fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }
}

impl Drop for BlockSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
