//! Test doubles shared by the service and store tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use ethers_core::types::{Address, H256, U256};
use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;
use yew::{Callback, Reducible};

use crate::chain::{BlockSubscription, ChainClient};
use crate::error::{DashboardError, Result};
use crate::models::{AssetKey, BalanceRecord, BlockSummary, NetworkInfo, Receipt, ReceiptStatus, TxHash};
use crate::services::Sleeper;

pub fn tx_hash(byte: u8) -> TxHash {
    TxHash(H256::repeat_byte(byte))
}

pub fn native_record(wei: u64) -> BalanceRecord {
    BalanceRecord {
        raw_value: U256::from(wei),
        formatted_value: crate::utils::format_raw_balance(U256::from(wei), 18),
        symbol: "ETH".into(),
        decimals: 18,
    }
}

/// A store dispatcher that records every action it receives.
pub fn recording_store<T: Reducible>() -> (Callback<T::Action>, Rc<RefCell<Vec<T::Action>>>)
where
    T::Action: 'static,
{
    let actions = Rc::new(RefCell::new(Vec::new()));
    let sink = actions.clone();
    (Callback::from(move |action| sink.borrow_mut().push(action)), actions)
}

/// Scripted chain client. Calls with nothing scripted never resolve.
#[derive(Default)]
pub struct MockChainClient {
    balances: RefCell<VecDeque<Result<BalanceRecord>>>,
    sends: RefCell<VecDeque<Result<TxHash>>>,
    receipts: RefCell<VecDeque<Result<ReceiptStatus>>>,
    calls: Cell<usize>,
    pub account: Cell<Option<Address>>,
    pub sent: RefCell<Vec<(Address, U256)>>,
    pub confirmations_requested: RefCell<Vec<u32>>,
    pub block_listener: RefCell<Option<Callback<BlockSummary>>>,
}

impl MockChainClient {
    pub fn push_balance(&self, result: Result<BalanceRecord>) {
        self.balances.borrow_mut().push_back(result);
    }

    pub fn push_send(&self, result: Result<TxHash>) {
        self.sends.borrow_mut().push_back(result);
    }

    pub fn push_receipt(&self, result: Result<ReceiptStatus>) {
        self.receipts.borrow_mut().push_back(result);
    }

    /// Number of async chain calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn respond<T: 'static>(&self, next: Option<Result<T>>) -> LocalBoxFuture<'static, Result<T>> {
        self.calls.set(self.calls.get() + 1);
        match next {
            Some(result) => future::ready(result).boxed_local(),
            None => future::pending().boxed_local(),
        }
    }
}

impl ChainClient for MockChainClient {
    fn get_balance(&self, _account: Address, _asset: AssetKey) -> LocalBoxFuture<'static, Result<BalanceRecord>> {
        let next = self.balances.borrow_mut().pop_front();
        self.respond(next)
    }

    fn send_transaction(&self, to: Address, value: U256) -> LocalBoxFuture<'static, Result<TxHash>> {
        self.sent.borrow_mut().push((to, value));
        let next = self.sends.borrow_mut().pop_front();
        self.respond(next)
    }

    fn wait_for_receipt(&self, hash: TxHash, confirmations: u32) -> LocalBoxFuture<'static, Result<Receipt>> {
        self.confirmations_requested.borrow_mut().push(confirmations);
        let next = self
            .receipts
            .borrow_mut()
            .pop_front()
            .map(|r| r.map(|status| Receipt { hash, status }));
        self.respond(next)
    }

    fn watch_blocks(&self, on_block: Callback<BlockSummary>) -> Result<BlockSubscription> {
        if self.block_listener.borrow().is_some() {
            return Err(DashboardError::Network("already subscribed".into()));
        }
        *self.block_listener.borrow_mut() = Some(on_block);
        Ok(BlockSubscription::new(|| ()))
    }

    fn get_connected_account(&self) -> Option<Address> {
        self.account.get()
    }

    fn get_current_network(&self) -> Option<NetworkInfo> {
        Some(NetworkInfo {
            name: "Sepolia".into(),
            native_asset_symbol: "ETH".into(),
        })
    }
}

/// Resolves every sleep immediately and remembers the requested durations.
#[derive(Default)]
pub struct InstantSleeper {
    pub slept: RefCell<Vec<u32>>,
}

impl Sleeper for InstantSleeper {
    fn sleep(&self, ms: u32) -> LocalBoxFuture<'static, ()> {
        self.slept.borrow_mut().push(ms);
        future::ready(()).boxed_local()
    }
}
