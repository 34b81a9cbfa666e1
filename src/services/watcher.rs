use std::rc::Rc;

use ethers_core::types::Address;
use futures_util::future::{select, Either};
use log::{debug, error, info, warn};
use yew::Callback;

use super::schedule::Sleeper;
use crate::chain::ChainClient;
use crate::config::WatcherConfig;
use crate::models::{BlockSummary, ReceiptStatus, TxHash};
use crate::store::PendingAction;

/// How a tracked transaction left the pending set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchOutcome {
    Confirmed,
    /// Mined with a failure status.
    Reverted,
    /// The receipt poll itself failed.
    Dropped,
    TimedOut,
}

/// Where a confirmation is reported.
#[derive(Clone)]
pub struct WatchHooks {
    pub pending: Callback<PendingAction>,
    pub refresh: Callback<()>,
    pub on_confirmed: Option<Callback<TxHash>>,
}

/// Waits for `hash` to confirm and drives it through the pending store.
///
/// On success the hash moves to the recently-confirmed list and balances are
/// refreshed before the listener hears about it; the entry expires after
/// `expiry_ms`. Any other result only removes the hash from the pending set.
pub async fn watch_transaction(
    client: Rc<dyn ChainClient>,
    sleeper: Rc<dyn Sleeper>,
    config: WatcherConfig,
    hash: TxHash,
    hooks: WatchHooks,
) -> WatchOutcome {
    let receipt = client.wait_for_receipt(hash, config.confirmations);
    let result = match config.receipt_timeout_ms {
        Some(ms) => match select(receipt, sleeper.sleep(ms)).await {
            Either::Left((result, _)) => Some(result),
            Either::Right(_) => None,
        },
        None => Some(receipt.await),
    };

    match result {
        Some(Ok(receipt)) if receipt.status == ReceiptStatus::Success => {
            info!("Transaction {} confirmed", hash);
            hooks.pending.emit(PendingAction::Confirm(hash));
            hooks.refresh.emit(());
            if let Some(on_confirmed) = &hooks.on_confirmed {
                on_confirmed.emit(hash);
            }
            sleeper.sleep(config.expiry_ms).await;
            hooks.pending.emit(PendingAction::Expire(hash));
            WatchOutcome::Confirmed
        }
        Some(Ok(_)) => {
            warn!("Transaction {} was mined but reverted", hash);
            hooks.pending.emit(PendingAction::Drop(hash));
            WatchOutcome::Reverted
        }
        Some(Err(e)) => {
            error!("Error watching transaction {}: {}", hash, e);
            hooks.pending.emit(PendingAction::Drop(hash));
            WatchOutcome::Dropped
        }
        None => {
            warn!("No receipt for {} after {:?} ms, no longer tracking it", hash, config.receipt_timeout_ms);
            hooks.pending.emit(PendingAction::Drop(hash));
            WatchOutcome::TimedOut
        }
    }
}

/// Schedules a balance refresh when `block` touches the connected account.
/// Returns whether a refresh was requested.
pub async fn observe_block(
    block: BlockSummary,
    account: Option<Address>,
    delay_ms: u32,
    sleeper: Rc<dyn Sleeper>,
    refresh: Callback<()>,
) -> bool {
    let Some(account) = account else {
        return false;
    };
    if !block.involves(account) {
        return false;
    }
    debug!("Block {:?} involves {:#x}, refreshing in {} ms", block.number, account, delay_ms);
    sleeper.sleep(delay_ms).await;
    refresh.emit(());
    true
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::DashboardError;
    use crate::models::BlockTx;
    use crate::store::PendingStore;
    use crate::test_utils::{tx_hash, InstantSleeper, MockChainClient};
    use futures::executor::block_on;
    use yew::Reducible;

    struct Harness {
        client: Rc<MockChainClient>,
        sleeper: Rc<InstantSleeper>,
        events: Rc<RefCell<Vec<String>>>,
        actions: Rc<RefCell<Vec<PendingAction>>>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                client: Rc::new(MockChainClient::default()),
                sleeper: Rc::new(InstantSleeper::default()),
                events: Rc::default(),
                actions: Rc::default(),
            }
        }

        fn hooks(&self) -> WatchHooks {
            let events = self.events.clone();
            let actions = self.actions.clone();
            let refresh_events = self.events.clone();
            let notify_events = self.events.clone();
            WatchHooks {
                pending: Callback::from(move |action: PendingAction| {
                    let label = match &action {
                        PendingAction::Track(_) => "Track",
                        PendingAction::Confirm(_) => "Confirm",
                        PendingAction::Drop(_) => "Drop",
                        PendingAction::Expire(_) => "Expire",
                    };
                    events.borrow_mut().push(label.to_string());
                    actions.borrow_mut().push(action);
                }),
                refresh: Callback::from(move |_| refresh_events.borrow_mut().push("Refresh".into())),
                on_confirmed: Some(Callback::from(move |hash: TxHash| {
                    notify_events.borrow_mut().push(format!("Notify {}", hash.short()))
                })),
            }
        }

        fn run(&self, config: WatcherConfig, hash: TxHash) -> WatchOutcome {
            block_on(watch_transaction(self.client.clone(), self.sleeper.clone(), config, hash, self.hooks()))
        }

        fn final_store(&self, hash: TxHash) -> Rc<PendingStore> {
            let start = Rc::new(PendingStore::default()).reduce(PendingAction::Track(hash));
            self.actions.borrow().iter().cloned().fold(start, |s, a| s.reduce(a))
        }
    }

    #[test]
    fn confirmation_runs_effects_in_order_then_expires() {
        let harness = Harness::new();
        let hash = tx_hash(1);
        harness.client.push_receipt(Ok(ReceiptStatus::Success));

        let outcome = harness.run(WatcherConfig::default(), hash);

        assert_eq!(outcome, WatchOutcome::Confirmed);
        assert_eq!(
            *harness.events.borrow(),
            vec!["Confirm", "Refresh", format!("Notify {}", hash.short()).as_str(), "Expire"]
        );
        assert_eq!(*harness.sleeper.slept.borrow(), vec![5000]);
        assert!(harness.final_store(hash).is_empty());
    }

    #[test]
    fn confirmation_waits_for_configured_confirmations() {
        let harness = Harness::new();
        harness.client.push_receipt(Ok(ReceiptStatus::Success));
        let config = WatcherConfig { confirmations: 3, expiry_ms: 1200, ..WatcherConfig::default() };

        harness.run(config, tx_hash(1));

        assert_eq!(*harness.client.confirmations_requested.borrow(), vec![3]);
        assert_eq!(*harness.sleeper.slept.borrow(), vec![1200]);
    }

    #[test]
    fn poll_error_drops_without_confirmation_effects() {
        let harness = Harness::new();
        let hash = tx_hash(2);
        harness.client.push_receipt(Err(DashboardError::Network("rpc down".into())));

        let outcome = harness.run(WatcherConfig::default(), hash);

        assert_eq!(outcome, WatchOutcome::Dropped);
        assert_eq!(*harness.events.borrow(), vec!["Drop"]);
        let store = harness.final_store(hash);
        assert!(store.pending().is_empty());
        assert!(store.confirmed().is_empty());
    }

    #[test]
    fn reverted_receipt_leaves_pending_without_confirming() {
        let harness = Harness::new();
        harness.client.push_receipt(Ok(ReceiptStatus::Failure));

        let outcome = harness.run(WatcherConfig::default(), tx_hash(3));

        assert_eq!(outcome, WatchOutcome::Reverted);
        assert_eq!(*harness.events.borrow(), vec!["Drop"]);
    }

    #[test]
    fn optional_timeout_gives_up_on_a_stuck_receipt() {
        let harness = Harness::new();
        let config = WatcherConfig { receipt_timeout_ms: Some(60_000), ..WatcherConfig::default() };

        let outcome = harness.run(config, tx_hash(4));

        assert_eq!(outcome, WatchOutcome::TimedOut);
        assert_eq!(*harness.sleeper.slept.borrow(), vec![60_000]);
        assert_eq!(*harness.events.borrow(), vec!["Drop"]);
    }

    #[test]
    fn block_touching_account_schedules_delayed_refresh() {
        let me = Address::repeat_byte(0x11);
        let sleeper = Rc::new(InstantSleeper::default());
        let refreshed = Rc::new(RefCell::new(0));
        let counter = refreshed.clone();
        let refresh = Callback::from(move |_| *counter.borrow_mut() += 1);
        let block = BlockSummary {
            number: Some(10),
            transactions: vec![BlockTx { from: Some(Address::repeat_byte(0x22)), to: Some(me) }],
        };

        assert!(block_on(observe_block(block.clone(), Some(me), 1000, sleeper.clone(), refresh.clone())));
        assert!(!block_on(observe_block(block.clone(), Some(Address::repeat_byte(0x33)), 1000, sleeper.clone(), refresh.clone())));
        assert!(!block_on(observe_block(block, None, 1000, sleeper.clone(), refresh)));

        assert_eq!(*refreshed.borrow(), 1);
        assert_eq!(*sleeper.slept.borrow(), vec![1000]);
    }
}
