use std::collections::HashMap;
use std::rc::Rc;

use ethers_core::types::Address;
use log::debug;
use yew::Reducible;

use crate::models::{AssetKey, BalanceRecord};

/// Last-known balance per asset for the connected account.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceStore {
    account: Option<Address>,
    records: HashMap<AssetKey, BalanceRecord>,
    in_flight: HashMap<AssetKey, u32>,
    watched: HashMap<AssetKey, u32>,
    /// Bumped to ask every mounted balance view to re-fetch.
    pub refresh_epoch: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub enum BalanceAction {
    SetAccount(Option<Address>),
    Watch(AssetKey),
    Unwatch(AssetKey),
    RefreshStarted {
        account: Address,
        asset: AssetKey,
    },
    Loaded {
        account: Address,
        asset: AssetKey,
        record: BalanceRecord,
    },
    RefreshFailed {
        account: Address,
        asset: AssetKey,
    },
    RequestRefresh,
}

impl BalanceStore {
    pub fn new(account: Option<Address>) -> Self {
        Self {
            account,
            ..Self::default()
        }
    }

    pub fn record(&self, asset: &AssetKey) -> Option<&BalanceRecord> {
        self.records.get(asset)
    }

    pub fn is_refreshing(&self, asset: &AssetKey) -> bool {
        self.in_flight.get(asset).copied().unwrap_or(0) > 0
    }

    #[cfg(test)]
    pub fn is_watched(&self, asset: &AssetKey) -> bool {
        self.watched.contains_key(asset)
    }

    /// Counters only track requests made for the current account.
    fn settle(&mut self, account: Address, asset: &AssetKey) {
        if self.account != Some(account) {
            return;
        }
        if let Some(count) = self.in_flight.get_mut(asset) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                self.in_flight.remove(asset);
            }
        }
    }
}

impl Reducible for BalanceStore {
    type Action = BalanceAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            BalanceAction::SetAccount(account) => {
                if account == self.account {
                    return self;
                }
                next.account = account;
                next.records.clear();
                next.in_flight.clear();
            }
            BalanceAction::Watch(asset) => {
                *next.watched.entry(asset).or_insert(0) += 1;
            }
            BalanceAction::Unwatch(asset) => {
                if let Some(count) = next.watched.get_mut(&asset) {
                    *count -= 1;
                    if *count == 0 {
                        next.watched.remove(&asset);
                    }
                }
            }
            BalanceAction::RefreshStarted { account, asset } => {
                if next.account != Some(account) {
                    return self;
                }
                *next.in_flight.entry(asset).or_insert(0) += 1;
            }
            BalanceAction::Loaded { account, asset, record } => {
                next.settle(account, &asset);
                if next.account != Some(account) || !next.watched.contains_key(&asset) {
                    debug!("Discarding stale balance for {} ({:#x})", asset, account);
                } else {
                    next.records.insert(asset, record);
                }
            }
            BalanceAction::RefreshFailed { account, asset } => {
                next.settle(account, &asset);
            }
            BalanceAction::RequestRefresh => {
                next.refresh_epoch += 1;
            }
        }
        next.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers_core::types::U256;

    fn record(value: u64) -> BalanceRecord {
        BalanceRecord {
            raw_value: U256::from(value),
            formatted_value: value.to_string(),
            symbol: "ETH".into(),
            decimals: 0,
        }
    }

    fn apply(store: Rc<BalanceStore>, actions: Vec<BalanceAction>) -> Rc<BalanceStore> {
        actions.into_iter().fold(store, |s, a| s.reduce(a))
    }

    fn connected(account: Address) -> Rc<BalanceStore> {
        apply(
            Rc::new(BalanceStore::default()),
            vec![BalanceAction::SetAccount(Some(account)), BalanceAction::Watch(AssetKey::Native)],
        )
    }

    #[test]
    fn last_resolved_refresh_wins() {
        let me = Address::repeat_byte(1);
        let store = apply(
            connected(me),
            vec![
                BalanceAction::RefreshStarted { account: me, asset: AssetKey::Native },
                BalanceAction::RefreshStarted { account: me, asset: AssetKey::Native },
                // The second request resolves first; the first one lands last and stays.
                BalanceAction::Loaded { account: me, asset: AssetKey::Native, record: record(2) },
                BalanceAction::Loaded { account: me, asset: AssetKey::Native, record: record(1) },
            ],
        );
        assert_eq!(store.record(&AssetKey::Native), Some(&record(1)));
        assert!(!store.is_refreshing(&AssetKey::Native));
    }

    #[test]
    fn refreshing_flag_holds_until_every_request_settles() {
        let me = Address::repeat_byte(1);
        let store = apply(
            connected(me),
            vec![
                BalanceAction::RefreshStarted { account: me, asset: AssetKey::Native },
                BalanceAction::RefreshStarted { account: me, asset: AssetKey::Native },
                BalanceAction::RefreshFailed { account: me, asset: AssetKey::Native },
            ],
        );
        assert!(store.is_refreshing(&AssetKey::Native));
        let store = store.reduce(BalanceAction::RefreshFailed { account: me, asset: AssetKey::Native });
        assert!(!store.is_refreshing(&AssetKey::Native));
    }

    #[test]
    fn failure_keeps_last_known_value() {
        let me = Address::repeat_byte(1);
        let store = apply(
            connected(me),
            vec![
                BalanceAction::Loaded { account: me, asset: AssetKey::Native, record: record(5) },
                BalanceAction::RefreshStarted { account: me, asset: AssetKey::Native },
                BalanceAction::RefreshFailed { account: me, asset: AssetKey::Native },
            ],
        );
        assert_eq!(store.record(&AssetKey::Native), Some(&record(5)));
    }

    #[test]
    fn discards_results_for_other_accounts_and_unwatched_assets() {
        let me = Address::repeat_byte(1);
        let previous = Address::repeat_byte(2);
        let token = AssetKey::Token(Address::repeat_byte(3));
        let store = apply(
            connected(me),
            vec![
                BalanceAction::Loaded { account: previous, asset: AssetKey::Native, record: record(9) },
                BalanceAction::Loaded { account: me, asset: token, record: record(4) },
            ],
        );
        assert_eq!(store.record(&AssetKey::Native), None);
        assert_eq!(store.record(&token), None);
    }

    #[test]
    fn account_switch_clears_records_but_keeps_watchers() {
        let me = Address::repeat_byte(1);
        let store = apply(
            connected(me),
            vec![
                BalanceAction::Loaded { account: me, asset: AssetKey::Native, record: record(5) },
                BalanceAction::SetAccount(Some(Address::repeat_byte(2))),
            ],
        );
        assert_eq!(store.record(&AssetKey::Native), None);
        assert!(store.is_watched(&AssetKey::Native));
    }

    #[test]
    fn late_result_from_previous_account_leaves_new_refresh_in_flight() {
        let previous = Address::repeat_byte(1);
        let me = Address::repeat_byte(2);
        let store = apply(
            connected(previous),
            vec![
                BalanceAction::RefreshStarted { account: previous, asset: AssetKey::Native },
                BalanceAction::SetAccount(Some(me)),
                BalanceAction::RefreshStarted { account: me, asset: AssetKey::Native },
                BalanceAction::Loaded { account: previous, asset: AssetKey::Native, record: record(9) },
                BalanceAction::RefreshFailed { account: previous, asset: AssetKey::Native },
            ],
        );
        assert!(store.is_refreshing(&AssetKey::Native));
        assert_eq!(store.record(&AssetKey::Native), None);

        let store = store.reduce(BalanceAction::Loaded { account: me, asset: AssetKey::Native, record: record(3) });
        assert!(!store.is_refreshing(&AssetKey::Native));
        assert_eq!(store.record(&AssetKey::Native), Some(&record(3)));
    }

    #[test]
    fn refresh_started_for_another_account_is_ignored() {
        let store = connected(Address::repeat_byte(1));
        let next = store.clone().reduce(BalanceAction::RefreshStarted {
            account: Address::repeat_byte(2),
            asset: AssetKey::Native,
        });
        assert!(Rc::ptr_eq(&store, &next));
    }

    #[test]
    fn same_account_is_a_no_op() {
        let store = connected(Address::repeat_byte(1));
        let again = store.clone().reduce(BalanceAction::SetAccount(Some(Address::repeat_byte(1))));
        assert!(Rc::ptr_eq(&store, &again));
    }

    #[test]
    fn watch_is_reference_counted() {
        let store = apply(
            connected(Address::repeat_byte(1)),
            vec![BalanceAction::Watch(AssetKey::Native), BalanceAction::Unwatch(AssetKey::Native)],
        );
        assert!(store.is_watched(&AssetKey::Native));
        let store = store.reduce(BalanceAction::Unwatch(AssetKey::Native));
        assert!(!store.is_watched(&AssetKey::Native));
    }
}
