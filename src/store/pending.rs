use std::rc::Rc;

use yew::Reducible;

use crate::models::TxHash;

/// Transactions awaiting confirmation plus the ones that confirmed recently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingStore {
    pending: Vec<TxHash>,
    confirmed: Vec<TxHash>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PendingAction {
    Track(TxHash),
    Confirm(TxHash),
    Drop(TxHash),
    Expire(TxHash),
}

impl PendingStore {
    pub fn pending(&self) -> &[TxHash] {
        &self.pending
    }

    pub fn confirmed(&self) -> &[TxHash] {
        &self.confirmed
    }

    #[cfg(test)]
    pub fn is_pending(&self, hash: &TxHash) -> bool {
        self.pending.contains(hash)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.confirmed.is_empty()
    }
}

impl Reducible for PendingStore {
    type Action = PendingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            PendingAction::Track(hash) => {
                if self.pending.contains(&hash) || self.confirmed.contains(&hash) {
                    return self;
                }
                let mut next = (*self).clone();
                next.pending.push(hash);
                next.into()
            }
            PendingAction::Confirm(hash) => {
                // Only a still-pending hash can move; repeats are ignored.
                if !self.pending.contains(&hash) {
                    return self;
                }
                let mut next = (*self).clone();
                next.pending.retain(|h| *h != hash);
                if !next.confirmed.contains(&hash) {
                    next.confirmed.push(hash);
                }
                next.into()
            }
            PendingAction::Drop(hash) => {
                if !self.pending.contains(&hash) {
                    return self;
                }
                let mut next = (*self).clone();
                next.pending.retain(|h| *h != hash);
                next.into()
            }
            PendingAction::Expire(hash) => {
                if !self.confirmed.contains(&hash) {
                    return self;
                }
                let mut next = (*self).clone();
                next.confirmed.retain(|h| *h != hash);
                next.into()
            }
        }
    }
}
