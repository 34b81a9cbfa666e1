pub mod balance;
pub mod pending;

pub use balance::{BalanceAction, BalanceStore};
pub use pending::{PendingAction, PendingStore};
