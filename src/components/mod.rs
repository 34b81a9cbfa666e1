pub mod dashboard;
pub mod token_balance;
pub mod transaction_status;
pub mod transfer_form;
pub mod wallet_balance;

pub use dashboard::WalletDashboard;
pub use token_balance::TokenBalanceList;
pub use transaction_status::TransactionStatus;
pub use transfer_form::TransferForm;
pub use wallet_balance::WalletBalance;
