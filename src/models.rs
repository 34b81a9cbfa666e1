use std::fmt;
use std::str::FromStr;

use ethers_core::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};

/// Key of a Balance Store entry: the chain's native asset or a token contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetKey {
    Native,
    Token(Address),
}

impl AssetKey {
    /// Wire form handed to the JS client: `"native"` or the contract address.
    pub fn as_param(&self) -> String {
        match self {
            AssetKey::Native => "native".to_string(),
            AssetKey::Token(address) => format!("{:#x}", address),
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_param())
    }
}

impl From<Option<Address>> for AssetKey {
    fn from(token: Option<Address>) -> Self {
        token.map(AssetKey::Token).unwrap_or(AssetKey::Native)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BalanceRecord {
    pub raw_value: U256,
    pub formatted_value: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Identifier of a submitted transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TxHash(pub H256);

impl TxHash {
    /// `0x12345678...9abcdef0`, the form used in notifications.
    pub fn short(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..10], &full[full.len() - 8..])
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for TxHash {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix("0x").ok_or_else(|| format!("Malformed transaction hash: {}", s))?;
        if hex.len() != 64 {
            return Err(format!("Malformed transaction hash: {}", s));
        }
        H256::from_str(hex)
            .map(TxHash)
            .map_err(|e| format!("Malformed transaction hash {}: {}", s, e))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Receipt {
    pub hash: TxHash,
    pub status: ReceiptStatus,
}

/// A transaction as seen in a block notification.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockTx {
    pub from: Option<Address>,
    pub to: Option<Address>,
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct BlockSummary {
    pub number: Option<u64>,
    pub transactions: Vec<BlockTx>,
}

impl BlockSummary {
    pub fn involves(&self, account: Address) -> bool {
        self.transactions
            .iter()
            .any(|tx| tx.from == Some(account) || tx.to == Some(account))
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub name: String,
    #[serde(alias = "symbol")]
    pub native_asset_symbol: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TokenConfig {
    pub address: Address,
    pub symbol: String,
}
