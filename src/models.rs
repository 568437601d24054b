// src/models.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One address lookup as returned by the ledger API.
///
/// Unknown fields in the upstream document are ignored; missing required
/// fields fail deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct WalletSnapshot {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub n_tx: Option<u64>,
    pub final_balance: i64,
    pub txs: Vec<TransactionRecord>,
}

/// A transaction as seen from the queried address.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRecord {
    pub hash: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,
    /// Net effect on the queried address: positive = received, negative = sent.
    pub result: i64,
    #[serde(default)]
    pub fee: Option<u64>,
    #[serde(default)]
    pub inputs: Vec<TxInput>,
    #[serde(rename = "out")]
    pub outputs: Vec<TxOutput>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxInput {
    #[serde(default)]
    pub prev_out: Option<PrevOut>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrevOut {
    #[serde(default)]
    pub addr: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TxOutput {
    #[serde(default)]
    pub addr: Option<String>,
    pub value: u64,
}

impl TxInput {
    pub fn address(&self) -> Option<&str> {
        self.prev_out.as_ref().and_then(|p| p.addr.as_deref())
    }
}

/// Headline figures for the overview panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub balance: i64,
    pub total_received: u128,
    pub total_sent: u128,
    pub first_transaction: DateTime<Utc>,
    pub last_transaction: DateTime<Utc>,
    pub last_24h_received: u128,
    pub last_24h_sent: u128,
}

/// Per-transaction averages. Denominators are always the full record count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplementaryStats {
    pub avg_fee: Decimal,
    pub avg_sent: Decimal,
    pub avg_received: Decimal,
}

/// Result-based filter applied by the graph builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum FilterType {
    #[default]
    All,
    Sent,
    Received,
}

impl FilterType {
    /// `Sent` keeps sent and neutral records, `Received` keeps received and
    /// neutral ones.
    pub fn admits(self, result: i64) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Sent => result <= 0,
            FilterType::Received => result >= 0,
        }
    }
}

/// Inclusive time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}
