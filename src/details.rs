use serde::Serialize;

use crate::models::{TransactionRecord, WalletSnapshot};

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    Received,
    Sent,
    Neutral,
}

/// One row of the expandable transaction list.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionDetail {
    pub hash: String,
    pub date: String,
    pub direction: Direction,
    pub amount: u64,
    pub fee: u64,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl From<&TransactionRecord> for TransactionDetail {
    fn from(tx: &TransactionRecord) -> Self {
        let direction = match tx.result {
            r if r > 0 => Direction::Received,
            r if r < 0 => Direction::Sent,
            _ => Direction::Neutral,
        };

        TransactionDetail {
            hash: tx.hash.clone(),
            date: tx.time.format("%Y-%m-%d %H:%M:%S").to_string(),
            direction,
            amount: tx.result.unsigned_abs(),
            fee: tx.fee.unwrap_or(0),
            inputs: tx
                .inputs
                .iter()
                .map(|i| i.address().unwrap_or(UNKNOWN).to_string())
                .collect(),
            outputs: tx
                .outputs
                .iter()
                .map(|o| o.addr.as_deref().unwrap_or(UNKNOWN).to_string())
                .collect(),
        }
    }
}

/// Detail rows for every record, in snapshot order.
pub fn transaction_details(snapshot: &WalletSnapshot) -> Vec<TransactionDetail> {
    snapshot.txs.iter().map(TransactionDetail::from).collect()
}
