//! Fixtures shared by the unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::{PrevOut, TransactionRecord, TxInput, TxOutput, WalletSnapshot};

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn record(hash: &str, result: i64, time: DateTime<Utc>, fee: Option<u64>) -> TransactionRecord {
    TransactionRecord {
        hash: hash.to_string(),
        time,
        result,
        fee,
        inputs: vec![],
        outputs: vec![],
    }
}

pub fn output(addr: Option<&str>, value: u64) -> TxOutput {
    TxOutput {
        addr: addr.map(str::to_string),
        value,
    }
}

pub fn input(addr: Option<&str>) -> TxInput {
    TxInput {
        prev_out: Some(PrevOut {
            addr: addr.map(str::to_string),
        }),
    }
}

pub fn with_outputs(mut tx: TransactionRecord, outputs: Vec<TxOutput>) -> TransactionRecord {
    tx.outputs = outputs;
    tx
}

pub fn snapshot(final_balance: i64, txs: Vec<TransactionRecord>) -> WalletSnapshot {
    WalletSnapshot {
        address: None,
        n_tx: Some(txs.len() as u64),
        final_balance,
        txs,
    }
}

/// r1 receives 500 to A, r2 sends 150 to B and 50 to C, r3 is neutral with an
/// output lacking an address.
pub fn sample_snapshot() -> WalletSnapshot {
    snapshot(
        300,
        vec![
            with_outputs(record("r1", 500, t0(), Some(10)), vec![output(Some("A"), 500)]),
            with_outputs(
                record("r2", -200, t0() + Duration::hours(1), Some(5)),
                vec![output(Some("B"), 150), output(Some("C"), 50)],
            ),
            with_outputs(
                record("r3", 0, t0() + Duration::hours(2), Some(0)),
                vec![output(None, 10)],
            ),
        ],
    )
}

/// The sample dataset in the upstream wire format.
pub fn sample_payload() -> serde_json::Value {
    let t = t0().timestamp();
    serde_json::json!({
        "address": "1SampleAddr",
        "n_tx": 3,
        "total_received": 500,
        "total_sent": 200,
        "final_balance": 300,
        "txs": [
            {
                "hash": "r1", "time": t, "result": 500, "fee": 10,
                "inputs": [{ "prev_out": { "addr": "1Funder", "value": 510 } }],
                "out": [{ "addr": "A", "value": 500, "spent": false }]
            },
            {
                "hash": "r2", "time": t + 3600, "result": -200, "fee": 5,
                "inputs": [{ "prev_out": { "addr": "1SampleAddr", "value": 205 } }],
                "out": [{ "addr": "B", "value": 150 }, { "addr": "C", "value": 50 }]
            },
            {
                "hash": "r3", "time": t + 7200, "result": 0, "fee": 0,
                "inputs": [{}],
                "out": [{ "value": 10, "script": "6a" }]
            }
        ]
    })
}
