use chrono::{DateTime, Duration, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Error, Result};
use crate::models::{Overview, SupplementaryStats, TransactionRecord, WalletSnapshot};

/// Sum of positive results and sum of negated negative results.
/// Neutral records count towards neither side.
///
/// Totals are accumulated in `u128`: any realistic number of `i64` results
/// fits without overflow.
fn split_flows<'a>(records: impl Iterator<Item = &'a TransactionRecord>) -> (u128, u128) {
    records.fold((0u128, 0u128), |(received, sent), tx| {
        let amount = u128::from(tx.result.unsigned_abs());
        if tx.result > 0 {
            (received.saturating_add(amount), sent)
        } else if tx.result < 0 {
            (received, sent.saturating_add(amount))
        } else {
            (received, sent)
        }
    })
}

/// `sum / count` rounded to two places.
///
/// Split into quotient and remainder first so the division never has to
/// hold the raw sum as a `Decimal`.
fn per_tx(sum: u128, count: usize) -> Decimal {
    let count = count as u128;
    let quotient = u64::try_from(sum / count).unwrap_or(u64::MAX);
    let remainder = (sum % count) as u64;
    let fraction = Decimal::from(remainder) / Decimal::from(count as u64);
    (Decimal::from(quotient) + fraction)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Build the overview panel figures.
///
/// `balance` is the upstream `final_balance` as-is; it is not reconciled
/// against the received/sent totals.
pub fn compute_overview(snapshot: &WalletSnapshot, now: DateTime<Utc>) -> Result<Overview> {
    let txs = &snapshot.txs;

    let first_transaction = txs.iter().map(|tx| tx.time).min().ok_or(Error::EmptyDataset)?;
    let last_transaction = txs.iter().map(|tx| tx.time).max().ok_or(Error::EmptyDataset)?;

    let (total_received, total_sent) = split_flows(txs.iter());

    let cutoff = now
        .checked_sub_signed(Duration::hours(24))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let (last_24h_received, last_24h_sent) =
        split_flows(txs.iter().filter(|tx| tx.time >= cutoff));

    Ok(Overview {
        balance: snapshot.final_balance,
        total_received,
        total_sent,
        first_transaction,
        last_transaction,
        last_24h_received,
        last_24h_sent,
    })
}

/// Per-transaction averages over the whole snapshot.
pub fn compute_stats(snapshot: &WalletSnapshot) -> Result<SupplementaryStats> {
    let count = snapshot.txs.len();
    if count == 0 {
        return Err(Error::EmptyDataset);
    }

    let total_fee: u128 = snapshot
        .txs
        .iter()
        .filter_map(|tx| tx.fee)
        .map(u128::from)
        .sum();
    let (total_received, total_sent) = split_flows(snapshot.txs.iter());

    Ok(SupplementaryStats {
        avg_fee: per_tx(total_fee, count),
        avg_sent: per_tx(total_sent, count),
        avg_received: per_tx(total_received, count),
    })
}
