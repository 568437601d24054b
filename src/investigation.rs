// src/investigation.rs
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::info;

use crate::aggregator;
use crate::client::LedgerClient;
use crate::details::{transaction_details, TransactionDetail};
use crate::error::{Error, Result};
use crate::graph::{build_graph, TransactionGraph};
use crate::layout::LayoutConfig;
use crate::models::{FilterType, Overview, SupplementaryStats, TimeRange, WalletSnapshot};

/// Address input that switches to the demonstration dataset.
pub const DEMO_SENTINEL: &str = "demo";
/// Genesis block coinbase address.
pub const DEMO_ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
const DEMO_START: (i32, u32, u32) = (2009, 1, 3);
const DEMO_END: (i32, u32, u32) = (2009, 12, 31);

pub const MIN_TRACE_DEPTH: u8 = 1;
pub const MAX_TRACE_DEPTH: u8 = 5;

fn default_trace_depth() -> u8 {
    2
}

/// Form input for one investigation run.
#[derive(Debug, Clone, Deserialize)]
pub struct InvestigationParams {
    pub address: String,
    /// Accepted and range-checked, but no automated tracing happens yet.
    #[serde(default = "default_trace_depth")]
    pub trace_depth: u8,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub min_amount: u64,
    #[serde(default)]
    pub filter: FilterType,
}

impl InvestigationParams {
    pub fn for_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            trace_depth: default_trace_depth(),
            start_date: None,
            end_date: None,
            min_amount: 0,
            filter: FilterType::All,
        }
    }
}

/// Parameters after sentinel substitution and validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedParams {
    pub address: String,
    pub trace_depth: u8,
    pub time_range: Option<TimeRange>,
    pub min_amount: u64,
    pub filter: FilterType,
}

fn start_of(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Last second of `date`. Built from the calendar fields, so dates at the
/// edge of chrono's range cannot overflow.
fn end_of(date: NaiveDate) -> Result<DateTime<Utc>> {
    date.and_hms_opt(23, 59, 59)
        .map(|end| end.and_utc())
        .ok_or_else(|| Error::InvalidRequest(format!("end date {} is out of range", date)))
}

fn demo_range() -> Option<TimeRange> {
    let start = NaiveDate::from_ymd_opt(DEMO_START.0, DEMO_START.1, DEMO_START.2)?;
    let end = NaiveDate::from_ymd_opt(DEMO_END.0, DEMO_END.1, DEMO_END.2)?;
    Some(TimeRange {
        start: start_of(start),
        end: end_of(end).ok()?,
    })
}

impl InvestigationParams {
    pub fn resolve(&self) -> Result<ResolvedParams> {
        if !(MIN_TRACE_DEPTH..=MAX_TRACE_DEPTH).contains(&self.trace_depth) {
            return Err(Error::InvalidRequest(format!(
                "trace depth must be between {} and {}",
                MIN_TRACE_DEPTH, MAX_TRACE_DEPTH
            )));
        }

        let address = self.address.trim();
        if address == DEMO_SENTINEL {
            return Ok(ResolvedParams {
                address: DEMO_ADDRESS.to_string(),
                trace_depth: self.trace_depth,
                time_range: demo_range(),
                min_amount: self.min_amount,
                filter: self.filter,
            });
        }

        if address.is_empty() {
            return Err(Error::InvalidRequest("address must not be empty".into()));
        }

        let time_range = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => {
                return Err(Error::InvalidRequest(format!(
                    "start date {} is after end date {}",
                    start, end
                )));
            }
            (Some(start), Some(end)) => Some(TimeRange {
                start: start_of(start),
                end: end_of(end)?,
            }),
            _ => None,
        };

        Ok(ResolvedParams {
            address: address.to_string(),
            trace_depth: self.trace_depth,
            time_range,
            min_amount: self.min_amount,
            filter: self.filter,
        })
    }
}

/// The two-bar comparison chart.
#[derive(Debug, Clone, Serialize)]
pub struct BarChart {
    pub labels: [&'static str; 2],
    pub values: [Decimal; 2],
}

impl From<&SupplementaryStats> for BarChart {
    fn from(stats: &SupplementaryStats) -> Self {
        BarChart {
            labels: ["Avg Sent", "Avg Received"],
            values: [stats.avg_sent, stats.avg_received],
        }
    }
}

/// Everything the dashboard renders for one run, in render order.
#[derive(Debug, Clone, Serialize)]
pub struct Investigation {
    /// Address as reported upstream, falling back to the requested one.
    pub address: String,
    /// Upstream's full transaction count; `transactions` may hold only a page.
    pub transaction_count: u64,
    pub trace_depth: u8,
    pub overview: Overview,
    pub stats: SupplementaryStats,
    pub chart: BarChart,
    pub graph: TransactionGraph,
    pub transactions: Vec<TransactionDetail>,
}

/// The CPU-bound part of a run: aggregates, graph and layout.
fn analyze(
    snapshot: WalletSnapshot,
    resolved: ResolvedParams,
    now: DateTime<Utc>,
    layout: &LayoutConfig,
) -> Result<Investigation> {
    let overview = aggregator::compute_overview(&snapshot, now)?;
    let stats = aggregator::compute_stats(&snapshot)?;
    let chart = BarChart::from(&stats);
    let graph = build_graph(
        &snapshot,
        resolved.filter,
        Some(resolved.min_amount),
        resolved.time_range,
        layout,
    );
    let transactions = transaction_details(&snapshot);

    info!(
        "Investigation of {} done: {} txs, {} graph nodes",
        resolved.address,
        snapshot.txs.len(),
        graph.node_count()
    );

    Ok(Investigation {
        transaction_count: snapshot.n_tx.unwrap_or(snapshot.txs.len() as u64),
        address: snapshot.address.unwrap_or(resolved.address),
        trace_depth: resolved.trace_depth,
        overview,
        stats,
        chart,
        graph,
        transactions,
    })
}

/// One full run: fetch, aggregate, build the graph. Stops at the first error.
///
/// Aggregation and layout run on the blocking pool so a large address does
/// not stall the async workers.
pub async fn run(
    client: &LedgerClient,
    params: &InvestigationParams,
    now: DateTime<Utc>,
    layout: &LayoutConfig,
) -> Result<Investigation> {
    let resolved = params.resolve()?;
    info!(
        "🔎 Investigating {} (filter {:?}, min {}, range {:?})",
        resolved.address, resolved.filter, resolved.min_amount, resolved.time_range
    );

    let snapshot = client.fetch(&resolved.address).await?;

    let layout = *layout;
    task::spawn_blocking(move || analyze(snapshot, resolved, now, &layout)).await?
}
