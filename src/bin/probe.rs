//! One-shot investigation from the command line.
//!
//! Usage: `probe <address> [Sent|Received]`

use blockdark::{aggregator, client::LedgerClient, config, graph, models::FilterType};
use chrono::Utc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(address) = args.next() else {
        anyhow::bail!("usage: probe <address> [Sent|Received]");
    };
    let filter = match args.next().as_deref() {
        Some("Sent") => FilterType::Sent,
        Some("Received") => FilterType::Received,
        _ => FilterType::All,
    };

    let cfg = config::load().map_err(|e| anyhow::anyhow!(e))?;
    let client = LedgerClient::new(cfg.api_url);
    println!("Fetching history for {} from {}...", address, client.base_url());

    let snapshot = client.fetch(&address).await?;
    println!("Fetched {} transactions", snapshot.txs.len());

    let overview = aggregator::compute_overview(&snapshot, Utc::now())?;
    let stats = aggregator::compute_stats(&snapshot)?;

    println!("Balance:           {} sat", overview.balance);
    println!("Total received:    {} sat", overview.total_received);
    println!("Total sent:        {} sat", overview.total_sent);
    println!("First transaction: {}", overview.first_transaction);
    println!("Last transaction:  {}", overview.last_transaction);
    println!("Received (24h):    {} sat", overview.last_24h_received);
    println!("Sent (24h):        {} sat", overview.last_24h_sent);
    println!("Avg fee:           {} sat", stats.avg_fee);
    println!("Avg sent:          {} sat", stats.avg_sent);
    println!("Avg received:      {} sat", stats.avg_received);

    let g = graph::build_graph(&snapshot, filter, None, None, &cfg.layout);
    println!("Graph ({:?}): {} nodes, {} edges", filter, g.node_count(), g.edge_count());
    for edge in g.edges().iter().take(5) {
        println!("  {} -> {} | {} sat | {}", edge.source, edge.target, edge.value, edge.timestamp);
    }

    Ok(())
}
