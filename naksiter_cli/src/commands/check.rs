//! URL check command

use crate::client::ApiClient;
use anyhow::Result;
use console::style;

/// Classify a URL and print the verdict
pub async fn run(client: &ApiClient, url: &str, detail: bool) -> Result<()> {
    let response = client.check(url, detail).await?;

    println!("{}", super::colorize(&response.result));
    println!("  {} {}", style("Reports:").dim(), response.report_count);

    if let Some(signals) = response.signals {
        println!();
        println!("  {:<12} {}", style("host").dim(), signals.host);
        println!("  {:<12} {}", style("score").dim(), signals.score);
        println!("  {:<12} {}", style("trusted").dim(), signals.trusted);
        println!("  {:<12} {}", style("lookalike").dim(), signals.lookalike);
        println!("  {:<12} {}", style("reachable").dim(), signals.reachable);
    }

    Ok(())
}
