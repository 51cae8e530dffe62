//! Report commands (report, logs)

use crate::client::ApiClient;
use anyhow::Result;
use console::style;

/// Submit an abuse report for a URL
pub async fn submit(client: &ApiClient, url: &str) -> Result<()> {
    let (status, response) = client.report(url).await?;

    if status.is_success() {
        println!("{}", style(&response.message).green());
    } else {
        tracing::debug!("Report rejected with {}", status);
        println!("{}", style(&response.message).yellow());
    }

    Ok(())
}

/// Show recent reports
pub async fn logs(client: &ApiClient) -> Result<()> {
    let response = client.logs().await?;

    if response.history.is_empty() {
        println!("No reports yet.");
        return Ok(());
    }

    println!("{:<20} {:<16} {:<50}", "TIME", "IP", "URL");
    println!("{}", "-".repeat(86));

    for entry in &response.history {
        println!(
            "{:<20} {:<16} {:<50}",
            entry.time,
            super::truncate(&entry.ip, 15),
            super::truncate(&entry.url, 50)
        );
    }

    Ok(())
}
