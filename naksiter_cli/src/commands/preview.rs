//! Page preview command

use crate::client::ApiClient;
use anyhow::Result;
use naksiter_common::constants;

/// Print the server's summary of a page
pub async fn run(client: &ApiClient, url: &str) -> Result<()> {
    let response = client.preview(url).await?;

    if response.result.starts_with(constants::ERROR_PREFIX) {
        println!("{}", super::colorize(&response.result));
    } else {
        println!("{}", response.result);
    }

    Ok(())
}
