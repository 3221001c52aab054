//! Slack messaging plugin process: serves `messaging.send` requests read
//! from stdin and answers on stdout, one JSON frame per line.

mod bootstrap_helpers;

use anyhow::Result;
use herald_runtime::{serve_rpc_ndjson, RpcDispatcher};
use herald_slack::SlackProviderFactory;
use tokio::io::BufReader;

use crate::bootstrap_helpers::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let mut dispatcher = RpcDispatcher::new(SlackProviderFactory);
    let mut stdout = tokio::io::stdout();
    serve_rpc_ndjson(
        &mut dispatcher,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
    )
    .await?;
    Ok(())
}
