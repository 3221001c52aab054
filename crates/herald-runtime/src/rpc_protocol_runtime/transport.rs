use anyhow::{Context, Result};
use herald_core::ProviderFactory;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use super::{RpcDispatcher, RpcResponseFrame, RpcServeReport};

/// Serves NDJSON request frames from `reader`, streaming one response line
/// per request to `writer`.
///
/// Returns on end of input, or right after answering a request line that
/// failed to decode. Whitespace-only lines are skipped.
pub async fn serve_rpc_ndjson<F, R, W>(
    dispatcher: &mut RpcDispatcher<F>,
    mut reader: R,
    writer: &mut W,
) -> Result<RpcServeReport>
where
    F: ProviderFactory,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = Vec::new();
    let mut report = RpcServeReport::default();

    loop {
        line.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut line)
            .await
            .context("failed to read rpc request line")?;
        if bytes_read == 0 {
            break;
        }
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        report.processed_frames = report.processed_frames.saturating_add(1);

        let (response, fatal) = match dispatcher.dispatch_raw(&line).await {
            Ok(result) => (RpcResponseFrame::success(result), false),
            Err(error) => {
                warn!(error = %error, fatal = error.is_fatal(), "rpc request failed");
                report.error_count = report.error_count.saturating_add(1);
                (RpcResponseFrame::failure(error.to_string()), error.is_fatal())
            }
        };
        write_rpc_response_frame(writer, &response).await?;
        if fatal {
            report.terminated_on_decode_error = true;
            break;
        }
    }

    info!(
        processed_frames = report.processed_frames,
        error_count = report.error_count,
        terminated_on_decode_error = report.terminated_on_decode_error,
        "rpc serve session finished"
    );
    Ok(report)
}

/// Writes one response frame followed by a newline and flushes it.
pub async fn write_rpc_response_frame<W>(writer: &mut W, response: &RpcResponseFrame) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut encoded =
        serde_json::to_vec(response).context("failed to serialize rpc response frame")?;
    encoded.push(b'\n');
    writer
        .write_all(&encoded)
        .await
        .context("failed to write rpc response frame")?;
    writer
        .flush()
        .await
        .context("failed to flush rpc response frame")
}
