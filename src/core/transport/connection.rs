//! Line-delimited JSON-RPC connection loop.
//!
//! One message per line in, one response per line out. Messages are handled
//! strictly in arrival order: the next line is not read until the previous
//! response has been written and flushed.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use super::TransportResult;
use super::message::JsonRpcResponse;
use crate::core::McpServer;

/// Serve a single connection until the reader reaches end of input.
///
/// Malformed input, including bytes that are not UTF-8, is answered with a
/// parse error and the loop keeps reading. Only I/O failures end it early.
pub async fn serve_connection<R, W>(server: &McpServer, reader: R, mut writer: W) -> TransportResult<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let response = match std::str::from_utf8(&buf) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                debug!("<- {}", line);
                server.handle_line(line).await
            }
            Err(e) => {
                warn!("Discarding message that is not valid UTF-8: {}", e);
                Some(JsonRpcResponse::parse_error(e))
            }
        };

        let Some(response) = response else {
            continue;
        };

        let mut out = serde_json::to_string(&response)?;
        debug!("-> {}", out);
        out.push('\n');

        writer.write_all(out.as_bytes()).await?;
        writer.flush().await?;
    }

    info!("Input closed, connection finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::domains::search::testing::StubSearchClient;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;

    fn server(client: StubSearchClient) -> McpServer {
        McpServer::with_search_client(Config::default(), Arc::new(client))
    }

    fn responses(output: &[u8]) -> Vec<Value> {
        std::str::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_ping_and_notification() {
        let reader = tokio_test::io::Builder::new()
            .read(b"{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n")
            .read(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n")
            .build();
        let writer = tokio_test::io::Builder::new()
            .write(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"result\":{}}\n")
            .build();

        serve_connection(&server(StubSearchClient::echo()), reader, writer)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let input = b"\n   \n{\"jsonrpc\":\"2.0\",\"id\":\"a\",\"method\":\"ping\"}\n\n";
        let mut output = Vec::new();

        serve_connection(&server(StubSearchClient::echo()), &input[..], &mut output)
            .await
            .unwrap();

        let responses = responses(&output);
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], "a");
    }

    #[tokio::test]
    async fn test_parse_error_keeps_connection_open() {
        let input = b"garbage\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve_connection(&server(StubSearchClient::echo()), &input[..], &mut output)
            .await
            .unwrap();

        let responses = responses(&output);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["id"], 2);
    }

    #[tokio::test]
    async fn test_invalid_utf8_keeps_connection_open() {
        let input = b"\xff\xfe garbage\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        serve_connection(&server(StubSearchClient::echo()), &input[..], &mut output)
            .await
            .unwrap();

        let responses = responses(&output);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], Value::Null);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["id"], 2);
        assert_eq!(responses[1]["result"], json!({}));
    }

    #[tokio::test]
    async fn test_last_line_without_newline_is_served() {
        let input = b"{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}";
        let mut output = Vec::new();

        serve_connection(&server(StubSearchClient::echo()), &input[..], &mut output)
            .await
            .unwrap();

        assert_eq!(responses(&output)[0]["id"], 3);
    }

    #[tokio::test]
    async fn test_calls_are_answered_in_arrival_order() {
        let client = Arc::new(
            StubSearchClient::echo().with_delay("slow", Duration::from_millis(50)),
        );
        let server = McpServer::with_search_client(Config::default(), client.clone());

        let input = [
            json!({ "jsonrpc": "2.0", "id": 1, "method": "tools/call",
                    "params": { "name": "search", "arguments": { "query": "slow" } } }),
            json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/call",
                    "params": { "name": "search", "arguments": { "query": "fast" } } }),
        ]
        .iter()
        .map(|v| format!("{v}\n"))
        .collect::<String>();
        let mut output = Vec::new();

        serve_connection(&server, input.as_bytes(), &mut output)
            .await
            .unwrap();

        let responses = responses(&output);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["id"], 2);

        let queries: Vec<String> = client.calls().into_iter().map(|q| q.query).collect();
        assert_eq!(queries, vec!["slow", "fast"]);
    }
}
