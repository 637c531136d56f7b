//! Unit tests for the REST gateway's response handling.

use crate::config::BoardConfig;
use crate::task::{
    adapters::http::HttpTaskGateway,
    ports::{GatewayError, TaskGateway},
};
use eyre::{bail, ensure};
use rstest::rstest;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves `response` verbatim to the first connection, then closes it.
async fn serve_once(response: &'static str) -> eyre::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let address = listener.local_addr()?;
    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };
        let mut request = [0_u8; 4096];
        if socket.read(&mut request).await.is_err() {
            return;
        }
        if socket.write_all(response.as_bytes()).await.is_ok() {
            let _flushed = socket.shutdown().await;
        }
    });
    Ok(format!("http://{address}"))
}

fn gateway_for(base_url: String) -> eyre::Result<HttpTaskGateway> {
    let config = BoardConfig {
        api_base_url: base_url,
        ..BoardConfig::default()
    };
    Ok(HttpTaskGateway::from_config(&config)?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_carries_the_response_body() -> eyre::Result<()> {
    let base_url = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 4\r\nConnection: close\r\n\r\nboom",
    )
    .await?;

    let result = gateway_for(base_url)?.list_tasks().await;

    let Err(GatewayError::Rejected { status, message }) = result else {
        bail!("expected a rejection, got {result:?}");
    };
    ensure!(status == 500, "status preserved");
    ensure!(message == "boom", "body used as message, got {message:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unreadable_rejection_body_is_reported() -> eyre::Result<()> {
    let base_url = serve_once(
        "HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial",
    )
    .await?;

    let result = gateway_for(base_url)?.list_tasks().await;

    let Err(GatewayError::Rejected { status, message }) = result else {
        bail!("expected a rejection, got {result:?}");
    };
    ensure!(status == 502, "status preserved");
    ensure!(
        message.starts_with("unreadable response body"),
        "read failure surfaced, got {message:?}"
    );
    Ok(())
}
