use std::time::Duration;

use market::{FeedEndpoints, FeedError, HealthProbe, HttpFeedClient, TickerFeed};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// One-shot HTTP server. Answers the first request with `status` + `body`
/// and hands back the raw request head.
async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).await.expect("read");
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.expect("write");
        stream.shutdown().await.ok();

        String::from_utf8_lossy(&head).into_owned()
    });

    (base_url, handle)
}

fn client_for(base_url: String, timeout: Duration) -> HttpFeedClient {
    HttpFeedClient::new(
        FeedEndpoints {
            base_url,
            ..FeedEndpoints::default()
        },
        timeout,
    )
    .expect("client")
}

#[tokio::test]
async fn fetch_requests_popular_subset_and_parses_array() -> anyhow::Result<()> {
    let body = json!([
        { "exchange": "coinone", "symbol": "BTC/KRW", "price": 50000000, "changePercent": 1.23 },
        { "exchange": "binance", "symbol": "BTCUSDT", "price": 43000.5 }
    ])
    .to_string();
    let (base, server) = serve_once("200 OK", body).await;

    let snapshot = client_for(base, Duration::from_secs(2)).fetch_snapshot().await?;

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].symbol, "BTC/KRW");
    assert_eq!(snapshot[1].price, Some(43000.5));

    let head = server.await?;
    assert!(
        head.starts_with("GET /api/ticker?popular=true HTTP/1.1"),
        "unexpected request head: {head}"
    );
    Ok(())
}

#[tokio::test]
async fn non_2xx_ticker_response_is_protocol_error() {
    let (base, _server) = serve_once("500 Internal Server Error", "{}".into()).await;

    let err = client_for(base, Duration::from_secs(2))
        .fetch_snapshot()
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Protocol { status: 500 }));
    assert_eq!(err.kind(), "protocol");
}

#[tokio::test]
async fn object_body_is_not_a_sequence() {
    let (base, _server) = serve_once("200 OK", r#"{"error":"nope"}"#.into()).await;

    let err = client_for(base, Duration::from_secs(2))
        .fetch_snapshot()
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::NotASequence("object")));
}

#[tokio::test]
async fn html_body_is_malformed() {
    let (base, _server) = serve_once("200 OK", "<html></html>".into()).await;

    let err = client_for(base, Duration::from_secs(2))
        .fetch_snapshot()
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Malformed(_)));
}

#[tokio::test]
async fn health_probe_accepts_2xx() -> anyhow::Result<()> {
    let (base, server) = serve_once("200 OK", r#"{"status":"UP"}"#.into()).await;

    client_for(base, Duration::from_secs(2)).probe().await?;

    let head = server.await?;
    assert!(head.starts_with("GET /actuator/health HTTP/1.1"));
    Ok(())
}

#[tokio::test]
async fn health_probe_rejects_error_status() {
    let (base, _server) = serve_once("503 Service Unavailable", "{}".into()).await;

    let err = client_for(base, Duration::from_secs(2)).probe().await.unwrap_err();

    assert!(matches!(err, FeedError::Protocol { status: 503 }));
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client_for(base, Duration::from_secs(2)).probe().await.unwrap_err();

    assert!(matches!(err, FeedError::Transport(_)));
}

#[tokio::test]
async fn silent_server_times_out_as_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    // Accept and hold the connection without answering.
    let _hold = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        drop(stream);
    });

    let err = client_for(base, Duration::from_millis(200))
        .fetch_snapshot()
        .await
        .unwrap_err();

    assert!(matches!(err, FeedError::Transport(_)));
    assert_eq!(err.kind(), "transport");
}
