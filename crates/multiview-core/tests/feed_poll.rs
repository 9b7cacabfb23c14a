//! Exercises the channel feed against a loopback HTTP server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tokio::sync::mpsc;

use multiview_core::channel::ChannelDescriptor;
use multiview_core::feed::{ChannelFeed, FeedEvent};

#[derive(Clone)]
struct ServerState {
    hits: Arc<AtomicUsize>,
    /// Number of initial requests answered with a 500.
    fail_first: usize,
}

fn sample_channels() -> Vec<ChannelDescriptor> {
    vec![
        ChannelDescriptor {
            site: "ttv".to_string(),
            channel: "alpha".to_string(),
            name: "Alpha".to_string(),
            icon: "alpha.png".to_string(),
        },
        ChannelDescriptor {
            site: "ust".to_string(),
            channel: "beta".to_string(),
            name: "Beta".to_string(),
            icon: String::new(),
        },
    ]
}

async fn channels(State(state): State<ServerState>) -> impl IntoResponse {
    let hit = state.hits.fetch_add(1, Ordering::SeqCst);
    if hit < state.fail_first {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(sample_channels()).into_response()
}

async fn start_server(fail_first: usize) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = ServerState {
        hits: hits.clone(),
        fail_first,
    };
    let app = Router::new()
        .route("/channels", get(channels))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind loopback listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}/channels", addr), hits)
}

async fn next_event(rx: &mut mpsc::Receiver<FeedEvent>) -> FeedEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for feed event")
        .expect("feed channel closed")
}

#[tokio::test]
async fn poll_delivers_channels_and_stops_cleanly() {
    let (url, _hits) = start_server(0).await;
    let (tx, mut rx) = mpsc::channel(16);

    let handle = ChannelFeed::spawn(
        reqwest::Client::new(),
        url,
        Duration::from_millis(50),
        tx,
    );

    match next_event(&mut rx).await {
        FeedEvent::Channels(channels) => {
            assert_eq!(channels, sample_channels());
        }
        FeedEvent::Error(e) => panic!("unexpected feed error: {e}"),
    }

    assert!(!handle.is_finished());
    tokio::time::timeout(Duration::from_secs(5), handle.stop())
        .await
        .expect("stop() did not terminate the poll task");

    // the sender side is owned by the task; once stopped the channel drains
    while let Ok(Some(_)) = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await {}
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn poll_surfaces_errors_and_keeps_its_cadence() {
    let (url, hits) = start_server(1).await;
    let (tx, mut rx) = mpsc::channel(16);

    let handle = ChannelFeed::spawn(
        reqwest::Client::new(),
        url,
        Duration::from_millis(50),
        tx,
    );

    match next_event(&mut rx).await {
        FeedEvent::Error(e) => assert!(e.contains("500"), "error should carry the status: {e}"),
        FeedEvent::Channels(_) => panic!("first poll should have failed"),
    }

    // the failure must not stop the loop: the next tick succeeds
    match next_event(&mut rx).await {
        FeedEvent::Channels(channels) => assert_eq!(channels.len(), 2),
        FeedEvent::Error(e) => panic!("second poll should have succeeded: {e}"),
    }

    assert!(hits.load(Ordering::SeqCst) >= 2);
    handle.stop().await;
}
