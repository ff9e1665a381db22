//! Stub peers and helpers shared by the integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use tika_proxy::config::GatewayConfig;
use tika_proxy::http::GatewayServer;
use tika_proxy::lifecycle::Shutdown;

/// A stub extraction service.
pub struct Downstream {
    pub addr: SocketAddr,
    /// Connections accepted so far.
    pub accepted: Arc<AtomicUsize>,
    /// Everything each connection sent before half-closing.
    pub received: mpsc::UnboundedReceiver<Vec<u8>>,
}

impl Downstream {
    pub fn accepted(&self) -> usize {
        self.accepted.load(Ordering::SeqCst)
    }

    pub async fn next_upload(&mut self) -> Vec<u8> {
        tokio::time::timeout(Duration::from_secs(5), self.received.recv())
            .await
            .expect("downstream saw no upload")
            .expect("downstream task ended")
    }
}

/// Serve `body` at `/doc.pdf`.
pub async fn start_upstream(body: &'static [u8]) -> SocketAddr {
    start_counting_upstream(body).await.0
}

/// Serve `body` at `/doc.pdf` and count the requests it receives.
pub async fn start_counting_upstream(body: &'static [u8]) -> (SocketAddr, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(AtomicUsize::new(0));

    let counter = requests.clone();
    let router = Router::new().route(
        "/doc.pdf",
        get(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async move { body }
        }),
    );

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, requests)
}

/// Announce a 100-byte document, send three bytes of it, then hang up.
pub async fn start_truncated_upstream() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut head = Vec::new();
                let mut buf = [0u8; 1024];
                while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => head.extend_from_slice(&buf[..n]),
                    }
                }
                let _ = socket
                    .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\nABC")
                    .await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

#[derive(Debug, Clone, Copy)]
enum Reply {
    /// Answer `<upload>-processed`, then close.
    Processed,
    /// Send the prefix, then hold the connection open without closing.
    Silent(&'static [u8]),
}

/// Read each upload until EOF, then answer `<upload>-processed` and close.
pub async fn start_downstream() -> Downstream {
    start_downstream_with(Reply::Processed).await
}

/// Read each upload until EOF, then send `prefix` and never close.
pub async fn start_silent_downstream(prefix: &'static [u8]) -> Downstream {
    start_downstream_with(Reply::Silent(prefix)).await
}

async fn start_downstream_with(reply: Reply) -> Downstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let accepted = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::unbounded_channel();

    let counter = accepted.clone();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            let tx = tx.clone();
            tokio::spawn(async move {
                let mut upload = Vec::new();
                if socket.read_to_end(&mut upload).await.is_err() {
                    return;
                }
                let _ = tx.send(upload.clone());

                match reply {
                    Reply::Processed => {
                        upload.extend_from_slice(b"-processed");
                        let _ = socket.write_all(&upload).await;
                        let _ = socket.shutdown().await;
                    }
                    Reply::Silent(prefix) => {
                        let _ = socket.write_all(prefix).await;
                        let _ = socket.flush().await;
                        tokio::time::sleep(Duration::from_secs(300)).await;
                    }
                }
            });
        }
    });

    Downstream {
        addr,
        accepted,
        received: rx,
    }
}

/// An address with nothing listening on it.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Gateway config pointing at `downstream` with fast retries.
pub fn test_config(downstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_host = "127.0.0.1".into();
    config.listener.port = 0;
    config.downstream.address = downstream.ip().to_string();
    config.downstream.port = downstream.port();
    config.retries.max_attempts = 3;
    config.retries.interval_ms = 10;
    config
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = GatewayServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
