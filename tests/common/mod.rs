//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use requisition_relay::compose::EmailMessage;
use requisition_relay::config::AppConfig;
use requisition_relay::delivery::{Mailer, TransportError, WebhookClient};
use requisition_relay::{HttpServer, Shutdown};

/// Mailer that keeps every message it is asked to send.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Mailer whose relay always refuses the message.
pub struct RejectingMailer {
    pub reason: &'static str,
}

#[async_trait]
impl Mailer for RejectingMailer {
    async fn send(&self, _message: &EmailMessage) -> Result<(), TransportError> {
        Err(TransportError::Rejected(self.reason.to_string()))
    }
}

/// Read one HTTP/1.1 request (headers plus Content-Length body).
async fn read_request(socket: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];
    loop {
        let n = match socket.read(&mut buf).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        data.extend_from_slice(&buf[..n]);
        let text = String::from_utf8_lossy(&data).into_owned();
        if let Some(end) = text.find("\r\n\r\n") {
            let length = text[..end]
                .lines()
                .find_map(|l| {
                    let (k, v) = l.split_once(':')?;
                    if k.eq_ignore_ascii_case("content-length") {
                        v.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);
            if data.len() >= end + 4 + length {
                return text[end + 4..].to_string();
            }
        }
    }
    String::new()
}

/// Start a mock webhook endpoint answering every request with `status`.
///
/// Returns the endpoint URL and the bodies received so far.
pub async fn start_webhook_backend(status: u16) -> (String, Arc<Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let received = bodies.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let received = received.clone();
                    tokio::spawn(async move {
                        let body = read_request(&mut socket).await;
                        received.lock().unwrap().push(body);
                        let status_text = match status {
                            200 => "200 OK",
                            204 => "204 No Content",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            _ => "200 OK",
                        };
                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                            status_text
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (format!("http://{}/api/webhooks/1/token", addr), bodies)
}

/// Webhook client that ignores proxy settings from the environment.
pub fn webhook_client(url: Option<String>) -> WebhookClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    WebhookClient::with_client(http, url)
}

/// HTTP client for talking to the server under test.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// Run the server on an ephemeral port until `shutdown` triggers.
pub async fn spawn_server(
    mailer: Arc<dyn Mailer>,
    webhook: WebhookClient,
    shutdown: &Shutdown,
) -> SocketAddr {
    let server = HttpServer::new(AppConfig::default(), mailer, webhook);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    addr
}
