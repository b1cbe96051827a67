//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, body limit, optional timeout)
//! - Build the delivery channels from configuration
//! - Serve until the shutdown channel fires

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::compose::Composer;
use crate::config::AppConfig;
use crate::delivery::{DeliveryError, Dispatcher, Mailer, SmtpMailer, TransportError, WebhookClient};
use crate::http::handlers::{get_catalog, get_status, submit_requisition};
use crate::http::request::make_request_span;

pub const SUBMISSION_PATH: &str = "/api/solicitacao";
pub const CATALOG_PATH: &str = "/api/catalog";
pub const HEALTH_PATH: &str = "/health";

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub composer: Arc<Composer>,
    pub dispatcher: Dispatcher,
}

/// Errors while building the server's delivery channels.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Mail transport setup failed: {0}")]
    Mail(#[from] TransportError),

    #[error("Webhook client setup failed: {0}")]
    Webhook(#[from] DeliveryError),
}

/// HTTP server for requisition intake.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server with SMTP and webhook channels taken from config.
    pub fn from_config(config: AppConfig) -> Result<Self, StartupError> {
        let mailer = SmtpMailer::from_config(&config.mail)?;
        let webhook = WebhookClient::new(&config.webhook)?;
        if !webhook.is_enabled() {
            tracing::info!("No webhook configured, chat notifications disabled");
        }
        Ok(Self::new(config, Arc::new(mailer), webhook))
    }

    /// Create a server around explicit delivery channels.
    pub fn new(config: AppConfig, mailer: Arc<dyn Mailer>, webhook: WebhookClient) -> Self {
        let state = AppState {
            composer: Arc::new(Composer::new(&config.mail, &config.composer)),
            dispatcher: Dispatcher::new(mailer, webhook),
        };

        let router = Self::build_router(&config, state);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let router = Router::new()
            .route(SUBMISSION_PATH, any(submit_requisition))
            .route(CATALOG_PATH, get(get_catalog))
            .route(HEALTH_PATH, get(get_status))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.limits.max_body_bytes));

        let router = match config.timeouts.request_secs {
            Some(secs) => router.layer(TimeoutLayer::new(Duration::from_secs(secs))),
            None => router,
        };

        router
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::EmailMessage;
    use crate::http::response::{ApiMessage, SUBMITTED_MESSAGE};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use std::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "XREQBOUNDARY";

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<EmailMessage>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn server(mailer: Arc<RecordingMailer>) -> HttpServer {
        let webhook = WebhookClient::new(&Default::default()).unwrap();
        HttpServer::new(AppConfig::default(), mailer, webhook)
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn post(fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(SUBMISSION_PATH)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields)))
            .unwrap()
    }

    async fn message(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice::<ApiMessage>(&bytes).unwrap().message
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let mailer = Arc::new(RecordingMailer::default());
        let response = server(mailer.clone())
            .router()
            .oneshot(Request::get(SUBMISSION_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "POST");
        assert_eq!(message(response).await, "Método GET não permitido");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_sends_email() {
        let mailer = Arc::new(RecordingMailer::default());
        let response = server(mailer.clone())
            .router()
            .oneshot(post(&[
                ("nome", "Ana"),
                ("setor", "TI"),
                ("item_padrao_RIBBON", "2"),
                ("item_personalizado_count", "0"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(message(response).await, SUBMITTED_MESSAGE);

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Nova Requisição de Almoxarifado - Setor: TI");
        assert!(sent[0].html_body.contains("<tr><td>RIBBON</td><td>2</td></tr>"));
        assert!(!sent[0].html_body.contains("Itens Personalizados"));
    }

    #[tokio::test]
    async fn test_missing_name_is_server_error() {
        let mailer = Arc::new(RecordingMailer::default());
        let response = server(mailer.clone())
            .router()
            .oneshot(post(&[("setor", "TI")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message(response).await, "Missing required field: nome");
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_multipart_post_is_server_error() {
        let mailer = Arc::new(RecordingMailer::default());
        let response = server(mailer)
            .router()
            .oneshot(
                Request::post(SUBMISSION_PATH)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_health_reports_webhook_disabled() {
        let response = server(Arc::new(RecordingMailer::default()))
            .router()
            .oneshot(Request::get(HEALTH_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "operational");
        assert_eq!(json["webhook_enabled"], false);
    }

    #[tokio::test]
    async fn test_catalog_lists_categories() {
        let response = server(Arc::new(RecordingMailer::default()))
            .router()
            .oneshot(Request::get(CATALOG_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 4);
        assert_eq!(json[0]["name"], "Etiquetas e Ribbons");
        assert_eq!(json[0]["items"][2], "RIBBON");
    }
}
