//! HTTP surface for htransform
//!
//! Hosts the header rules as axum middleware in front of a small echo
//! service, which reflects each transformed request back to the caller.

mod echo;
mod health;
mod transform;

use std::net::SocketAddr;

use axum::Router;
use htransform_config::Config;
use tower_http::trace::TraceLayer;

pub use echo::Echo;
pub use transform::{HeaderTransform, header_transform_middleware};

/// Assembled server with routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any header rule is rejected
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let dispatcher = config.dispatcher()?;
        tracing::info!(rules = dispatcher.len(), "header rules loaded");

        let transform = HeaderTransform::new(dispatcher);

        let mut app = Router::new()
            .route("/health", axum::routing::get(health::health_handler))
            .fallback(echo::echo_handler);

        app = transform.layer_onto(app);
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address: config.server.listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use htransform_core::{Dispatcher, RawRule};
    use tower::ServiceExt;

    use super::*;

    fn router(rules: &[RawRule]) -> Router {
        let transform = HeaderTransform::new(Dispatcher::build(rules).unwrap());
        transform.layer_onto(Router::new().fallback(echo::echo_handler))
    }

    async fn echo(router: Router, request: Request<Body>) -> serde_json::Value {
        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn request_rules_run_before_the_handler() {
        let router = router(&[RawRule::rename("^X-Old$", "X-New")]);
        let request = Request::get("/items").header("X-Old", "1").body(Body::empty()).unwrap();

        let echo = echo(router, request).await;

        assert_eq!(echo["headers"]["x-new"], serde_json::json!(["1"]));
        assert!(echo["headers"].get("x-old").is_none());
    }

    #[tokio::test]
    async fn response_rules_run_after_the_handler() {
        let router = router(&[
            RawRule::set("X-Served-By", "htransform").on_response(),
            RawRule::delete("content-type").named("content-type").on_response(),
        ]);
        let request = Request::get("/").body(Body::empty()).unwrap();

        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.headers()["x-served-by"], "htransform");
        assert!(response.headers().get("content-type").is_none());
    }

    #[tokio::test]
    async fn server_wires_health_route() {
        let config = Config::default();
        let router = Server::new(&config).unwrap().into_router();

        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
