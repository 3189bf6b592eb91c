use std::sync::Arc;

use axum::Router;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use htransform_core::Dispatcher;

/// Header rules attached to a router
///
/// Cheap to clone; every clone shares the same dispatcher.
#[derive(Debug, Clone)]
pub struct HeaderTransform {
    dispatcher: Arc<Dispatcher>,
}

impl HeaderTransform {
    #[must_use]
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Wrap every route of `router` with the header rules
    #[must_use]
    pub fn layer_onto<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let dispatcher = Arc::clone(&self.dispatcher);
        router.layer(axum::middleware::from_fn(move |req, next| {
            let dispatcher = Arc::clone(&dispatcher);
            async move { header_transform_middleware(dispatcher, req, next).await }
        }))
    }
}

/// Header transformation middleware
///
/// Runs request-phase rules before the inner service sees the request and
/// response-phase rules on whatever it returns.
pub async fn header_transform_middleware(dispatcher: Arc<Dispatcher>, mut request: Request, next: Next) -> Response {
    let applied = dispatcher.apply_to_request(&mut request);
    if !applied.is_noop() {
        tracing::debug!(
            rules = applied.rules,
            changed = applied.changed,
            "request headers transformed"
        );
    }

    let mut response = next.run(request).await;

    let applied = dispatcher.apply_to_response(&mut response);
    if !applied.is_noop() {
        tracing::debug!(
            rules = applied.rules,
            changed = applied.changed,
            "response headers transformed"
        );
    }

    response
}
