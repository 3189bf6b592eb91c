use std::collections::BTreeMap;

use axum::Json;
use axum::extract::Request;
use serde::Serialize;

/// What the echo endpoint saw after request rules ran
#[derive(Debug, Serialize)]
pub struct Echo {
    pub method: String,
    pub uri: String,
    /// Host from the request target, if it carries one
    pub host: Option<String>,
    /// Header values keyed by lowercase name, in arrival order per name
    pub headers: BTreeMap<String, Vec<String>>,
}

/// Reflect the (already transformed) request back as JSON
pub async fn echo_handler(request: Request) -> Json<Echo> {
    let mut headers: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (name, value) in request.headers() {
        headers
            .entry(name.as_str().to_owned())
            .or_default()
            .push(String::from_utf8_lossy(value.as_bytes()).into_owned());
    }

    Json(Echo {
        method: request.method().to_string(),
        uri: request.uri().to_string(),
        host: request.uri().host().map(str::to_owned),
        headers,
    })
}
