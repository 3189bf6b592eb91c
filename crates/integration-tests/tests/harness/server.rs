//! htransform running on an ephemeral port for the duration of a test

use htransform_config::Config;
use htransform_server::Server;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

pub struct TestServer {
    base_url: String,
    client: reqwest::Client,
    shutdown: CancellationToken,
}

impl TestServer {
    /// Build the router from `config` and serve it on `127.0.0.1:0`
    ///
    /// Fails the same way the binary would when a rule is rejected.
    pub async fn start(config: &Config) -> anyhow::Result<Self> {
        let router = Server::new(config)?.into_router();
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let base_url = format!("http://{}", listener.local_addr()?);

        let shutdown = CancellationToken::new();
        let stopped = shutdown.clone().cancelled_owned();
        tokio::spawn(async move {
            axum::serve(listener, router).with_graceful_shutdown(stopped).await.ok();
        });

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            shutdown,
        })
    }

    /// GET request for `path`, ready for extra headers
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client.get(format!("{}{path}", self.base_url))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
