//! # HTTP server wrapper around axum
//!
//! Routes are accumulated into a shared [`Router`] before [`Server::start`]
//! spawns the listener; Ctrl+C stops the server gracefully.

use crate::logs::{LogState, LoggingOptions, create_logs_router, init_logging};
use anyhow::{Result, anyhow};
use axum::handler::Handler;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use soapconfig::get_config;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::{signal, sync::RwLock, task::JoinHandle};
use tracing::{error, info};

/// Serializable server description
#[derive(Debug, Clone, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub bind_address: String,
    pub http_port: u16,
}

/// Main server
pub struct Server {
    name: String,
    bind_address: String,
    http_port: u16,
    router: Arc<RwLock<Router>>,
    join_handle: Option<JoinHandle<()>>,
    local_addr: Option<SocketAddr>,
    log_state: Option<LogState>,
}

impl Server {
    /// Creates a server
    ///
    /// # Arguments
    ///
    /// * `name` - Server name, used in logs
    /// * `bind_address` - Address to listen on (ex: "127.0.0.1")
    /// * `http_port` - HTTP port, 0 to let the system pick one
    pub fn new(name: impl Into<String>, bind_address: impl Into<String>, http_port: u16) -> Self {
        Self {
            name: name.into(),
            bind_address: bind_address.into(),
            http_port,
            router: Arc::new(RwLock::new(Router::new())),
            join_handle: None,
            local_addr: None,
            log_state: None,
        }
    }

    /// Creates a server from the `host` section of the configuration
    pub fn new_configured() -> Self {
        let config = get_config();
        Self::new(
            "SOAP-Dispatch-Server",
            config.get_bind_address(),
            config.get_http_port(),
        )
    }

    async fn mount(&self, path: &str, route: Router) {
        let mut r = self.router.write().await;
        *r = if path == "/" {
            std::mem::take(&mut *r).merge(route)
        } else {
            std::mem::take(&mut *r).nest(path, route)
        };
    }

    /// Adds a JSON GET route backed by an async closure
    pub async fn add_route<F, Fut, T>(&mut self, path: &str, f: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let f = Arc::new(f);
        let handler = move || {
            let f = f.clone();
            async move { Json(f().await) }
        };
        self.mount(path, Router::new().route("/", get(handler))).await;
    }

    /// Adds a POST handler with state
    pub async fn add_post_handler_with_state<H, T, S>(&mut self, path: &str, handler: H, state: S)
    where
        H: Handler<T, S> + Clone + 'static,
        T: 'static,
        S: Clone + Send + Sync + 'static,
    {
        let route = Router::new().route("/", post(handler)).with_state(state);
        self.mount(path, route).await;
    }

    /// Adds a sub-router
    ///
    /// - `"/"` merges it into the main router
    /// - any other path nests it under that path
    pub async fn add_router(&mut self, path: &str, sub_router: Router) {
        let normalized = if path == "/" {
            path.to_string()
        } else {
            format!("/{}", path.trim_start_matches('/'))
        };
        self.mount(&normalized, sub_router).await;
    }

    /// Snapshot of the routes registered so far
    pub async fn router(&self) -> Router {
        self.router.read().await.clone()
    }

    /// Binds the listener and serves in the background
    ///
    /// Binding errors are returned; once serving, a Ctrl+C stops the server.
    pub async fn start(&mut self) -> Result<()> {
        let addr = format!("{}:{}", self.bind_address, self.http_port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow!("Cannot bind {}: {}", addr, e))?;
        let local_addr = listener.local_addr()?;
        self.local_addr = Some(local_addr);

        info!("Server {} running at http://{}", self.name, local_addr);

        let router = self.router().await;
        let server_task = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router.into_make_service()).await {
                error!("HTTP server error: {}", e);
            }
        });

        let shutdown_task = tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => info!("Ctrl+C received, shutting down"),
                Err(e) => {
                    error!("Failed to listen for Ctrl+C: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        });

        self.join_handle = Some(tokio::spawn(async move {
            tokio::select! {
                _ = server_task => {},
                _ = shutdown_task => {},
            }
        }));
        Ok(())
    }

    /// Waits until the server stops
    pub async fn wait(&mut self) {
        if let Some(h) = self.join_handle.take() {
            let _ = h.await;
        }
    }

    /// Address actually bound, once started
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.local_addr
    }

    pub fn info(&self) -> ServerInfo {
        ServerInfo {
            name: self.name.clone(),
            bind_address: self.bind_address.clone(),
            http_port: self.local_addr.map(|a| a.port()).unwrap_or(self.http_port),
        }
    }

    /// Installs the tracing subscriber and registers `/log-dump` and `/log-setup`
    pub async fn init_logging(&mut self, options: LoggingOptions) -> Result<LogState> {
        let log_state = init_logging(options)?;
        self.add_log_routes(log_state.clone()).await;
        Ok(log_state)
    }

    /// Registers the log routes for an existing [`LogState`]
    pub async fn add_log_routes(&mut self, log_state: LogState) {
        self.add_router("/", create_logs_router(log_state.clone()))
            .await;
        self.log_state = Some(log_state);
    }

    pub fn log_state(&self) -> Option<&LogState> {
        self.log_state.as_ref()
    }
}

/// Builder pattern
pub struct ServerBuilder {
    name: String,
    bind_address: String,
    http_port: u16,
}

impl ServerBuilder {
    pub fn new(name: impl Into<String>, bind_address: impl Into<String>, http_port: u16) -> Self {
        Self {
            name: name.into(),
            bind_address: bind_address.into(),
            http_port,
        }
    }

    pub fn new_configured() -> Self {
        let config = get_config();
        Self {
            name: "SOAP-Dispatch-Server".to_string(),
            bind_address: config.get_bind_address(),
            http_port: config.get_http_port(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn http_port(mut self, port: u16) -> Self {
        self.http_port = port;
        self
    }

    pub fn build(self) -> Server {
        Server::new(self.name, self.bind_address, self.http_port)
    }
}
