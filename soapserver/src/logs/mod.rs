//! In-memory log capture with a runtime-adjustable level.
//!
//! [`init_logging`] installs the global subscriber: a reloadable level
//! filter, the [`CaptureLayer`] feeding a [`LogState`] ring buffer, and an
//! optional console layer. The buffer is served as JSON by [`log_dump`].

mod capture;

pub use capture::CaptureLayer;

use std::{
    collections::VecDeque,
    sync::{Arc, RwLock},
    time::SystemTime,
};

use anyhow::{Result, anyhow};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{
    Registry, filter::LevelFilter, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

const LEVELS: [&str; 5] = ["ERROR", "WARN", "INFO", "DEBUG", "TRACE"];

/// A captured log event
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub timestamp: SystemTime,
    pub level: String,
    pub target: String,
    pub message: String,
}

/// Shared ring buffer of the most recent events
#[derive(Clone)]
pub struct LogState {
    buffer: Arc<RwLock<VecDeque<LogEntry>>>,
    capacity: usize,
    max_level: Arc<RwLock<Level>>,
    reload_handle: Option<reload::Handle<LevelFilter, Registry>>,
}

impl LogState {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
            max_level: Arc::new(RwLock::new(Level::TRACE)),
            reload_handle: None,
        }
    }

    /// Attaches the handle used by [`LogState::set_max_level`] to change
    /// the level of the installed filter
    pub fn with_reload_handle(mut self, handle: reload::Handle<LevelFilter, Registry>) -> Self {
        self.reload_handle = Some(handle);
        self
    }

    pub fn set_max_level(&self, level: Level) -> Result<()> {
        if let Some(handle) = &self.reload_handle {
            handle
                .reload(LevelFilter::from_level(level))
                .map_err(|e| anyhow!("Failed to reload log level filter: {}", e))?;
        }
        *self
            .max_level
            .write()
            .map_err(|_| anyhow!("Log level lock poisoned"))? = level;
        Ok(())
    }

    pub fn get_max_level(&self) -> Level {
        self.max_level
            .read()
            .map(|level| *level)
            .unwrap_or(Level::TRACE)
    }

    fn push(&self, entry: LogEntry) {
        // A poisoned buffer only loses log lines.
        if let Ok(mut buf) = self.buffer.write() {
            while buf.len() >= self.capacity {
                buf.pop_front();
            }
            buf.push_back(entry);
        }
    }

    pub fn dump(&self) -> Vec<LogEntry> {
        self.buffer
            .read()
            .map(|buf| buf.iter().cloned().collect())
            .unwrap_or_default()
    }
}

/// Logging initialisation options
#[derive(Debug, Clone)]
pub struct LoggingOptions {
    /// Number of entries kept in the ring buffer
    pub buffer_capacity: usize,
    /// Also write events to stderr
    pub enable_console: bool,
    pub min_level: Level,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            buffer_capacity: 1000,
            enable_console: true,
            min_level: Level::INFO,
        }
    }
}

impl LoggingOptions {
    /// Options read from the `logger` section of the configuration
    pub fn from_config() -> Self {
        let config = soapconfig::get_config();
        let defaults = Self::default();

        let min_level = config
            .get_log_min_level()
            .ok()
            .and_then(|l| string_to_level(&l))
            .unwrap_or(defaults.min_level);

        Self {
            buffer_capacity: config
                .get_log_cache_size()
                .unwrap_or(defaults.buffer_capacity),
            enable_console: config
                .get_log_enable_console()
                .unwrap_or(defaults.enable_console),
            min_level,
        }
    }
}

/// Installs the global tracing subscriber
///
/// Fails if a global subscriber is already set.
///
/// # Exemple
/// ```rust,no_run
/// use soapserver::logs::{init_logging, LoggingOptions};
///
/// let log_state = init_logging(LoggingOptions::default())?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logging(options: LoggingOptions) -> Result<LogState> {
    let (filter, reload_handle) = reload::Layer::new(LevelFilter::from_level(options.min_level));

    let log_state = LogState::new(options.buffer_capacity).with_reload_handle(reload_handle);
    *log_state
        .max_level
        .write()
        .map_err(|_| anyhow!("Log level lock poisoned"))? = options.min_level;

    // The filter must come first so that it applies to every layer after it.
    let subscriber = Registry::default()
        .with(filter)
        .with(CaptureLayer::new(log_state.clone()));

    let result = if options.enable_console {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(true),
            )
            .try_init()
    } else {
        subscriber.try_init()
    };
    result.map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    Ok(log_state)
}

/// `GET /log-dump`: the buffer content as JSON
pub async fn log_dump(State(state): State<LogState>) -> impl IntoResponse {
    Json(state.dump())
}

#[derive(Debug, Deserialize)]
pub struct LogSetupRequest {
    pub level: String,
}

#[derive(Debug, Serialize)]
pub struct LogSetupResponse {
    pub current_level: String,
    pub available_levels: Vec<String>,
}

impl LogSetupResponse {
    fn new(level: Level) -> Self {
        Self {
            current_level: level_to_string(level),
            available_levels: LEVELS.iter().map(|l| l.to_string()).collect(),
        }
    }
}

/// `GET /log-setup`: current level
pub async fn log_setup_get(State(state): State<LogState>) -> impl IntoResponse {
    Json(LogSetupResponse::new(state.get_max_level()))
}

/// `POST /log-setup`: changes the level at runtime
pub async fn log_setup_post(
    State(state): State<LogState>,
    Json(payload): Json<LogSetupRequest>,
) -> impl IntoResponse {
    let Some(level) = string_to_level(&payload.level) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": format!("Invalid log level. Must be one of: {}", LEVELS.join(", "))
            })),
        )
            .into_response();
    };

    if let Err(e) = state.set_max_level(level) {
        tracing::error!("{}", e);
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response();
    }
    tracing::info!("Log level changed to: {}", level_to_string(level));

    (StatusCode::OK, Json(LogSetupResponse::new(level))).into_response()
}

/// Router serving `/log-dump` and `/log-setup`
pub fn create_logs_router(log_state: LogState) -> axum::Router {
    use axum::routing::get;
    axum::Router::new()
        .route("/log-dump", get(log_dump))
        .route("/log-setup", get(log_setup_get).post(log_setup_post))
        .with_state(log_state)
}

pub fn string_to_level(s: &str) -> Option<Level> {
    match s.trim().to_uppercase().as_str() {
        "ERROR" => Some(Level::ERROR),
        "WARN" => Some(Level::WARN),
        "INFO" => Some(Level::INFO),
        "DEBUG" => Some(Level::DEBUG),
        "TRACE" => Some(Level::TRACE),
        _ => None,
    }
}

fn level_to_string(level: Level) -> String {
    level.as_str().to_string()
}
