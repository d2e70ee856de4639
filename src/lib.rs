//! # PipelineIQ
//!
//! Client library for the PipelineIQ revenue attribution dashboard:
//! campaign, funnel and revenue data from the backend API, with sample
//! data served in its place whenever the backend cannot be reached.
//!
//! ## Features
//!
//! - **Resilient client**: one attempt per call, bounded wait, fallback payload on any failure
//! - **Typed schemas**: one request, response and fallback type per endpoint
//! - **Degraded-mode signal**: every call returns [`Fetched`], live or fallback
//! - **Session store**: persisted token with an offline-mode marker
//! - **Metric formatting**: currency, compact numbers, ROAS and CAC
//!
//! ## Modules
//!
//! - [`client`]: endpoint registry and the resilient client
//! - [`fallback`]: sample payloads served when the backend is down
//! - [`models`]: request/response schemas
//! - [`session`]: session token store
//! - [`auth`]: login flows and route guard
//! - [`metrics`]: formatting and derived ratios
//! - [`dashboard`]: display rows for dashboard panels
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pipelineiq::auth::AuthFlow;
//! use pipelineiq::client::ResilientClient;
//! use pipelineiq::config::Config;
//! use pipelineiq::dashboard::Dashboard;
//! use pipelineiq::models::AttributionModel;
//! use pipelineiq::session::SessionStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let session = Arc::new(SessionStore::in_memory());
//!     let client = ResilientClient::new(&config.api)?.with_session(Arc::clone(&session));
//!
//!     // Never fails on backend errors; falls back to offline mode
//!     let signed_in = AuthFlow::new(client.clone(), session).login("me@corp.io", "secret").await?;
//!     println!("offline: {}", signed_in.offline);
//!
//!     let dashboard = Dashboard::new(client, 1, AttributionModel::Linear);
//!     for card in dashboard.kpis().await.rows {
//!         println!("{}: {}", card.label, card.value);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod fallback;
pub mod metrics;
pub mod models;
pub mod session;

// Re-export top-level types for convenience
pub use client::{ClientError, Endpoint, EndpointDescriptor, Fetched, ResilientClient, Unavailable};

pub use session::{FileBackend, MemoryBackend, Session, SessionBackend, SessionError, SessionStore};

pub use auth::{Access, AuthError, AuthFlow, Route, SignedIn};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, SessionConfig};

pub use fallback::OFFLINE_TOKEN;

pub use models::AttributionModel;
