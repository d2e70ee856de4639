//! Backend Client
//!
//! Typed access to the attribution backend's REST API.
//!
//! ## Architecture
//!
//! - **Endpoint**: static descriptor plus request/response schema and fallback
//! - **Registry**: every endpoint the dashboard consumes
//! - **ResilientClient**: single-attempt caller that never fails, returning [`Fetched`]
//! - **Api**: one typed method per backend operation
//!
//! ## Example
//!
//! ```rust,no_run
//! use pipelineiq::client::ResilientClient;
//! use pipelineiq::config::ApiConfig;
//! use pipelineiq::models::AttributionModel;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ResilientClient::new(&ApiConfig::default())?;
//! let overview = client.overview(1, AttributionModel::Linear).await;
//! if overview.is_fallback() {
//!     println!("backend offline, showing sample data");
//! }
//! println!("ROAS {}", overview.value().roas);
//! # Ok(())
//! # }
//! ```

mod api;
mod endpoint;
mod error;
mod fetched;
pub mod registry;
mod resilient;

pub use api::DEFAULT_TOP_CAMPAIGNS;
pub use endpoint::{Endpoint, EndpointDescriptor, HttpMethod, Params};
pub use error::ClientError;
pub use fetched::{Fetched, Unavailable};
pub use resilient::ResilientClient;
