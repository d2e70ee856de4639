//! Request/Response Schemas
//!
//! One request type and one response type per backend endpoint.
//! Fields that only the live backend fills in are optional, so a live
//! response and its fallback payload decode through the same type.

mod analytics;
mod attribution;
mod auth;
mod campaign;
mod company;
mod lead;

pub use analytics::{
    BudgetOptimization, BudgetRecommendation, CampaignMetrics, CampaignPerformance,
    ChannelRevenue, DealProbabilities, DealProbability, Funnel, FunnelStage, Overview, Priority,
    RevenueByChannel, TopCampaigns,
};
pub use attribution::{
    AttributionCalculation, AttributionModel, AttributionShare, AttributionSummary,
    CampaignRevenue, ModelTotals, ParseModelError, RevenueByCampaign,
};
pub use auth::{LoginRequest, SignupRequest, TokenResponse, User};
pub use campaign::{Campaign, CampaignCreate, CampaignUpdate};
pub use company::{Company, CompanyCreate, CompanyUpdate};
pub use lead::{Lead, LeadCreate, LeadUpdate};

use serde::{Deserialize, Serialize};

/// Generic `{"message": ...}` body returned by delete and seed routes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of `POST /api/seed/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
}
