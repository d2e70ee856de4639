//! Typed operations over the endpoint registry.

use super::endpoint::Params;
use super::fetched::Fetched;
use super::registry::*;
use super::resilient::ResilientClient;
use crate::models::{
    AttributionCalculation, AttributionModel, AttributionSummary, BudgetOptimization, Campaign,
    CampaignCreate, CampaignUpdate, Company, CompanyCreate, CompanyUpdate, DealProbabilities,
    Funnel, Lead, LeadCreate, LeadUpdate, LoginRequest, MessageResponse, Overview,
    RevenueByCampaign, RevenueByChannel, SeedResponse, SignupRequest, TokenResponse,
    TopCampaigns, User,
};

/// Default number of rows for the top campaign ranking
pub const DEFAULT_TOP_CAMPAIGNS: u32 = 5;

impl ResilientClient {
    // ============================================
    // Auth
    // ============================================

    pub async fn signup(&self, email: &str, password: &str, full_name: &str) -> Fetched<User> {
        let body = SignupRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
        };
        self.call::<Signup>(Params::new(), Some(&body)).await
    }

    /// On failure the fallback carries the offline token
    pub async fn login(&self, email: &str, password: &str) -> Fetched<TokenResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call::<Login>(Params::new(), Some(&body)).await
    }

    pub async fn current_user(&self) -> Fetched<User> {
        self.call::<CurrentUser>(Params::new(), None).await
    }

    // ============================================
    // Companies
    // ============================================

    pub async fn companies(&self) -> Fetched<Vec<Company>> {
        self.call::<ListCompanies>(Params::new(), None).await
    }

    pub async fn company(&self, id: i64) -> Fetched<Company> {
        self.call::<GetCompany>(Params::new().path("id", id), None).await
    }

    pub async fn create_company(&self, company: &CompanyCreate) -> Fetched<Company> {
        self.call::<CreateCompany>(Params::new(), Some(company)).await
    }

    pub async fn update_company(&self, id: i64, update: &CompanyUpdate) -> Fetched<Company> {
        self.call::<UpdateCompany>(Params::new().path("id", id), Some(update))
            .await
    }

    pub async fn delete_company(&self, id: i64) -> Fetched<MessageResponse> {
        self.call::<DeleteCompany>(Params::new().path("id", id), None).await
    }

    // ============================================
    // Campaigns
    // ============================================

    pub async fn campaign(&self, id: i64) -> Fetched<Campaign> {
        self.call::<GetCampaign>(Params::new().path("id", id), None).await
    }

    pub async fn campaigns_for_company(&self, company_id: i64) -> Fetched<Vec<Campaign>> {
        self.call::<CompanyCampaigns>(Params::new().path("company_id", company_id), None)
            .await
    }

    pub async fn create_campaign(&self, campaign: &CampaignCreate) -> Fetched<Campaign> {
        self.call::<CreateCampaign>(Params::new(), Some(campaign)).await
    }

    pub async fn update_campaign(&self, id: i64, update: &CampaignUpdate) -> Fetched<Campaign> {
        self.call::<UpdateCampaign>(Params::new().path("id", id), Some(update))
            .await
    }

    pub async fn delete_campaign(&self, id: i64) -> Fetched<MessageResponse> {
        self.call::<DeleteCampaign>(Params::new().path("id", id), None).await
    }

    // ============================================
    // Leads
    // ============================================

    pub async fn lead(&self, id: i64) -> Fetched<Lead> {
        self.call::<GetLead>(Params::new().path("id", id), None).await
    }

    pub async fn leads_for_company(&self, company_id: i64) -> Fetched<Vec<Lead>> {
        self.call::<CompanyLeads>(Params::new().path("company_id", company_id), None)
            .await
    }

    pub async fn create_lead(&self, lead: &LeadCreate) -> Fetched<Lead> {
        self.call::<CreateLead>(Params::new(), Some(lead)).await
    }

    pub async fn update_lead(&self, id: i64, update: &LeadUpdate) -> Fetched<Lead> {
        self.call::<UpdateLead>(Params::new().path("id", id), Some(update))
            .await
    }

    pub async fn delete_lead(&self, id: i64) -> Fetched<MessageResponse> {
        self.call::<DeleteLead>(Params::new().path("id", id), None).await
    }

    // ============================================
    // Attribution
    // ============================================

    pub async fn calculate_attribution(
        &self,
        lead_id: i64,
        model: AttributionModel,
    ) -> Fetched<AttributionCalculation> {
        let params = Params::new()
            .path("lead_id", lead_id)
            .query("model", model);
        self.call::<CalculateAttribution>(params, None).await
    }

    pub async fn attributed_revenue(
        &self,
        company_id: i64,
        model: AttributionModel,
    ) -> Fetched<RevenueByCampaign> {
        let params = Params::new()
            .path("company_id", company_id)
            .query("model", model);
        self.call::<AttributedRevenue>(params, None).await
    }

    pub async fn attribution_summary(&self, company_id: i64) -> Fetched<AttributionSummary> {
        self.call::<AttributionTotals>(Params::new().path("company_id", company_id), None)
            .await
    }

    // ============================================
    // Analytics
    // ============================================

    pub async fn overview(&self, company_id: i64, model: AttributionModel) -> Fetched<Overview> {
        let params = Params::new()
            .path("company_id", company_id)
            .query("model", model);
        self.call::<DashboardOverview>(params, None).await
    }

    pub async fn funnel(&self, company_id: i64) -> Fetched<Funnel> {
        self.call::<LeadFunnel>(Params::new().path("company_id", company_id), None)
            .await
    }

    pub async fn revenue_by_channel(
        &self,
        company_id: i64,
        model: AttributionModel,
    ) -> Fetched<RevenueByChannel> {
        let params = Params::new()
            .path("company_id", company_id)
            .query("model", model);
        self.call::<ChannelBreakdown>(params, None).await
    }

    pub async fn top_campaigns(&self, company_id: i64, limit: u32) -> Fetched<TopCampaigns> {
        let params = Params::new()
            .path("company_id", company_id)
            .query("limit", limit);
        self.call::<TopCampaignRanking>(params, None).await
    }

    pub async fn deal_probabilities(&self, company_id: i64) -> Fetched<DealProbabilities> {
        self.call::<DealScores>(Params::new().path("company_id", company_id), None)
            .await
    }

    pub async fn budget_recommendations(&self, company_id: i64) -> Fetched<BudgetOptimization> {
        self.call::<BudgetAdvice>(Params::new().path("company_id", company_id), None)
            .await
    }

    // ============================================
    // Demo data
    // ============================================

    pub async fn seed(&self) -> Fetched<SeedResponse> {
        self.call::<SeedDemoData>(Params::new(), None).await
    }
}
