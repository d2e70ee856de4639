//! Endpoint Registry
//!
//! Every backend operation the dashboard consumes, with its schemas and
//! fallback payload.

use super::endpoint::{Endpoint, EndpointDescriptor, HttpMethod};
use crate::fallback;
use crate::models;

macro_rules! endpoints {
    ($(
        $(#[$meta:meta])*
        $name:ident: $method:ident $path:literal $([$($query:literal),*])?
            => $body:ty, $response:ty, $fallback:path;
    )*) => {
        $(
            $(#[$meta])*
            pub struct $name;

            impl Endpoint for $name {
                type Body = $body;
                type Response = $response;

                const DESCRIPTOR: EndpointDescriptor = EndpointDescriptor {
                    name: stringify!($name),
                    method: HttpMethod::$method,
                    path: $path,
                    query: &[$($($query),*)?],
                };

                fn fallback() -> Self::Response {
                    $fallback()
                }
            }
        )*

        /// Descriptors of every registered endpoint
        pub const ALL: &[EndpointDescriptor] = &[$(<$name as Endpoint>::DESCRIPTOR),*];
    };
}

endpoints! {
    // Auth
    Signup: Post "/api/auth/signup" => models::SignupRequest, models::User, fallback::user;
    Login: Post "/api/auth/login" => models::LoginRequest, models::TokenResponse, fallback::token;
    CurrentUser: Get "/api/auth/me" => (), models::User, fallback::user;

    // Companies
    ListCompanies: Get "/api/companies/" => (), Vec<models::Company>, fallback::companies;
    GetCompany: Get "/api/companies/{id}" => (), models::Company, fallback::company;
    CreateCompany: Post "/api/companies/" => models::CompanyCreate, models::Company, fallback::company;
    UpdateCompany: Put "/api/companies/{id}" => models::CompanyUpdate, models::Company, fallback::company;
    DeleteCompany: Delete "/api/companies/{id}" => (), models::MessageResponse, fallback::company_deleted;

    // Campaigns
    GetCampaign: Get "/api/campaigns/{id}" => (), models::Campaign, fallback::campaign;
    CompanyCampaigns: Get "/api/campaigns/company/{company_id}" => (), Vec<models::Campaign>, fallback::campaigns;
    CreateCampaign: Post "/api/campaigns/" => models::CampaignCreate, models::Campaign, fallback::campaign;
    UpdateCampaign: Put "/api/campaigns/{id}" => models::CampaignUpdate, models::Campaign, fallback::campaign;
    DeleteCampaign: Delete "/api/campaigns/{id}" => (), models::MessageResponse, fallback::campaign_deleted;

    // Leads
    GetLead: Get "/api/leads/{id}" => (), models::Lead, fallback::lead;
    CompanyLeads: Get "/api/leads/company/{company_id}" => (), Vec<models::Lead>, fallback::leads;
    CreateLead: Post "/api/leads/" => models::LeadCreate, models::Lead, fallback::lead;
    UpdateLead: Put "/api/leads/{id}" => models::LeadUpdate, models::Lead, fallback::lead;
    DeleteLead: Delete "/api/leads/{id}" => (), models::MessageResponse, fallback::lead_deleted;

    // Attribution
    CalculateAttribution: Post "/api/attribution/calculate/{lead_id}" ["model"]
        => (), models::AttributionCalculation, fallback::attribution_calculation;
    AttributedRevenue: Get "/api/attribution/revenue/{company_id}" ["model"]
        => (), models::RevenueByCampaign, fallback::revenue_by_campaign;
    AttributionTotals: Get "/api/attribution/summary/{company_id}"
        => (), models::AttributionSummary, fallback::attribution_summary;

    // Analytics
    DashboardOverview: Get "/api/analytics/overview/{company_id}" ["model"]
        => (), models::Overview, fallback::overview;
    LeadFunnel: Get "/api/analytics/funnel/{company_id}"
        => (), models::Funnel, fallback::funnel;
    ChannelBreakdown: Get "/api/analytics/revenue-by-channel/{company_id}" ["model"]
        => (), models::RevenueByChannel, fallback::revenue_by_channel;
    TopCampaignRanking: Get "/api/analytics/top-campaigns/{company_id}" ["limit"]
        => (), models::TopCampaigns, fallback::top_campaigns;
    DealScores: Get "/api/analytics/deal-probability/{company_id}"
        => (), models::DealProbabilities, fallback::deal_probabilities;
    BudgetAdvice: Get "/api/analytics/budget-optimization/{company_id}"
        => (), models::BudgetOptimization, fallback::budget_optimization;

    // Demo data
    SeedDemoData: Post "/api/seed/" => (), models::SeedResponse, fallback::seed;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_is_unique() {
        let names: HashSet<_> = ALL.iter().map(|d| d.name).collect();
        assert_eq!(names.len(), ALL.len());

        let routes: HashSet<_> = ALL.iter().map(|d| (d.method, d.path)).collect();
        assert_eq!(routes.len(), ALL.len());
    }

    #[test]
    fn test_registry_paths() {
        assert_eq!(ALL.len(), 28);
        assert!(ALL.iter().all(|d| d.path.starts_with("/api/")));
        assert_eq!(
            DashboardOverview::DESCRIPTOR.to_string(),
            "GET /api/analytics/overview/{company_id}?model={model}"
        );
        assert_eq!(TopCampaignRanking::DESCRIPTOR.query, &["limit"]);
    }
}
