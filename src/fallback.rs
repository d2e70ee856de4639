//! Fallback Dataset
//!
//! Static payloads served in place of live responses when the backend is
//! unreachable. Each value uses the same schema type as the live response
//! of its endpoint, so callers parse both identically.

use crate::models::{
    AttributionCalculation, AttributionSummary, BudgetOptimization, BudgetRecommendation,
    Campaign, CampaignPerformance, CampaignRevenue, ChannelRevenue, Company, DealProbabilities,
    DealProbability, Funnel, FunnelStage, Lead, MessageResponse, ModelTotals, Overview, Priority,
    RevenueByCampaign, RevenueByChannel, SeedResponse, TokenResponse, TopCampaigns, User,
};
use std::collections::BTreeMap;

/// Reserved session token marking offline mode.
///
/// Authorizes routes like a real token but is never sent to the backend.
pub const OFFLINE_TOKEN: &str = "demo-mock-token";

/// User id stored alongside the offline token
pub const OFFLINE_USER_ID: &str = "1";

pub fn token() -> TokenResponse {
    TokenResponse {
        access_token: OFFLINE_TOKEN.to_string(),
        token_type: "bearer".to_string(),
    }
}

pub fn user() -> User {
    User {
        id: 1,
        email: "demo@pipelineiq.io".to_string(),
        full_name: Some("Demo User".to_string()),
        role: None,
        created_at: None,
    }
}

pub fn company() -> Company {
    Company {
        id: 1,
        name: "TechFlow SaaS".to_string(),
        industry: "SaaS".to_string(),
        annual_ad_spend: 240000.0,
        created_at: None,
    }
}

pub fn companies() -> Vec<Company> {
    vec![company()]
}

pub fn company_deleted() -> MessageResponse {
    message("Company deleted")
}

pub fn campaign_deleted() -> MessageResponse {
    message("Campaign deleted")
}

pub fn lead_deleted() -> MessageResponse {
    message("Lead deleted")
}

fn message(text: &str) -> MessageResponse {
    MessageResponse {
        message: text.to_string(),
    }
}

pub fn campaigns() -> Vec<Campaign> {
    [
        (1, "Q1 Enterprise Push", "Google Ads", 100000.0, 82000.0, 1240000, 18600),
        (2, "APAC SaaS Leaders", "LinkedIn", 80000.0, 68000.0, 420000, 6300),
        (3, "Retargeting Wave 3", "Meta", 55000.0, 45000.0, 980000, 14700),
        (4, "Mid-Market Nurture", "Email", 22000.0, 18000.0, 84000, 7200),
        (5, "Brand Awareness FY25", "Google Ads", 60000.0, 52000.0, 2100000, 31500),
        (6, "Webinar Series Q2", "LinkedIn", 35000.0, 28000.0, 210000, 3150),
    ]
    .into_iter()
    .map(
        |(id, name, platform, budget, cost, impressions, clicks)| Campaign {
            id,
            company_id: None,
            name: name.to_string(),
            platform: platform.to_string(),
            budget,
            cost,
            impressions,
            clicks,
            created_at: None,
        },
    )
    .collect()
}

/// Single-campaign endpoints answer with the first sample campaign
pub fn campaign() -> Campaign {
    let mut all = campaigns();
    all.swap_remove(0)
}

pub fn leads() -> Vec<Lead> {
    [
        (1, "Alice Johnson", "Won", 40000.0, Some(1), vec![1, 2, 3]),
        (2, "Bob Smith", "Opportunity", 25000.0, Some(2), vec![2, 5]),
        (3, "Carol White", "SQL", 15000.0, Some(3), vec![3]),
        (4, "David Brown", "MQL", 5000.0, Some(5), vec![5, 4]),
        (5, "Emma Davis", "Won", 35000.0, Some(1), vec![1, 4, 6, 2]),
        (6, "Frank Wilson", "Lost", 0.0, Some(6), vec![6]),
    ]
    .into_iter()
    .map(
        |(id, name, stage, deal_value, source_campaign_id, touchpoints)| Lead {
            id,
            company_id: 1,
            source_campaign_id,
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            name: name.to_string(),
            stage: stage.to_string(),
            deal_value,
            touchpoints,
            created_at: None,
        },
    )
    .collect()
}

pub fn lead() -> Lead {
    let mut all = leads();
    all.swap_remove(0)
}

pub fn attribution_calculation() -> AttributionCalculation {
    AttributionCalculation {
        lead_id: 1,
        model: "linear".to_string(),
        attribution_count: 3,
        results: [(1, 13333.33), (2, 13333.33), (3, 13333.34)]
            .into_iter()
            .map(|(campaign_id, revenue)| crate::models::AttributionShare {
                campaign_id: Some(campaign_id),
                weighted_attribution: 1.0 / 3.0,
                attributed_revenue: revenue,
            })
            .collect(),
    }
}

pub fn revenue_by_campaign() -> RevenueByCampaign {
    RevenueByCampaign {
        model: "linear".to_string(),
        data: top_campaigns()
            .campaigns
            .into_iter()
            .map(|c| CampaignRevenue {
                campaign_id: c.campaign_id,
                campaign_name: c.campaign_name,
                platform: c.platform,
                attributed_revenue: c.attributed_revenue,
            })
            .collect(),
    }
}

pub fn attribution_summary() -> AttributionSummary {
    let attribution_summary: BTreeMap<String, ModelTotals> = [
        ("linear", 1920000.0),
        ("first_touch", 1780000.0),
        ("last_touch", 2040000.0),
        ("time_decay", 1960000.0),
    ]
    .into_iter()
    .map(|(model, revenue)| {
        (
            model.to_string(),
            ModelTotals {
                total_attributed_revenue: revenue,
                leads_attributed: 210,
            },
        )
    })
    .collect();

    AttributionSummary {
        company_id: 1,
        company_name: "TechFlow SaaS".to_string(),
        attribution_summary,
    }
}

pub fn overview() -> Overview {
    Overview {
        total_ad_spend: 482000.0,
        pipeline_value: 3840000.0,
        revenue_attributed: 1920000.0,
        roas: 3.98,
        cac: 4820.0,
        company_id: None,
        company_name: None,
        num_campaigns: None,
        num_leads: None,
        conversion_rate: None,
        num_conversions: None,
    }
}

pub fn funnel() -> Funnel {
    Funnel {
        company_id: None,
        funnel: [
            ("Awareness", 12400),
            ("Interest", 5800),
            ("Consideration", 2100),
            ("Intent", 840),
            ("Closed", 210),
        ]
        .into_iter()
        .map(|(stage, count)| FunnelStage {
            stage: stage.to_string(),
            count,
            value: None,
        })
        .collect(),
    }
}

pub fn revenue_by_channel() -> RevenueByChannel {
    RevenueByChannel {
        company_id: None,
        channels: [
            ("Google Ads", 680000.0, 160000.0),
            ("LinkedIn", 520000.0, 130000.0),
            ("Meta", 380000.0, 105000.0),
            ("Email", 220000.0, 42000.0),
            ("Organic", 120000.0, 45000.0),
        ]
        .into_iter()
        .map(|(platform, attributed_revenue, spend)| ChannelRevenue {
            platform: platform.to_string(),
            attributed_revenue,
            spend,
            num_campaigns: None,
        })
        .collect(),
    }
}

pub fn top_campaigns() -> TopCampaigns {
    TopCampaigns {
        company_id: None,
        campaigns: [
            (1, "Q1 Enterprise Push", "Google Ads", 82000.0, 340000.0, 4.15),
            (2, "APAC SaaS Leaders", "LinkedIn", 68000.0, 270000.0, 3.97),
            (3, "Retargeting Wave 3", "Meta", 45000.0, 172000.0, 3.82),
            (4, "Mid-Market Nurture", "Email", 18000.0, 66000.0, 3.67),
            (5, "Brand Awareness FY25", "Google Ads", 52000.0, 188000.0, 3.62),
        ]
        .into_iter()
        .map(
            |(campaign_id, name, platform, spend, attributed_revenue, roas)| CampaignPerformance {
                campaign_id,
                campaign_name: name.to_string(),
                platform: platform.to_string(),
                spend,
                attributed_revenue,
                roas,
                num_leads: None,
            },
        )
        .collect(),
    }
}

pub fn deal_probabilities() -> DealProbabilities {
    DealProbabilities {
        company_id: None,
        high_probability_leads: [
            (5, "Emma Davis", "Opportunity", 35000.0, 86.5, 4),
            (2, "Bob Smith", "Opportunity", 25000.0, 78.0, 2),
            (3, "Carol White", "SQL", 15000.0, 64.2, 1),
        ]
        .into_iter()
        .map(
            |(lead_id, name, stage, deal_value, probability, touchpoints)| DealProbability {
                lead_id,
                lead_name: name.to_string(),
                stage: stage.to_string(),
                deal_value,
                probability,
                num_touchpoints: touchpoints,
            },
        )
        .collect(),
    }
}

pub fn budget_optimization() -> BudgetOptimization {
    let recommendations = [
        (
            "Q1 Enterprise Push",
            "Increase budget by 20%",
            "This campaign has the highest ROAS. Allocate an additional ₹16,000/month.",
            Priority::High,
            0.91,
        ),
        (
            "APAC SaaS Leaders",
            "Expand audience targeting",
            "Broaden LinkedIn job title targeting to include VP-level decision makers.",
            Priority::High,
            0.87,
        ),
        (
            "Brand Awareness FY25",
            "Reallocate to conversion campaigns",
            "Shift 30% of spend toward bottom-funnel retargeting campaigns.",
            Priority::Medium,
            0.79,
        ),
        (
            "Retargeting Wave 3",
            "Test new ad creatives",
            "CTR has dropped 18% MoM. A/B test 3 new creative variants.",
            Priority::Medium,
            0.74,
        ),
        (
            "Mid-Market Nurture",
            "Increase email cadence",
            "Leads in this segment respond best to weekly touchpoints. Automate follow-ups.",
            Priority::Low,
            0.68,
        ),
        (
            "Organic",
            "Invest in SEO content",
            "Top 5 organic keywords have high intent. Create 4 pillar pages this quarter.",
            Priority::Low,
            0.63,
        ),
    ]
    .into_iter()
    .map(
        |(campaign_name, recommendation, action, priority, confidence)| BudgetRecommendation {
            campaign_id: None,
            campaign_name: campaign_name.to_string(),
            recommendation: recommendation.to_string(),
            action: action.to_string(),
            priority,
            confidence,
            target_budget: None,
        },
    )
    .collect();

    BudgetOptimization {
        company_id: None,
        recommendations,
        campaign_metrics: None,
    }
}

pub fn seed() -> SeedResponse {
    SeedResponse {
        message: "Demo data loaded".to_string(),
        company_id: Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overview_payload() {
        let value = serde_json::to_value(overview()).unwrap();
        assert_eq!(
            value,
            json!({
                "total_ad_spend": 482000.0,
                "pipeline_value": 3840000.0,
                "revenue_attributed": 1920000.0,
                "roas": 3.98,
                "cac": 4820.0,
            })
        );
    }

    #[test]
    fn test_funnel_is_monotonic() {
        let stages = funnel().funnel;
        assert_eq!(stages.len(), 5);
        assert!(stages.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(stages[0].stage, "Awareness");
        assert_eq!(stages[4].count, 210);
    }

    #[test]
    fn test_top_campaigns_sorted_by_roas() {
        let campaigns = top_campaigns().campaigns;
        assert!(campaigns.windows(2).all(|w| w[0].roas >= w[1].roas));
    }

    #[test]
    fn test_summary_covers_every_model() {
        let summary = attribution_summary();
        for model in crate::models::AttributionModel::ALL {
            assert!(summary.totals(model).is_some(), "missing {}", model);
        }
    }

    #[test]
    fn test_single_item_fallbacks_match_lists() {
        assert_eq!(campaign(), campaigns()[0]);
        assert_eq!(lead(), leads()[0]);
        assert_eq!(companies(), vec![company()]);
    }

    #[test]
    fn test_offline_token() {
        assert_eq!(token().access_token, OFFLINE_TOKEN);
        assert_eq!(OFFLINE_TOKEN, "demo-mock-token");
    }
}
