use serde::{Deserialize, Serialize};

/// KPI overview for the dashboard header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_ad_spend: f64,
    pub pipeline_value: f64,
    pub revenue_attributed: f64,
    pub roas: f64,
    pub cac: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_campaigns: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_leads: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_conversions: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub stage: String,
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Funnel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub funnel: Vec<FunnelStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRevenue {
    pub platform: String,
    pub attributed_revenue: f64,
    pub spend: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_campaigns: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueByChannel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub channels: Vec<ChannelRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPerformance {
    pub campaign_id: i64,
    pub campaign_name: String,
    pub platform: String,
    pub spend: f64,
    pub attributed_revenue: f64,
    pub roas: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_leads: Option<i64>,
}

/// Campaigns ordered by ROAS, best first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCampaigns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub campaigns: Vec<CampaignPerformance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealProbability {
    pub lead_id: i64,
    pub lead_name: String,
    pub stage: String,
    pub deal_value: f64,
    /// Close probability, 0 to 100
    pub probability: f64,
    pub num_touchpoints: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealProbabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub high_probability_leads: Vec<DealProbability>,
}

/// Recommendation urgency. Ordered high before low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Medium => write!(f, "medium"),
            Priority::Low => write!(f, "low"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecommendation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<i64>,
    pub campaign_name: String,
    pub recommendation: String,
    pub action: String,
    pub priority: Priority,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_budget: Option<f64>,
}

/// Per-campaign inputs behind the budget recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignMetrics {
    pub campaign_id: i64,
    pub campaign_name: String,
    pub platform: String,
    pub budget: f64,
    pub spend: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub ctr: f64,
    pub cpc: f64,
    pub num_leads: i64,
    pub num_conversions: i64,
    pub attributed_revenue: f64,
    pub roas: f64,
    pub cac: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOptimization {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub recommendations: Vec<BudgetRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_metrics: Option<Vec<CampaignMetrics>>,
}
