use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Pipeline lead with the campaigns it touched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub company_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_campaign_id: Option<i64>,
    pub email: String,
    pub name: String,
    /// MQL, SQL, Opportunity, Won or Lost
    pub stage: String,
    #[serde(default)]
    pub deal_value: f64,
    #[serde(default)]
    pub touchpoints: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeadCreate {
    pub company_id: i64,
    pub email: String,
    pub name: String,
    pub stage: String,
    pub deal_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_campaign_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touchpoints: Option<Vec<i64>>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub touchpoints: Option<Vec<i64>>,
}
