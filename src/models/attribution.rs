use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Rule the backend uses to split conversion credit across touchpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributionModel {
    #[default]
    Linear,
    FirstTouch,
    LastTouch,
    TimeDecay,
}

impl AttributionModel {
    pub const ALL: [AttributionModel; 4] = [
        AttributionModel::Linear,
        AttributionModel::FirstTouch,
        AttributionModel::LastTouch,
        AttributionModel::TimeDecay,
    ];

    /// Query-string value understood by the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributionModel::Linear => "linear",
            AttributionModel::FirstTouch => "first_touch",
            AttributionModel::LastTouch => "last_touch",
            AttributionModel::TimeDecay => "time_decay",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AttributionModel::Linear => "Linear",
            AttributionModel::FirstTouch => "First Touch",
            AttributionModel::LastTouch => "Last Touch",
            AttributionModel::TimeDecay => "Time Decay",
        }
    }
}

impl std::fmt::Display for AttributionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown attribution model: {0} (expected linear, first_touch, last_touch or time_decay)")]
pub struct ParseModelError(pub String);

impl FromStr for AttributionModel {
    type Err = ParseModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "linear" => Ok(AttributionModel::Linear),
            "first_touch" => Ok(AttributionModel::FirstTouch),
            "last_touch" => Ok(AttributionModel::LastTouch),
            "time_decay" => Ok(AttributionModel::TimeDecay),
            _ => Err(ParseModelError(s.to_string())),
        }
    }
}

/// Credit assigned to one campaign for one lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionShare {
    #[serde(default)]
    pub campaign_id: Option<i64>,
    pub weighted_attribution: f64,
    pub attributed_revenue: f64,
}

/// Response of `POST /api/attribution/calculate/{lead_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionCalculation {
    pub lead_id: i64,
    pub model: String,
    pub attribution_count: i64,
    #[serde(default)]
    pub results: Vec<AttributionShare>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRevenue {
    pub campaign_id: i64,
    pub campaign_name: String,
    pub platform: String,
    pub attributed_revenue: f64,
}

/// Response of `GET /api/attribution/revenue/{company_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueByCampaign {
    pub model: String,
    pub data: Vec<CampaignRevenue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTotals {
    pub total_attributed_revenue: f64,
    pub leads_attributed: i64,
}

/// Response of `GET /api/attribution/summary/{company_id}`, keyed by model name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionSummary {
    pub company_id: i64,
    pub company_name: String,
    pub attribution_summary: BTreeMap<String, ModelTotals>,
}

impl AttributionSummary {
    pub fn totals(&self, model: AttributionModel) -> Option<&ModelTotals> {
        self.attribution_summary.get(model.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_parse() {
        assert_eq!("linear".parse(), Ok(AttributionModel::Linear));
        assert_eq!("First-Touch".parse(), Ok(AttributionModel::FirstTouch));
        assert_eq!("time_decay".parse(), Ok(AttributionModel::TimeDecay));
        assert!("u_shaped".parse::<AttributionModel>().is_err());
    }

    #[test]
    fn test_model_wire_names() {
        for model in AttributionModel::ALL {
            let json = serde_json::to_value(model).unwrap();
            assert_eq!(json, serde_json::Value::String(model.as_str().to_string()));
        }
        assert_eq!(AttributionModel::default(), AttributionModel::Linear);
    }
}
