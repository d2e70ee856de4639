use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Advertising campaign row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub name: String,
    pub platform: String,
    #[serde(default)]
    pub budget: f64,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub impressions: i64,
    #[serde(default)]
    pub clicks: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Campaign {
    /// Click-through rate in percent (0 with no impressions)
    pub fn ctr(&self) -> f64 {
        if self.impressions > 0 {
            self.clicks as f64 / self.impressions as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Cost per click (0 with no clicks)
    pub fn cpc(&self) -> f64 {
        if self.clicks > 0 {
            self.cost / self.clicks as f64
        } else {
            0.0
        }
    }

    /// Share of the budget already spent, in percent
    pub fn budget_used(&self) -> f64 {
        if self.budget > 0.0 {
            self.cost / self.budget * 100.0
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignCreate {
    pub company_id: i64,
    pub name: String,
    pub platform: String,
    pub budget: f64,
    pub impressions: i64,
    pub clicks: i64,
    pub cost: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impressions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clicks: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campaign(impressions: i64, clicks: i64, cost: f64) -> Campaign {
        Campaign {
            id: 1,
            company_id: None,
            name: "Test".to_string(),
            platform: "Meta".to_string(),
            budget: 1000.0,
            cost,
            impressions,
            clicks,
            created_at: None,
        }
    }

    #[test]
    fn test_ctr_and_cpc() {
        let c = campaign(1000, 50, 250.0);
        assert!((c.ctr() - 5.0).abs() < 1e-9);
        assert!((c.cpc() - 5.0).abs() < 1e-9);
        assert!((c.budget_used() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_guards() {
        let c = campaign(0, 0, 250.0);
        assert_eq!(c.ctr(), 0.0);
        assert_eq!(c.cpc(), 0.0);
    }

    #[test]
    fn test_update_omits_unset_fields() {
        let update = CampaignUpdate {
            budget: Some(5000.0),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({"budget": 5000.0}));
    }
}
