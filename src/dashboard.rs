//! Dashboard Views
//!
//! Turns client results into display rows: formatted strings ready for a
//! table or card, plus a `degraded` flag when the rows came from the
//! fallback dataset.

use serde::Serialize;

use crate::client::{Fetched, ResilientClient};
use crate::metrics::{
    calculate_roas, format_currency, format_number, format_percentage, format_roas, ratio_percent,
};
use crate::models::{
    AttributionModel, BudgetOptimization, Campaign, Funnel, Overview, RevenueByChannel,
    TopCampaigns,
};

/// Rows for one dashboard panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View<T> {
    pub rows: T,
    pub degraded: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl<T> View<T> {
    fn build<S, F: FnOnce(&S) -> T>(fetched: &Fetched<S>, f: F) -> Self {
        Self {
            rows: f(fetched.value()),
            degraded: fetched.is_fallback(),
            notice: fetched
                .reason()
                .map(|r| format!("Showing sample data: {}", r)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunnelRow {
    pub stage: String,
    pub count: String,
    /// Conversion from the stage above; none for the first stage
    pub conversion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRow {
    pub platform: String,
    pub revenue: String,
    pub spend: String,
    pub roas: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRankRow {
    pub rank: usize,
    pub name: String,
    pub platform: String,
    pub spend: String,
    pub revenue: String,
    pub roas: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationRow {
    pub campaign: String,
    pub recommendation: String,
    pub action: String,
    pub priority: String,
    pub confidence: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRow {
    pub name: String,
    pub platform: String,
    pub budget: String,
    pub spend: String,
    pub budget_used: String,
    pub impressions: String,
    pub clicks: String,
    pub ctr: String,
    pub cpc: String,
}

pub fn kpi_cards(overview: &Overview) -> Vec<KpiCard> {
    let mut cards = vec![
        KpiCard {
            label: "Total Ad Spend",
            value: format_currency(overview.total_ad_spend),
        },
        KpiCard {
            label: "Pipeline Value",
            value: format_currency(overview.pipeline_value),
        },
        KpiCard {
            label: "Revenue Attributed",
            value: format_currency(overview.revenue_attributed),
        },
        KpiCard {
            label: "ROAS",
            value: format_roas(overview.roas),
        },
        KpiCard {
            label: "CAC",
            value: format_currency(overview.cac),
        },
    ];

    if let Some(rate) = overview.conversion_rate {
        cards.push(KpiCard {
            label: "Conversion Rate",
            value: format_percentage(rate),
        });
    }

    cards
}

pub fn funnel_rows(funnel: &Funnel) -> Vec<FunnelRow> {
    funnel
        .funnel
        .iter()
        .enumerate()
        .map(|(i, stage)| FunnelRow {
            stage: stage.stage.clone(),
            count: format_number(stage.count as f64),
            conversion: i.checked_sub(1).map(|prev| {
                format_percentage(ratio_percent(
                    stage.count as f64,
                    funnel.funnel[prev].count as f64,
                ))
            }),
        })
        .collect()
}

pub fn channel_rows(channels: &RevenueByChannel) -> Vec<ChannelRow> {
    channels
        .channels
        .iter()
        .map(|c| ChannelRow {
            platform: c.platform.clone(),
            revenue: format_currency(c.attributed_revenue),
            spend: format_currency(c.spend),
            roas: format_roas(calculate_roas(c.attributed_revenue, c.spend)),
        })
        .collect()
}

pub fn campaign_rank_rows(top: &TopCampaigns) -> Vec<CampaignRankRow> {
    top.campaigns
        .iter()
        .enumerate()
        .map(|(i, c)| CampaignRankRow {
            rank: i + 1,
            name: c.campaign_name.clone(),
            platform: c.platform.clone(),
            spend: format_currency(c.spend),
            revenue: format_currency(c.attributed_revenue),
            roas: format_roas(c.roas),
        })
        .collect()
}

/// Highest priority first, then by confidence
pub fn recommendation_rows(budget: &BudgetOptimization) -> Vec<RecommendationRow> {
    let mut recommendations: Vec<_> = budget.recommendations.iter().collect();
    recommendations.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| b.confidence.total_cmp(&a.confidence))
    });

    recommendations
        .into_iter()
        .map(|r| RecommendationRow {
            campaign: r.campaign_name.clone(),
            recommendation: r.recommendation.clone(),
            action: r.action.clone(),
            priority: r.priority.to_string(),
            confidence: format_percentage(r.confidence * 100.0),
        })
        .collect()
}

pub fn campaign_rows(campaigns: &[Campaign]) -> Vec<CampaignRow> {
    campaigns
        .iter()
        .map(|c| CampaignRow {
            name: c.name.clone(),
            platform: c.platform.clone(),
            budget: format_currency(c.budget),
            spend: format_currency(c.cost),
            budget_used: format_percentage(c.budget_used()),
            impressions: format_number(c.impressions as f64),
            clicks: format_number(c.clicks as f64),
            ctr: format_percentage(c.ctr()),
            cpc: format_currency(c.cpc()),
        })
        .collect()
}

/// Panels for one company under one attribution model
pub struct Dashboard {
    client: ResilientClient,
    company_id: i64,
    model: AttributionModel,
}

impl Dashboard {
    pub fn new(client: ResilientClient, company_id: i64, model: AttributionModel) -> Self {
        Self {
            client,
            company_id,
            model,
        }
    }

    pub async fn kpis(&self) -> View<Vec<KpiCard>> {
        let fetched = self.client.overview(self.company_id, self.model).await;
        View::build(&fetched, kpi_cards)
    }

    pub async fn funnel(&self) -> View<Vec<FunnelRow>> {
        let fetched = self.client.funnel(self.company_id).await;
        View::build(&fetched, funnel_rows)
    }

    pub async fn channels(&self) -> View<Vec<ChannelRow>> {
        let fetched = self
            .client
            .revenue_by_channel(self.company_id, self.model)
            .await;
        View::build(&fetched, channel_rows)
    }

    pub async fn top_campaigns(&self, limit: u32) -> View<Vec<CampaignRankRow>> {
        let fetched = self.client.top_campaigns(self.company_id, limit).await;
        View::build(&fetched, campaign_rank_rows)
    }

    pub async fn recommendations(&self) -> View<Vec<RecommendationRow>> {
        let fetched = self.client.budget_recommendations(self.company_id).await;
        View::build(&fetched, recommendation_rows)
    }

    pub async fn campaigns(&self) -> View<Vec<CampaignRow>> {
        let fetched = self.client.campaigns_for_company(self.company_id).await;
        View::build(&fetched, |c: &Vec<Campaign>| campaign_rows(c))
    }
}
