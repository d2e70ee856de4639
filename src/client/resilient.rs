//! Resilient Data Client
//!
//! Issues one request per call with a bounded wait budget. Any failure
//! (timeout, refused connection, DNS error, non-2xx status, a body that
//! does not decode into the endpoint's schema) is swallowed and replaced
//! with the endpoint's fallback payload.
//!
//! This trades correctness for availability: with no backend deployed the
//! dashboard still renders, from sample data. The [`Fetched`] variant is
//! how callers find out which one they got.

use std::sync::Arc;
use std::time::Duration;

use super::endpoint::{Endpoint, Params};
use super::error::ClientError;
use super::fetched::{Fetched, Unavailable};
use crate::config::ApiConfig;
use crate::fallback::OFFLINE_TOKEN;
use crate::session::SessionStore;

/// Backend client with per-endpoint fallback
#[derive(Clone)]
pub struct ResilientClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<Arc<SessionStore>>,
}

impl ResilientClient {
    /// Create a client for the configured base URL and wait budget
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// Attach the session whose token is sent as a bearer credential
    pub fn with_session(mut self, session: Arc<SessionStore>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Call an endpoint, substituting its fallback on any failure
    pub async fn call<E: Endpoint>(&self, params: Params, body: Option<&E::Body>) -> Fetched<E::Response> {
        let descriptor = E::DESCRIPTOR;

        match self.attempt::<E>(&params, body).await {
            Ok(value) => {
                tracing::debug!(endpoint = descriptor.name, "Live response");
                Fetched::Live(value)
            }
            Err(reason) => {
                tracing::warn!(
                    endpoint = descriptor.name,
                    %reason,
                    "Backend unavailable, serving fallback payload"
                );
                Fetched::Fallback {
                    value: E::fallback(),
                    reason,
                }
            }
        }
    }

    async fn attempt<E: Endpoint>(&self, params: &Params, body: Option<&E::Body>) -> Result<E::Response, Unavailable> {
        let descriptor = E::DESCRIPTOR;
        let url = format!("{}{}", self.base_url, descriptor.render(params)?);

        tracing::debug!(method = %descriptor.method, %url, "Sending request");

        let mut request = self.http.request(descriptor.method.as_reqwest(), &url);
        if !params.query_pairs().is_empty() {
            request = request.query(params.query_pairs());
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.bearer_token().await {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Unavailable::Status(status.as_u16()));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| Unavailable::Decode(e.to_string()))
    }

    /// Session token to present, never the offline marker
    async fn bearer_token(&self) -> Option<String> {
        let session = self.session.as_ref()?;
        session.token().await.filter(|t| t != OFFLINE_TOKEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::registry::*;
    use crate::fallback;
    use crate::models::{
        AttributionModel, CampaignCreate, CampaignUpdate, CompanyCreate, CompanyUpdate, LeadCreate,
        LeadUpdate,
    };
    use axum::body::Bytes;
    use axum::extract::{Path, Query, State};
    use axum::http::{HeaderMap, Method, StatusCode, Uri};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Base URL on which nothing is listening
    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        format!("http://127.0.0.1:{}", port)
    }

    fn client(base_url: &str, timeout_ms: u64) -> ResilientClient {
        ResilientClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            timeout_ms,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_unreachable_backend_serves_every_fallback() {
        let client = client(&unreachable_url(), 1000);

        macro_rules! assert_fallback {
            ($($endpoint:ty => $params:expr),* $(,)?) => {$(
                let fetched = client.call::<$endpoint>($params, None).await;
                assert!(
                    matches!(fetched.reason(), Some(Unavailable::Connect(_))),
                    "{} should fall back on refused connection",
                    <$endpoint as Endpoint>::DESCRIPTOR.name
                );
                assert_eq!(fetched.into_inner(), <$endpoint as Endpoint>::fallback());
            )*};
        }

        let id = || Params::new().path("id", 1);
        let company = || Params::new().path("company_id", 1);

        assert_fallback! {
            Signup => Params::new(),
            Login => Params::new(),
            CurrentUser => Params::new(),
            ListCompanies => Params::new(),
            GetCompany => id(),
            CreateCompany => Params::new(),
            UpdateCompany => id(),
            DeleteCompany => id(),
            GetCampaign => id(),
            CompanyCampaigns => company(),
            CreateCampaign => Params::new(),
            UpdateCampaign => id(),
            DeleteCampaign => id(),
            GetLead => id(),
            CompanyLeads => company(),
            CreateLead => Params::new(),
            UpdateLead => id(),
            DeleteLead => id(),
            CalculateAttribution => Params::new().path("lead_id", 1).query("model", "linear"),
            AttributedRevenue => company().query("model", "linear"),
            AttributionTotals => company(),
            DashboardOverview => company().query("model", "linear"),
            LeadFunnel => company(),
            ChannelBreakdown => company().query("model", "linear"),
            TopCampaignRanking => company().query("limit", 5),
            DealScores => company(),
            BudgetAdvice => company(),
            SeedDemoData => Params::new(),
        }
    }

    #[tokio::test]
    async fn test_login_fallback_carries_offline_token() {
        let client = client(&unreachable_url(), 1000);
        let token = client.login("a@b.io", "pw").await;

        assert!(token.is_fallback());
        assert_eq!(token.value().access_token, OFFLINE_TOKEN);
    }

    #[tokio::test]
    async fn test_live_body_returned_unchanged() {
        let app = Router::new().route(
            "/api/analytics/overview/:company_id",
            get(
                |Path(company_id): Path<i64>, Query(q): Query<HashMap<String, String>>| async move {
                    Json(json!({
                        "total_ad_spend": 1000.0,
                        "pipeline_value": 5000.0,
                        "revenue_attributed": 2500.0,
                        "roas": 2.5,
                        "cac": 100.0,
                        "company_id": company_id,
                        "company_name": q.get("model").cloned().unwrap_or_default(),
                        "num_leads": 10,
                        "conversion_rate": 20.0
                    }))
                },
            ),
        );
        let client = client(&serve(app).await, 2000);

        let overview = client.overview(7, AttributionModel::TimeDecay).await;
        assert!(overview.is_live());

        let overview = overview.into_inner();
        assert_eq!(overview.total_ad_spend, 1000.0);
        assert_eq!(overview.company_id, Some(7));
        assert_eq!(overview.company_name.as_deref(), Some("time_decay"));
        assert_eq!(overview.conversion_rate, Some(20.0));
        assert_eq!(overview.num_campaigns, None);
    }

    #[tokio::test]
    async fn test_error_status_falls_back() {
        let app = Router::new().route(
            "/api/analytics/funnel/:company_id",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let client = client(&serve(app).await, 2000);

        let funnel = client.funnel(1).await;
        assert_eq!(funnel.reason(), Some(&Unavailable::Status(500)));
        assert_eq!(funnel.into_inner(), fallback::funnel());
    }

    #[tokio::test]
    async fn test_missing_route_falls_back() {
        let client = client(&serve(Router::new()).await, 2000);

        let channels = client.revenue_by_channel(1, AttributionModel::Linear).await;
        assert_eq!(channels.reason(), Some(&Unavailable::Status(404)));
    }

    #[tokio::test]
    async fn test_undecodable_body_falls_back() {
        let app = Router::new()
            .route(
                "/api/analytics/top-campaigns/:company_id",
                get(|| async { Json(json!({ "campaigns": "not a list" })) }),
            )
            .route(
                "/api/analytics/deal-probability/:company_id",
                get(|| async { "<html>gateway</html>" }),
            );
        let client = client(&serve(app).await, 2000);

        let top = client.top_campaigns(1, 5).await;
        assert!(matches!(top.reason(), Some(Unavailable::Decode(_))));
        assert_eq!(top.into_inner(), fallback::top_campaigns());

        let deals = client.deal_probabilities(1).await;
        assert!(matches!(deals.reason(), Some(Unavailable::Decode(_))));
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let app = Router::new().route(
            "/api/analytics/budget-optimization/:company_id",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({ "recommendations": [] }))
            }),
        );
        let client = client(&serve(app).await, 100);

        let budget = client.budget_recommendations(1).await;
        assert_eq!(budget.reason(), Some(&Unavailable::Timeout));
        assert_eq!(budget.into_inner(), fallback::budget_optimization());
    }

    #[tokio::test]
    async fn test_fallback_payloads_decode_as_live() {
        let overview = serde_json::to_value(fallback::overview()).unwrap();
        let campaigns = serde_json::to_value(fallback::campaigns()).unwrap();
        let summary = serde_json::to_value(fallback::attribution_summary()).unwrap();

        let app = Router::new()
            .route(
                "/api/analytics/overview/:company_id",
                get(move || async move { Json(overview) }),
            )
            .route(
                "/api/campaigns/company/:company_id",
                get(move || async move { Json(campaigns) }),
            )
            .route(
                "/api/attribution/summary/:company_id",
                get(move || async move { Json(summary) }),
            );
        let client = client(&serve(app).await, 2000);

        assert_eq!(
            client.overview(1, AttributionModel::Linear).await,
            Fetched::Live(fallback::overview())
        );
        assert_eq!(
            client.campaigns_for_company(1).await,
            Fetched::Live(fallback::campaigns())
        );
        assert_eq!(
            client.attribution_summary(1).await,
            Fetched::Live(fallback::attribution_summary())
        );
    }

    fn whoami_app() -> Router {
        Router::new().route(
            "/api/auth/me",
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some(auth) => Ok(Json(json!({
                        "id": 42,
                        "email": auth.trim_start_matches("Bearer "),
                    }))),
                    None => Err(StatusCode::UNAUTHORIZED),
                }
            }),
        )
    }

    #[tokio::test]
    async fn test_session_token_sent_as_bearer() {
        let session = Arc::new(SessionStore::in_memory());
        session.sign_in("real-token", "42").await.unwrap();
        let client = client(&serve(whoami_app()).await, 2000).with_session(session);

        let user = client.current_user().await;
        assert!(user.is_live());
        assert_eq!(user.value().email, "real-token");
    }

    #[tokio::test]
    async fn test_offline_token_never_sent() {
        let session = Arc::new(SessionStore::in_memory());
        session.sign_in(OFFLINE_TOKEN, "1").await.unwrap();
        let client = client(&serve(whoami_app()).await, 2000).with_session(session);

        let user = client.current_user().await;
        assert_eq!(user.reason(), Some(&Unavailable::Status(401)));
        assert_eq!(user.into_inner(), fallback::user());
    }

    #[tokio::test]
    async fn test_request_body_is_json() {
        let app = Router::new().route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "access_token": format!("tok-{}", body["email"].as_str().unwrap_or("")) }))
            }),
        );
        let client = client(&serve(app).await, 2000);

        let token = client.login("ana@corp.io", "pw").await;
        assert!(token.is_live());
        assert_eq!(token.value().access_token, "tok-ana@corp.io");
        assert_eq!(token.value().token_type, "bearer");
    }

    #[tokio::test]
    async fn test_trailing_slash_trimmed() {
        let client = client("http://localhost:8000/", 2000);
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    /// One request as the backend saw it
    #[derive(Debug, Clone, PartialEq)]
    struct Seen {
        method: String,
        path: String,
        query: Option<String>,
        body: Value,
    }

    /// Backend that answers `"<METHOD> <path>"` with a canned body and
    /// records every request
    #[derive(Clone, Default)]
    struct Recorder {
        replies: Arc<std::sync::Mutex<HashMap<String, Value>>>,
        seen: Arc<std::sync::Mutex<Vec<Seen>>>,
    }

    async fn answer(
        State(recorder): State<Recorder>,
        method: Method,
        uri: Uri,
        body: Bytes,
    ) -> Result<Json<Value>, StatusCode> {
        let body = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|_| StatusCode::BAD_REQUEST)?
        };
        recorder.seen.lock().unwrap().push(Seen {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            body,
        });

        let key = format!("{} {}", method, uri.path());
        recorder
            .replies
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .map(Json)
            .ok_or(StatusCode::NOT_FOUND)
    }

    #[tokio::test]
    async fn test_reachable_backend_serves_every_endpoint_live() {
        let recorder = Recorder::default();
        let app = Router::new()
            .fallback(answer)
            .with_state(recorder.clone());
        let client = client(&serve(app).await, 2000);

        // Reply is registered under the expected method, so a wrong method
        // gets a 404 and shows up as a fallback
        macro_rules! assert_live {
            ($endpoint:ty, $method:literal $path:literal, $query:expr, $body:expr, $call:expr) => {{
                let reply = serde_json::to_value(<$endpoint as Endpoint>::fallback()).unwrap();
                recorder
                    .replies
                    .lock()
                    .unwrap()
                    .insert(format!("{} {}", $method, $path), reply);

                let fetched = $call.await;
                assert_eq!(
                    fetched,
                    Fetched::Live(<$endpoint as Endpoint>::fallback()),
                    "{} should be served live",
                    <$endpoint as Endpoint>::DESCRIPTOR.name
                );

                let seen = recorder.seen.lock().unwrap().pop().unwrap();
                assert_eq!(
                    seen,
                    Seen {
                        method: $method.to_string(),
                        path: $path.to_string(),
                        query: $query.map(str::to_string),
                        body: $body,
                    }
                );
            }};
        }

        let company = CompanyCreate {
            name: "Acme".to_string(),
            industry: "Retail".to_string(),
            annual_ad_spend: 250000.0,
        };
        let campaign = CampaignCreate {
            company_id: 1,
            name: "Spring Launch".to_string(),
            platform: "LinkedIn".to_string(),
            budget: 5000.0,
            impressions: 0,
            clicks: 0,
            cost: 0.0,
        };
        let lead = LeadCreate {
            company_id: 1,
            email: "lead@acme.io".to_string(),
            name: "Lee".to_string(),
            stage: "Interest".to_string(),
            deal_value: 12000.0,
            source_campaign_id: None,
            touchpoints: Some(vec![1, 3]),
        };

        // Auth
        assert_live!(Signup, "POST" "/api/auth/signup", None,
            json!({ "email": "ana@corp.io", "password": "pw", "full_name": "Ana" }),
            client.signup("ana@corp.io", "pw", "Ana"));
        assert_live!(Login, "POST" "/api/auth/login", None,
            json!({ "email": "ana@corp.io", "password": "pw" }),
            client.login("ana@corp.io", "pw"));
        assert_live!(CurrentUser, "GET" "/api/auth/me", None, Value::Null,
            client.current_user());

        // Companies
        assert_live!(ListCompanies, "GET" "/api/companies/", None, Value::Null,
            client.companies());
        assert_live!(GetCompany, "GET" "/api/companies/2", None, Value::Null,
            client.company(2));
        assert_live!(CreateCompany, "POST" "/api/companies/", None,
            json!({ "name": "Acme", "industry": "Retail", "annual_ad_spend": 250000.0 }),
            client.create_company(&company));
        assert_live!(UpdateCompany, "PUT" "/api/companies/2", None,
            json!({ "name": "Acme Group" }),
            client.update_company(2, &CompanyUpdate {
                name: Some("Acme Group".to_string()),
                ..Default::default()
            }));
        assert_live!(DeleteCompany, "DELETE" "/api/companies/2", None, Value::Null,
            client.delete_company(2));

        // Campaigns
        assert_live!(GetCampaign, "GET" "/api/campaigns/3", None, Value::Null,
            client.campaign(3));
        assert_live!(CompanyCampaigns, "GET" "/api/campaigns/company/1", None, Value::Null,
            client.campaigns_for_company(1));
        assert_live!(CreateCampaign, "POST" "/api/campaigns/", None,
            json!({
                "company_id": 1, "name": "Spring Launch", "platform": "LinkedIn",
                "budget": 5000.0, "impressions": 0, "clicks": 0, "cost": 0.0
            }),
            client.create_campaign(&campaign));
        assert_live!(UpdateCampaign, "PUT" "/api/campaigns/3", None,
            json!({ "budget": 6000.0 }),
            client.update_campaign(3, &CampaignUpdate {
                budget: Some(6000.0),
                ..Default::default()
            }));
        assert_live!(DeleteCampaign, "DELETE" "/api/campaigns/3", None, Value::Null,
            client.delete_campaign(3));

        // Leads
        assert_live!(GetLead, "GET" "/api/leads/4", None, Value::Null,
            client.lead(4));
        assert_live!(CompanyLeads, "GET" "/api/leads/company/1", None, Value::Null,
            client.leads_for_company(1));
        assert_live!(CreateLead, "POST" "/api/leads/", None,
            json!({
                "company_id": 1, "email": "lead@acme.io", "name": "Lee",
                "stage": "Interest", "deal_value": 12000.0, "touchpoints": [1, 3]
            }),
            client.create_lead(&lead));
        assert_live!(UpdateLead, "PUT" "/api/leads/4", None,
            json!({ "stage": "Closed" }),
            client.update_lead(4, &LeadUpdate {
                stage: Some("Closed".to_string()),
                ..Default::default()
            }));
        assert_live!(DeleteLead, "DELETE" "/api/leads/4", None, Value::Null,
            client.delete_lead(4));

        // Attribution
        assert_live!(CalculateAttribution, "POST" "/api/attribution/calculate/4",
            Some("model=first_touch"), Value::Null,
            client.calculate_attribution(4, AttributionModel::FirstTouch));
        assert_live!(AttributedRevenue, "GET" "/api/attribution/revenue/1",
            Some("model=last_touch"), Value::Null,
            client.attributed_revenue(1, AttributionModel::LastTouch));
        assert_live!(AttributionTotals, "GET" "/api/attribution/summary/1", None, Value::Null,
            client.attribution_summary(1));

        // Analytics
        assert_live!(DashboardOverview, "GET" "/api/analytics/overview/1",
            Some("model=time_decay"), Value::Null,
            client.overview(1, AttributionModel::TimeDecay));
        assert_live!(LeadFunnel, "GET" "/api/analytics/funnel/1", None, Value::Null,
            client.funnel(1));
        assert_live!(ChannelBreakdown, "GET" "/api/analytics/revenue-by-channel/1",
            Some("model=linear"), Value::Null,
            client.revenue_by_channel(1, AttributionModel::Linear));
        assert_live!(TopCampaignRanking, "GET" "/api/analytics/top-campaigns/1",
            Some("limit=3"), Value::Null,
            client.top_campaigns(1, 3));
        assert_live!(DealScores, "GET" "/api/analytics/deal-probability/1", None, Value::Null,
            client.deal_probabilities(1));
        assert_live!(BudgetAdvice, "GET" "/api/analytics/budget-optimization/1", None, Value::Null,
            client.budget_recommendations(1));

        // Demo data
        assert_live!(SeedDemoData, "POST" "/api/seed/", None, Value::Null,
            client.seed());

        assert_eq!(recorder.replies.lock().unwrap().len(), ALL.len());
    }
}
