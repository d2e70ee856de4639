//! Login, signup, demo entry and logout.

use std::sync::Arc;
use thiserror::Error;

use super::guard::Route;
use crate::client::{Fetched, ResilientClient, Unavailable};
use crate::fallback::{OFFLINE_TOKEN, OFFLINE_USER_ID};
use crate::session::{SessionError, SessionStore};

/// Errors a login or signup form can show
#[derive(Error, Debug)]
pub enum AuthError {
    /// Missing form fields; no request was issued
    #[error("{0}")]
    Validation(String),

    #[error("Failed to store session: {0}")]
    Session(#[from] SessionError),
}

/// Successful entry into the app
#[derive(Debug, Clone, PartialEq)]
pub struct SignedIn {
    pub redirect: Route,
    /// True when the stored token is the offline marker
    pub offline: bool,
    /// Backend failure behind an offline entry, if one happened
    pub reason: Option<Unavailable>,
}

pub struct AuthFlow {
    client: ResilientClient,
    session: Arc<SessionStore>,
}

impl AuthFlow {
    pub fn new(client: ResilientClient, session: Arc<SessionStore>) -> Self {
        Self { client, session }
    }

    /// Log in. Any backend failure enters offline mode instead of erroring.
    pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Please enter your email and password.".to_string(),
            ));
        }

        let token = self.client.login(email, password).await;
        self.enter(token.map(|t| t.access_token)).await
    }

    /// Create an account, then log in with the same credentials
    pub async fn signup(&self, email: &str, password: &str, full_name: &str) -> Result<SignedIn, AuthError> {
        if email.is_empty() || password.is_empty() || full_name.is_empty() {
            return Err(AuthError::Validation(
                "Please fill in your name, email and password.".to_string(),
            ));
        }

        let account = self.client.signup(email, password, full_name).await;
        if let Fetched::Fallback { reason, .. } = account {
            return self
                .enter(Fetched::Fallback {
                    value: OFFLINE_TOKEN.to_string(),
                    reason,
                })
                .await;
        }

        tracing::info!(email, "Account created");
        let token = self.client.login(email, password).await;
        self.enter(token.map(|t| t.access_token)).await
    }

    /// Load demo data if a backend is there, then enter offline mode
    pub async fn demo(&self) -> Result<SignedIn, AuthError> {
        let seeded = self.client.seed().await;
        if seeded.is_live() {
            tracing::info!("Demo data seeded: {}", seeded.value().message);
        }

        self.session.sign_in(OFFLINE_TOKEN, OFFLINE_USER_ID).await?;
        Ok(SignedIn {
            redirect: Route::Dashboard,
            offline: true,
            reason: seeded.reason().cloned(),
        })
    }

    /// Clear the session; the caller navigates to the returned route
    pub async fn logout(&self) -> Result<Route, AuthError> {
        self.session.clear().await?;
        tracing::info!("Logged out");
        Ok(Route::Login)
    }

    async fn enter(&self, token: Fetched<String>) -> Result<SignedIn, AuthError> {
        let reason = token.reason().cloned();
        let token = token.into_inner();
        let offline = token == OFFLINE_TOKEN;

        self.session.sign_in(token, OFFLINE_USER_ID).await?;

        if offline {
            tracing::info!("Signed in offline; dashboards will show sample data");
        } else {
            tracing::info!("Signed in");
        }

        Ok(SignedIn {
            redirect: Route::Dashboard,
            offline,
            reason,
        })
    }
}
