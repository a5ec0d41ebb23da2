//! Sign-in and sign-out against the auth framework.
//!
//! These endpoints are not envelope-wrapped. Sign-in answers with a redirect
//! and a session cookie; whether it worked is decided by asking for the
//! session afterwards.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use questboard_core::models::SessionUser;
use questboard_core::{Error, Result};

use crate::client::ApiClient;
use crate::endpoints;

/// `{ csrfToken }` from the auth framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsrfToken {
    pub csrf_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CredentialsRequest<'a> {
    login_id: &'a str,
    password_digest: &'a str,
    callback_url: String,
    csrf_token: &'a str,
}

impl ApiClient {
    /// Fetch a CSRF token.
    #[instrument(skip(self))]
    pub async fn csrf_token(&self) -> Result<CsrfToken> {
        let token: CsrfToken = self.get_plain(endpoints::AUTH_CSRF).await?;
        if token.csrf_token.is_empty() {
            return Err(Error::malformed("empty csrfToken"));
        }
        Ok(token)
    }

    /// Sign in with a login id and password, returning the session's user.
    #[instrument(skip(self, password))]
    pub async fn sign_in(&self, login_id: &str, password: &str) -> Result<SessionUser> {
        let csrf = self.csrf_token().await?;
        let body = CredentialsRequest {
            login_id,
            password_digest: password,
            callback_url: format!("{}/user/summary", self.base_url().as_url().path()),
            csrf_token: &csrf.csrf_token,
        };

        let request = self
            .request(reqwest::Method::POST, endpoints::AUTH_SIGN_IN)
            .json(&body);
        self.send_unwrapped(request).await?;

        match self.session_info().await {
            Ok(user) => {
                info!(user = %user.id, "signed in");
                Ok(user)
            }
            Err(err) => {
                warn!(error = %err, "sign-in did not produce a session");
                Err(err)
            }
        }
    }

    /// End the current session.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        let csrf = self.csrf_token().await?;
        let request = self
            .request(reqwest::Method::POST, endpoints::AUTH_SIGN_OUT)
            .form(&csrf);
        self.send_unwrapped(request).await?;
        info!("signed out");
        Ok(())
    }
}
