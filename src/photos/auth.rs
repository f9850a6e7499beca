use std::{future::Future, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tracing::debug;

use crate::{
    error::{Error, Result},
    types::{ClientCredentials, Token, TokenResponse},
};

/// The provider side of the authorization-code grant.
pub trait AuthProvider: Send + Sync {
    /// URL the operator opens in a browser; `state` comes back on the callback.
    fn authorization_url(&self, state: &str) -> String;

    /// Trades an authorization code for a token at the token endpoint.
    fn exchange_code(&self, code: &str) -> impl Future<Output = Result<Token>> + Send;
}

pub struct GoogleAuthProvider {
    client: Client,
    credentials: ClientCredentials,
    scopes: Vec<String>,
}

impl GoogleAuthProvider {
    pub fn new(credentials: ClientCredentials, scopes: Vec<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(GoogleAuthProvider {
            client,
            credentials,
            scopes,
        })
    }

    pub fn redirect_uri(&self) -> &str {
        self.credentials
            .redirect_uris
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

impl AuthProvider for GoogleAuthProvider {
    fn authorization_url(&self, state: &str) -> String {
        let scope = self.scopes.join(" ");
        let params = [
            ("client_id", self.credentials.client_id.as_str()),
            ("redirect_uri", self.redirect_uri()),
            ("response_type", "code"),
            ("scope", scope.as_str()),
            ("state", state),
            ("access_type", "offline"),
        ];

        match Url::parse_with_params(&self.credentials.auth_uri, &params) {
            Ok(url) => url.to_string(),
            // auth_uri is not a valid absolute URL; let the browser complain
            Err(_) => format!("{}?state={state}", self.credentials.auth_uri),
        }
    }

    async fn exchange_code(&self, code: &str) -> Result<Token> {
        let response = self
            .client
            .post(&self.credentials.token_uri)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.credentials.client_id.as_str()),
                ("client_secret", self.credentials.client_secret.as_str()),
                ("redirect_uri", self.redirect_uri()),
            ])
            .send()
            .await
            .map_err(|e| Error::Exchange(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Exchange(e.to_string()))?;
        if !status.is_success() {
            return Err(Error::Exchange(format!("token endpoint returned {status}: {body}")));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| Error::Exchange(format!("malformed token response: {e}")))?;
        debug!(has_refresh = token.refresh_token.is_some(), "exchanged authorization code");
        Ok(token.into_token(Utc::now()))
    }
}
