//! OAuth authorization-code flow controller.
//!
//! Decides whether a stored token can be used and, when it cannot, drives the
//! interactive exchange: either manually (the operator pastes the code) or via
//! a temporary local listener that catches the browser redirect.
//!
//! ```text
//! NoToken ──┐
//!           ├─> AwaitingAuthorization ──> Authorized
//! Expired ──┘
//! Valid ───────────────────────────────> Authorized
//! ```
//!
//! Expired tokens are reported, not refreshed, even when a refresh token was
//! stored.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::{
    api::CallbackState,
    config,
    error::{Error, Result},
    management::TokenStore,
    photos::auth::AuthProvider,
    server::{self, SHUTDOWN_GRACE},
    types::Token,
    utils,
};

/// Why a new authorization is needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequired {
    NoToken,
    Expired,
}

impl std::fmt::Display for AuthRequired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthRequired::NoToken => write!(f, "no token stored"),
            AuthRequired::Expired => write!(f, "stored token has expired"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthStatus {
    Authorized(Token),
    AuthorizationRequired(AuthRequired),
}

/// Listener settings for [`OAuthFlow::complete_with_local_server`].
#[derive(Debug, Clone, Copy)]
pub struct CallbackSettings {
    pub addr: SocketAddr,
    pub timeout: Duration,
    pub shutdown_grace: Duration,
}

impl CallbackSettings {
    pub fn new(addr: SocketAddr, timeout: Duration) -> Self {
        CallbackSettings {
            addr,
            timeout,
            shutdown_grace: SHUTDOWN_GRACE,
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self::new(config::callback_addr()?, config::auth_timeout()?))
    }
}

/// What the operator needs in order to authorize: handed to the caller once
/// the listener is up.
#[derive(Debug, Clone)]
pub struct AuthorizationPrompt {
    pub url: String,
    pub listening_on: SocketAddr,
}

pub struct OAuthFlow<P, S> {
    provider: P,
    store: S,
    settings: CallbackSettings,
}

impl<P: AuthProvider, S: TokenStore> OAuthFlow<P, S> {
    pub fn new(provider: P, store: S, settings: CallbackSettings) -> Self {
        OAuthFlow {
            provider,
            store,
            settings,
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn authenticate(&self) -> Result<AuthStatus> {
        info!("checking stored OAuth token");

        let token = match self.store.load().await {
            Ok(token) => token,
            Err(Error::NotFound(_)) => {
                info!("no existing token found, authorization required");
                return Ok(AuthStatus::AuthorizationRequired(AuthRequired::NoToken));
            }
            Err(Error::Decode(e)) => {
                warn!(error = %e, "stored token is malformed, authorization required");
                return Ok(AuthStatus::AuthorizationRequired(AuthRequired::NoToken));
            }
            Err(Error::Persist(e)) => {
                warn!(error = %e, "stored token is unreadable, authorization required");
                return Ok(AuthStatus::AuthorizationRequired(AuthRequired::NoToken));
            }
            Err(e) => return Err(e),
        };

        if token.is_valid() {
            info!(expiry = %token.expiry, "valid token found");
            Ok(AuthStatus::Authorized(token))
        } else {
            info!(
                expiry = %token.expiry,
                has_refresh = token.refresh_token.is_some(),
                "token expired, authorization required"
            );
            Ok(AuthStatus::AuthorizationRequired(AuthRequired::Expired))
        }
    }

    /// Authorization URL for the manual flow, with the state it embeds.
    pub fn authorization_url(&self) -> (String, String) {
        let state = utils::generate_state();
        (self.provider.authorization_url(&state), state)
    }

    pub async fn complete_with_code(&self, code: &str) -> Result<Token> {
        info!("exchanging authorization code");

        let token = self.provider.exchange_code(code).await.inspect_err(|e| {
            warn!(error = %e, "failed to exchange code for token");
        })?;

        self.store.save(&token).await.inspect_err(|e| {
            warn!(error = %e, "failed to save token, it is lost");
        })?;

        info!(expiry = %token.expiry, "authorization completed");
        Ok(token)
    }

    /// Runs the authorization-code flow with a local listener catching the
    /// redirect.
    ///
    /// `on_ready` is called once the listener is bound. Whichever comes first
    /// of a code, a callback error or the timeout decides the outcome; the
    /// listener is shut down before this returns in every case.
    pub async fn complete_with_local_server<F>(&self, on_ready: F) -> Result<Token>
    where
        F: FnOnce(&AuthorizationPrompt),
    {
        let state = utils::generate_state();
        let url = self.provider.authorization_url(&state);

        let (code_tx, mut code_rx) = mpsc::channel::<String>(1);
        let (error_tx, mut error_rx) = mpsc::channel::<Error>(1);
        let callback_state = CallbackState {
            expected_state: Arc::from(state.as_str()),
            code_tx,
            error_tx,
        };

        let server = server::start_callback_server(self.settings.addr, callback_state).await?;
        info!(addr = %server.local_addr(), "waiting for OAuth callback");
        on_ready(&AuthorizationPrompt {
            url,
            listening_on: server.local_addr(),
        });

        let outcome = tokio::select! {
            Some(code) = code_rx.recv() => Ok(code),
            Some(e) = error_rx.recv() => Err(e),
            _ = tokio::time::sleep(self.settings.timeout) => {
                Err(Error::Timeout(self.settings.timeout))
            }
        };

        server.shutdown(self.settings.shutdown_grace).await;

        match outcome {
            Ok(code) => self.complete_with_code(&code).await,
            Err(e) => {
                warn!(error = %e, "OAuth flow did not complete");
                Err(e)
            }
        }
    }
}
