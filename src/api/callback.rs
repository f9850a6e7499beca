use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::Error;

const SUCCESS_PAGE: &str = "<html><body><h1>Authorization Successful!</h1>\
<p>You can close this window now.</p><script>window.close();</script></body></html>";

const FAILURE_PAGE: &str = "<html><body><h4>Authorization failed.</h4>\
<p>Return to the terminal for details.</p></body></html>";

/// Per-attempt state shared with the callback route.
///
/// Both channels have capacity one and are written with `try_send`, so only
/// the first outcome of an attempt is kept and the handler never waits on the
/// controller.
#[derive(Clone)]
pub struct CallbackState {
    pub expected_state: Arc<str>,
    pub code_tx: mpsc::Sender<String>,
    pub error_tx: mpsc::Sender<Error>,
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    State(shared): State<CallbackState>,
) -> (StatusCode, Html<&'static str>) {
    match validate(&params, &shared.expected_state) {
        Ok(code) => {
            debug!("authorization code received");
            let _ = shared.code_tx.try_send(code);
            (StatusCode::OK, Html(SUCCESS_PAGE))
        }
        Err(e) => {
            warn!(error = %e, "rejected OAuth callback");
            let _ = shared.error_tx.try_send(e);
            (StatusCode::BAD_REQUEST, Html(FAILURE_PAGE))
        }
    }
}

/// Checks the callback parameters in order: provider error, state, code.
pub fn validate(params: &HashMap<String, String>, expected_state: &str) -> Result<String, Error> {
    if let Some(reason) = params.get("error").filter(|e| !e.is_empty()) {
        return Err(Error::Callback(reason.clone()));
    }

    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(Error::InvalidState);
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => Ok(code.clone()),
        _ => Err(Error::MissingCode),
    }
}
