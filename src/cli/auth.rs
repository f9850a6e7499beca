use std::io::Write;

use crate::{
    error::Result,
    info,
    management::{AuthStatus, AuthorizationPrompt, OAuthFlow, TokenStore},
    photos::auth::AuthProvider,
    success, warning,
};

/// How `photoscli auth` should obtain the authorization code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    /// Catch the redirect on the local callback listener.
    LocalServer { open_browser: bool },
    /// Only print the URL; the operator comes back with `--code`.
    PrintUrl,
    /// Exchange a code the operator copied from the browser.
    Code(String),
}

pub async fn auth<P: AuthProvider, S: TokenStore>(flow: &OAuthFlow<P, S>, mode: AuthMode) -> Result<()> {
    match mode {
        AuthMode::Code(code) => {
            flow.complete_with_code(&code).await?;
        }
        AuthMode::PrintUrl => {
            let (url, _state) = flow.authorization_url();
            info!("Visit this URL in your browser to authorize:\n{}", url);
            info!("Then run: photoscli auth --code <CODE>");
            return Ok(());
        }
        AuthMode::LocalServer { open_browser } => {
            flow.complete_with_local_server(|prompt: &AuthorizationPrompt| {
                info!("Listening for the OAuth callback on http://{}", prompt.listening_on);
                info!("Visit this URL in your browser to authorize:\n{}", prompt.url);
                if open_browser && webbrowser::open(&prompt.url).is_err() {
                    warning!("Failed to open browser. Please open the URL above manually.");
                }
            })
            .await?;
        }
    }

    success!("Authentication successful!");
    Ok(())
}

/// Reports whether a usable token is stored, without starting a flow.
pub async fn status<P: AuthProvider, S: TokenStore>(
    flow: &OAuthFlow<P, S>,
    out: &mut impl Write,
) -> Result<bool> {
    match flow.authenticate().await? {
        AuthStatus::Authorized(token) => {
            writeln!(out, "Authorized. Token valid until {}", token.expiry)?;
            Ok(true)
        }
        AuthStatus::AuthorizationRequired(reason) => {
            writeln!(out, "Authorization required: {reason}")?;
            Ok(false)
        }
    }
}
