use std::{net::SocketAddr, time::Duration};

use axum::{Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle};
use tracing::{debug, warn};

use crate::{
    api::{self, CallbackState},
    error::{Error, Result},
};

pub const CALLBACK_PATH: &str = "/oauth2callback";

/// Grace period for in-flight browser connections once an outcome is known.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// The running local listener that receives the OAuth redirect.
///
/// `shutdown` consumes the handle, so a listener is stopped at most once.
pub struct CallbackServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

pub fn router(state: CallbackState) -> Router {
    Router::new()
        .route(CALLBACK_PATH, get(api::callback))
        .with_state(state)
}

pub async fn start_callback_server(addr: SocketAddr, state: CallbackState) -> Result<CallbackServer> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Callback(format!("failed to bind {addr}: {e}")))?;
    let addr = listener
        .local_addr()
        .map_err(|e| Error::Callback(format!("failed to read listener address: {e}")))?;

    let error_tx = state.error_tx.clone();
    let app = router(state);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await;
        if let Err(e) = served {
            let _ = error_tx.try_send(Error::Callback(format!("server error: {e}")));
        }
    });

    debug!(%addr, "callback server listening");
    Ok(CallbackServer {
        addr,
        shutdown_tx,
        handle,
    })
}

impl CallbackServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stops accepting connections and waits up to `grace` for open ones to
    /// finish, then aborts the server task. The listening socket is closed
    /// when this returns.
    pub async fn shutdown(self, grace: Duration) {
        let _ = self.shutdown_tx.send(());
        let mut handle = self.handle;

        match tokio::time::timeout(grace, &mut handle).await {
            Ok(Ok(())) => debug!(addr = %self.addr, "callback server stopped"),
            Ok(Err(e)) => warn!(error = %e, "callback server task failed"),
            Err(_) => {
                warn!(
                    grace_secs = grace.as_secs(),
                    "callback server did not drain in time, aborting"
                );
                handle.abort();
                let _ = handle.await;
            }
        }
    }
}
