use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};

/// Length of the anti-forgery `state` parameter minted per authorization.
pub const STATE_LENGTH: usize = 32;

pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(STATE_LENGTH)
        .map(char::from)
        .collect()
}

/// Title used by `albums create` when none is given, e.g.
/// `test-album-2024-05-01-13-37-00`.
pub fn default_album_title(now: DateTime<Utc>) -> String {
    format!("test-album-{}", now.format("%Y-%m-%d-%H-%M-%S"))
}

/// Joins a base URL and a path segment without doubling the slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
