//! Shared utilities: random cookie values, HTTP dates, entity tags.

use chrono::{DateTime, Utc};
use rand::RngExt;
use uuid::Uuid;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random alphanumeric string of the given length.
///
/// # Examples
///
/// ```
/// use echohub_core::utils::random_value;
///
/// let v = random_value(6);
/// assert_eq!(v.len(), 6);
/// assert!(v.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
#[must_use]
pub fn random_value(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Format a timestamp as an HTTP date (`Sun, 06 Nov 1994 08:49:37 GMT`).
///
/// # Examples
///
/// ```
/// use echohub_core::utils::http_date;
///
/// let date = http_date(chrono::Utc::now());
/// assert!(date.ends_with("GMT"));
/// ```
#[must_use]
pub fn http_date(t: DateTime<Utc>) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Generate a quoted entity tag for cache validation responses.
#[must_use]
pub fn generate_etag() -> String {
    format!("\"{}\"", Uuid::new_v4().simple())
}
