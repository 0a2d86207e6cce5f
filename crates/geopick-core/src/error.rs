// crates/geopick-core/src/error.rs

use thiserror::Error;

/// Errors produced by providers, and passed through unchanged by the
/// repository and the selection session.
///
/// `Cancelled` is kept apart from the data errors so a caller that
/// supersedes a request (for example a picker reacting to a newer
/// selection) can tell "request was dropped" from "request failed" and stay
/// quiet about the former. See [`GeoError::is_cancelled`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoError {
    /// The configured base URL (plus path) does not form a usable URL.
    #[error("Invalid base URL.")]
    InvalidBaseUrl,

    /// The transport did not produce an HTTP response at all.
    #[error("Invalid server response.")]
    InvalidResponse,

    /// The server answered with a status outside `200..=299`.
    #[error("Request failed (HTTP {0}).")]
    HttpStatus(u16),

    /// The payload could not be decoded into the expected shape.
    #[error("Failed to decode server response.")]
    DecodingFailed,

    /// A bundled dataset could not be located.
    #[error("Missing bundled resource: {0}.")]
    ResourceMissing(String),

    /// The operation was cancelled while in flight.
    #[error("Request cancelled.")]
    Cancelled,
}

impl GeoError {
    /// `true` for [`GeoError::Cancelled`].
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GeoError::Cancelled)
    }
}

impl From<serde_json::Error> for GeoError {
    fn from(_: serde_json::Error) -> Self {
        GeoError::DecodingFailed
    }
}

pub type Result<T> = std::result::Result<T, GeoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_user_facing_text() {
        assert_eq!(GeoError::HttpStatus(503).to_string(), "Request failed (HTTP 503).");
        assert_eq!(
            GeoError::ResourceMissing("countries+states+cities.json".into()).to_string(),
            "Missing bundled resource: countries+states+cities.json."
        );
        assert_eq!(GeoError::Cancelled.to_string(), "Request cancelled.");
    }

    #[test]
    fn only_cancelled_is_cancelled() {
        assert!(GeoError::Cancelled.is_cancelled());
        assert!(!GeoError::DecodingFailed.is_cancelled());
        assert!(!GeoError::HttpStatus(499).is_cancelled());
    }

    #[test]
    fn json_errors_become_decoding_failures() {
        let err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert_eq!(GeoError::from(err), GeoError::DecodingFailed);
    }
}
