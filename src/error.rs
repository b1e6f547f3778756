use std::time::Duration;

use thiserror::Error;

/// Error type returned by every fallible operation in this crate.
///
/// The variants keep network-level failures, envelope-shape failures and
/// server-reported failures apart so callers can match on what actually
/// went wrong.
#[derive(Debug, Error)]
pub enum CreosonError {
    /// The builder was given settings that cannot form a working client.
    #[error("invalid configuration: {reason}")]
    Config { reason: String },

    /// The HTTP request could not be completed at all.
    #[error("transport failed for `{url}`: {reason}")]
    Transport { url: String, reason: String },

    /// The request exceeded the configured timeout.
    #[error("request timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// The server answered with a non-success HTTP status code.
    #[error("server returned HTTP status {status}")]
    HttpStatus { status: u16 },

    /// A request payload could not be serialized to JSON.
    #[error("request encode failed: {reason}")]
    Encode { reason: String },

    /// The response body is not valid JSON, or a payload does not fit the
    /// declared model type.
    #[error("response decode failed: {reason}")]
    Decode { reason: String },

    /// An otherwise well-formed response is missing an expected envelope
    /// key or data field.
    #[error("response missing expected field `{field}`")]
    MissingField { field: String },

    /// The server reported `status.error == true`. The message is carried
    /// verbatim.
    #[error("{message}")]
    Api { message: String },

    /// A parameter value is outside its fixed allowed set. Raised locally,
    /// before any network call.
    #[error("invalid value `{value}` for {param}; expected one of: {allowed}")]
    Validation {
        param: &'static str,
        value: String,
        allowed: &'static str,
    },

    /// The session lock was poisoned by a panic on another thread.
    #[error("session lock poisoned")]
    InternalPoisoned,

    /// The blocking wrapper could not build or drive its runtime.
    #[error("blocking runtime failed: {reason}")]
    Runtime { reason: String },
}
