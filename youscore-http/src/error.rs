//! Error types for the caching and editing layers.

use thiserror::Error;

/// Boxed error used where the concrete type belongs to a collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A body could not be read in full.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The request body failed while being buffered for fingerprinting.
    ///
    /// The request is never dispatched.
    #[error("failed to read request body")]
    Request(#[source] BoxError),

    /// The response body failed while being buffered for caching.
    #[error("failed to read response body")]
    Response(#[source] BoxError),
}

/// A request editor rejected the request.
#[derive(Debug, Error)]
#[error("request editor `{editor}` failed")]
pub struct EditorError {
    /// Name of the failing editor.
    pub editor: String,
    /// What went wrong.
    #[source]
    pub source: BoxError,
}
