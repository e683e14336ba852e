use thiserror::Error;

/// Result type for Graph API operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised by Graph API calls.
///
/// The first six variants are the typed failures produced by the response
/// classifier; the remaining ones cover transport and decoding problems on
/// the client side.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The access token is malformed, revoked, or otherwise unusable
    #[error("Authorization is invalid")]
    InvalidAuthorization { message: Option<String> },

    /// The session behind the access token has expired
    #[error("Authorization has expired")]
    ExpiredAuthorization,

    /// The operation needs a permission the user has not granted
    #[error("Requires extended permission: {permission}")]
    InsufficientPermission { permission: String },

    /// The target user is not a friend of the authenticated user
    #[error("{0}")]
    NotAFriend(String),

    /// The requested object or connection does not exist
    #[error("{0}")]
    ResourceNotFound(String),

    /// The authenticated user does not own the target resource
    #[error("{0}")]
    ResourceOwnership(String),

    /// An error response that matched no known message pattern
    #[error("Graph API error {status}: {message}")]
    Uncategorized { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// A successful response whose body did not deserialize as expected
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The app secret could not be used as an HMAC key
    #[error("Invalid app secret: {0}")]
    InvalidAppSecret(String),
}
