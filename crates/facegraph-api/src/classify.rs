//! Translation of Graph API error responses into typed errors
//!
//! The API's numeric error codes and `type` field are unreliable, so the
//! mapping works off the human-readable message text. The one exception is
//! status 401, which the API does use consistently and which wins over any
//! message match.

use reqwest::StatusCode;

use crate::envelope::ErrorDetails;
use crate::error::GraphError;

/// Placeholder message when a failing response carried no usable envelope
pub const NO_DETAILS_MESSAGE: &str = "No error details from Facebook";

/// Exact messages that indicate the session was invalidated server-side
const SESSION_INVALIDATED_MESSAGES: [&str; 3] = [
    "The session has been invalidated because the user has changed the password.",
    "Error validating access token: Session does not match current stored session. \
     This may be because the user changed the password since the time the session \
     was created or Facebook has changed the session for security reasons.",
    "Error validating access token: The session is invalid because the user logged out.",
];

/// Map a failing response to a typed error. Total: every call returns some
/// error, falling back to [`GraphError::Uncategorized`].
pub fn classify_response(status: StatusCode, details: Option<&ErrorDetails>) -> GraphError {
    if status == StatusCode::UNAUTHORIZED {
        return GraphError::InvalidAuthorization {
            message: details.and_then(|d| d.message.clone()),
        };
    }

    if let Some(message) = details.and_then(|d| d.message.as_deref()) {
        if let Some(error) = classify_message(message) {
            return error;
        }
        return GraphError::Uncategorized {
            status: status.as_u16(),
            message: message.to_string(),
        };
    }

    GraphError::Uncategorized {
        status: status.as_u16(),
        message: NO_DETAILS_MESSAGE.to_string(),
    }
}

/// Match an error message against the known patterns, in order.
pub fn classify_message(message: &str) -> Option<GraphError> {
    if message.contains("Requires extended permission") {
        // "(#200) Requires extended permission: read_stream" - the
        // permission name follows the first ": "
        let permission = message.split(": ").nth(1).unwrap_or(message);
        return Some(GraphError::InsufficientPermission {
            permission: permission.to_string(),
        });
    }
    if message == "The member must be a friend of the current user." {
        return Some(GraphError::NotAFriend(message.to_string()));
    }
    if message.contains("Unknown path components") {
        return Some(GraphError::ResourceNotFound(message.to_string()));
    }
    if message == "User must be an owner of the friendlist" {
        return Some(GraphError::ResourceOwnership(message.to_string()));
    }
    if message.contains("Some of the aliases you requested do not exist") {
        return Some(GraphError::ResourceNotFound(message.to_string()));
    }
    if message.contains("Session has expired") {
        return Some(GraphError::ExpiredAuthorization);
    }
    if SESSION_INVALIDATED_MESSAGES.contains(&message) {
        return Some(GraphError::InvalidAuthorization {
            message: Some(message.to_string()),
        });
    }
    if message.contains("has not authorized application") {
        return Some(GraphError::InvalidAuthorization {
            message: Some(message.to_string()),
        });
    }
    None
}
