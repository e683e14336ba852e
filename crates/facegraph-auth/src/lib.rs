//! Authentication module for the Facebook Graph API
//!
//! Provides the OAuth2 authorization code flow with PKCE and a local
//! callback server, long-lived token exchange, and decoding of
//! `signed_request` payloads.

mod error;
mod oauth2;
mod signed_request;

pub use error::{AuthError, AuthResult};
pub use oauth2::{exchange_for_long_lived, OAuth2Config, OAuth2Flow, TokenPair};
pub use signed_request::{decode_signed_request, SignedRequest};

/// Facebook OAuth2 configuration
pub mod facebook {
    use super::OAuth2Config;

    /// Graph API host, also serves the token endpoints
    pub const GRAPH_URL: &str = "https://graph.facebook.com/v19.0";

    /// Login dialog shown to the user
    pub const AUTH_URL: &str = "https://www.facebook.com/v19.0/dialog/oauth";

    /// Token endpoint
    pub const TOKEN_URL: &str = "https://graph.facebook.com/v19.0/oauth/access_token";

    /// Default scopes: basic profile and email address
    pub const DEFAULT_SCOPES: &[&str] = &["public_profile", "email"];

    /// Create a Facebook OAuth2 configuration
    ///
    /// Note: You must register your own app at
    /// https://developers.facebook.com/apps and pass its app id here.
    /// The app secret is only needed for long-lived token exchange.
    pub fn oauth2_config(app_id: &str, app_secret: Option<&str>) -> OAuth2Config {
        OAuth2Config {
            client_id: app_id.to_string(),
            client_secret: app_secret.map(str::to_string),
            auth_url: AUTH_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            redirect_port: 8855,
        }
    }
}
