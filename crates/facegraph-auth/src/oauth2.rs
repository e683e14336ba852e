//! OAuth2 authorization code flow for Facebook Login
//!
//! Implements the browser-based code flow with PKCE (RFC 7636) and a local
//! HTTP callback server. Facebook issues no refresh tokens; the replacement
//! is the long-lived token exchange, see [`exchange_for_long_lived`].

use crate::{AuthError, AuthResult};
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    PkceCodeChallenge, PkceCodeVerifier, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use tracing::{debug, info};

/// OAuth2 provider configuration
#[derive(Debug, Clone)]
pub struct OAuth2Config {
    /// App id (OAuth2 client id)
    pub client_id: String,
    /// App secret; optional, the code flow itself runs with PKCE alone
    pub client_secret: Option<String>,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Requested permission scopes
    pub scopes: Vec<String>,
    /// Local port for the OAuth2 callback
    pub redirect_port: u16,
}

/// An issued access token and its expiry
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Access token for Graph API calls
    pub access_token: String,
    /// Token expiration timestamp (Unix seconds)
    pub expires_at: Option<i64>,
}

impl TokenPair {
    /// Check if the access token is expired or about to expire
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let now = chrono::Utc::now().timestamp();
                // Consider expired if less than 5 minutes remaining
                expires_at - now < 300
            }
            None => false,
        }
    }
}

/// Manages an OAuth2 authorization flow
pub struct OAuth2Flow {
    config: OAuth2Config,
    client: BasicClient,
    pkce_verifier: Option<PkceCodeVerifier>,
    csrf_token: Option<CsrfToken>,
}

impl OAuth2Flow {
    /// Create a new OAuth2 flow
    pub fn new(config: OAuth2Config) -> AuthResult<Self> {
        let client_id = ClientId::new(config.client_id.clone());
        let client_secret = config.client_secret.clone().map(ClientSecret::new);
        let auth_url = AuthUrl::new(config.auth_url.clone())
            .map_err(|e| AuthError::InvalidConfig(format!("Invalid auth URL: {}", e)))?;
        let token_url = TokenUrl::new(config.token_url.clone())
            .map_err(|e| AuthError::InvalidConfig(format!("Invalid token URL: {}", e)))?;

        let redirect_url = RedirectUrl::new(format!(
            "http://127.0.0.1:{}/callback",
            config.redirect_port
        ))
        .map_err(|e| AuthError::InvalidConfig(format!("Invalid redirect URL: {}", e)))?;

        let client = BasicClient::new(client_id, client_secret, auth_url, Some(token_url))
            .set_redirect_uri(redirect_url);

        Ok(Self {
            config,
            client,
            pkce_verifier: None,
            csrf_token: None,
        })
    }

    /// Generate the login dialog URL for the user to visit
    pub fn get_auth_url(&mut self) -> String {
        // Generate PKCE challenge
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        // Build authorization request
        let mut auth_request = self
            .client
            .authorize_url(CsrfToken::new_random)
            .set_pkce_challenge(pkce_challenge);

        // Add scopes
        for scope in &self.config.scopes {
            auth_request = auth_request.add_scope(Scope::new(scope.clone()));
        }

        let (auth_url, csrf_token) = auth_request.url();

        // Store verifier and CSRF token for later use
        self.pkce_verifier = Some(pkce_verifier);
        self.csrf_token = Some(csrf_token);

        auth_url.to_string()
    }

    /// Wait for the OAuth2 callback and exchange the code for a token
    ///
    /// This starts a local HTTP server to receive the redirect from the
    /// login dialog after the user grants access.
    pub async fn wait_for_callback(&mut self) -> AuthResult<TokenPair> {
        let pkce_verifier = self
            .pkce_verifier
            .take()
            .ok_or_else(|| AuthError::InvalidConfig("Auth URL not generated".to_string()))?;

        let csrf_token = self
            .csrf_token
            .take()
            .ok_or_else(|| AuthError::InvalidConfig("Auth URL not generated".to_string()))?;

        // Start local server to receive callback
        let listener = TcpListener::bind(format!("127.0.0.1:{}", self.config.redirect_port))
            .map_err(|e| AuthError::CallbackServerFailed(e.to_string()))?;

        info!(
            "Listening for OAuth2 callback on port {}",
            self.config.redirect_port
        );

        listener
            .set_nonblocking(false)
            .map_err(|e| AuthError::CallbackServerFailed(e.to_string()))?;

        // Wait for a connection
        let (mut stream, _) = listener
            .accept()
            .map_err(|e| AuthError::CallbackServerFailed(e.to_string()))?;

        // Read the HTTP request
        let mut reader = BufReader::new(&stream);
        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .map_err(|e| AuthError::CallbackServerFailed(e.to_string()))?;

        debug!("Received callback request: {}", request_line.trim());

        // Parse the authorization code from the URL
        let (code, state) = parse_callback_url(&request_line)?;

        // Verify CSRF token
        if state != *csrf_token.secret() {
            send_http_response(&mut stream, "Error", "Invalid state parameter");
            return Err(AuthError::AuthorizationFailed(
                "CSRF token mismatch".to_string(),
            ));
        }

        // Send success response to browser
        send_http_response(
            &mut stream,
            "Login complete",
            "You can close this window and return to the application.",
        );

        // Exchange authorization code for a token
        let token_response = self
            .client
            .exchange_code(AuthorizationCode::new(code))
            .set_pkce_verifier(pkce_verifier)
            .request_async(oauth2::reqwest::async_http_client)
            .await
            .map_err(|e| AuthError::TokenExchangeFailed(e.to_string()))?;

        // Calculate expiration time
        let expires_at = token_response.expires_in().map(|duration| {
            chrono::Utc::now().timestamp() + duration.as_secs() as i64
        });

        Ok(TokenPair {
            access_token: token_response.access_token().secret().clone(),
            expires_at,
        })
    }
}

/// Exchange a short-lived user token for a long-lived one.
///
/// Facebook's replacement for refresh tokens: the returned token is valid
/// for roughly 60 days. Requires the app secret.
pub async fn exchange_for_long_lived(
    graph_url: &str,
    app_id: &str,
    app_secret: &str,
    access_token: &str,
) -> AuthResult<TokenPair> {
    debug!("Exchanging short-lived token for a long-lived one");

    let response = reqwest::Client::new()
        .get(format!("{}/oauth/access_token", graph_url))
        .query(&[
            ("grant_type", "fb_exchange_token"),
            ("client_id", app_id),
            ("client_secret", app_secret),
            ("fb_exchange_token", access_token),
        ])
        .send()
        .await
        .map_err(|e| AuthError::TokenExchangeFailed(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| AuthError::TokenExchangeFailed(e.to_string()))?;

    if !status.is_success() {
        return Err(AuthError::TokenExchangeFailed(format!(
            "status {}: {}",
            status.as_u16(),
            body
        )));
    }

    let exchanged: ExchangeResponse = serde_json::from_str(&body)
        .map_err(|e| AuthError::TokenExchangeFailed(format!("unexpected response: {}", e)))?;

    let expires_at = exchanged
        .expires_in
        .map(|seconds| chrono::Utc::now().timestamp() + seconds);

    info!("Long-lived token obtained");
    Ok(TokenPair {
        access_token: exchanged.access_token,
        expires_at,
    })
}

#[derive(Deserialize)]
struct ExchangeResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

/// Parse the authorization code and state from a callback request line
fn parse_callback_url(request_line: &str) -> AuthResult<(String, String)> {
    // Request line format: "GET /callback?code=xxx&state=yyy HTTP/1.1"
    let parts: Vec<&str> = request_line.split_whitespace().collect();
    if parts.len() < 2 {
        return Err(AuthError::AuthorizationFailed(
            "Invalid callback request".to_string(),
        ));
    }

    let path = parts[1];
    let url = url::Url::parse(&format!("http://localhost{}", path))
        .map_err(|e| AuthError::AuthorizationFailed(format!("Invalid callback URL: {}", e)))?;

    let mut code = None;
    let mut state = None;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.to_string()),
            "state" => state = Some(value.to_string()),
            "error" => {
                let description = url
                    .query_pairs()
                    .find(|(k, _)| k == "error_description")
                    .map(|(_, v)| v.to_string())
                    .unwrap_or_else(|| value.to_string());
                return Err(AuthError::AuthorizationFailed(description));
            }
            _ => {}
        }
    }

    match (code, state) {
        (Some(c), Some(s)) => Ok((c, s)),
        _ => Err(AuthError::AuthorizationFailed(
            "Missing code or state in callback".to_string(),
        )),
    }
}

/// Send an HTTP response to the browser
fn send_http_response(stream: &mut std::net::TcpStream, title: &str, message: &str) {
    let body = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <title>{}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; text-align: center; padding-top: 4rem; }}
        p {{ color: #666; }}
    </style>
</head>
<body>
    <h1>{}</h1>
    <p>{}</p>
</body>
</html>"#,
        title, title, message
    );

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );

    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
