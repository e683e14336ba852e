//! Interactive Facebook Login flow
//!
//! Run with: FB_APP_ID=... FB_APP_SECRET=... cargo run -p facegraph-auth --example login

use facegraph_auth::{exchange_for_long_lived, facebook, OAuth2Flow};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let app_id = std::env::var("FB_APP_ID")?;
    let app_secret = std::env::var("FB_APP_SECRET").ok();

    let config = facebook::oauth2_config(&app_id, app_secret.as_deref());
    let mut flow = OAuth2Flow::new(config)?;

    println!("Open this URL in your browser:\n\n  {}\n", flow.get_auth_url());
    println!("Waiting for the login dialog to redirect...");

    let token = flow.wait_for_callback().await?;
    println!("Got access token ({} chars)", token.access_token.len());
    if let Some(expires_at) = token.expires_at {
        println!("Expires at (unix): {}", expires_at);
    }

    // With an app secret we can trade it in for a ~60 day token
    if let Some(secret) = app_secret.as_deref() {
        let long_lived =
            exchange_for_long_lived(facebook::GRAPH_URL, &app_id, secret, &token.access_token)
                .await?;
        println!(
            "Long-lived token obtained ({} chars)",
            long_lived.access_token.len()
        );
    }

    Ok(())
}
