//! Fetch the authenticated user's profile and friend list
//!
//! Run with: FB_ACCESS_TOKEN=... cargo run -p facegraph-api --example fetch_profile

use facegraph_api::GraphClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let token = std::env::var("FB_ACCESS_TOKEN")?;
    let client = GraphClient::new(token);

    println!("Fetching profile...");
    let profile = client.get_profile().await?;
    println!(
        "Logged in as: {} (id {})",
        profile.name.as_deref().unwrap_or("<no name>"),
        profile.id
    );

    println!("\nFetching friends...");
    let (friends, next) = client.get_friends().await?;
    println!(
        "Found {} friends{}",
        friends.len(),
        if next.is_some() { " (more pages available)" } else { "" }
    );
    for friend in &friends {
        println!("  {}", friend.name.as_deref().unwrap_or(&friend.id));
    }

    Ok(())
}
