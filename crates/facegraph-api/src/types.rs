use serde::Deserialize;

/// Response wrapper for Graph API connection (list) endpoints
#[derive(Debug, Deserialize)]
pub struct GraphListResponse<T> {
    pub data: Vec<T>,
    pub paging: Option<Paging>,
}

/// Cursor links for paged connections
#[derive(Debug, Clone, Deserialize)]
pub struct Paging {
    pub previous: Option<String>,
    pub next: Option<String>,
}

/// Core profile fields of a user node
#[derive(Debug, Clone, Deserialize)]
pub struct GraphProfile {
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub link: Option<String>,
}

/// A friend entry from the friends connection
#[derive(Debug, Clone, Deserialize)]
pub struct GraphFriend {
    pub id: String,
    pub name: Option<String>,
}

/// A feed entry (lightweight, no comment/like counts)
#[derive(Debug, Clone, Deserialize)]
pub struct GraphPost {
    pub id: String,
    pub from: Option<GraphActor>,
    pub message: Option<String>,
    pub story: Option<String>,
    pub created_time: Option<String>,
}

/// The user or page that produced a post
#[derive(Debug, Clone, Deserialize)]
pub struct GraphActor {
    pub id: String,
    pub name: Option<String>,
}

/// Response from publish operations
#[derive(Debug, Deserialize)]
pub struct PublishResponse {
    pub id: String,
}
