use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use tracing::{debug, info};

use crate::classify;
use crate::envelope;
use crate::error::{GraphError, GraphResult};
use crate::types::*;

const GRAPH_BASE: &str = "https://graph.facebook.com/v19.0";

/// Profile fields to request explicitly (the API returns a minimal set otherwise)
const PROFILE_FIELDS: &str = "id,name,first_name,last_name,email,link";

type HmacSha256 = Hmac<Sha256>;

pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
    appsecret_proof: Option<String>,
}

impl GraphClient {
    pub fn new(access_token: String) -> Self {
        Self::with_base_url(access_token, GRAPH_BASE.to_string())
    }

    /// Create a client against a non-default Graph endpoint
    pub fn with_base_url(access_token: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            access_token,
            appsecret_proof: None,
        }
    }

    /// Attach an `appsecret_proof` parameter to every request, for apps
    /// with "Require App Secret" enabled. The proof is the HMAC-SHA256 of
    /// the access token keyed with the app secret, hex encoded.
    pub fn with_app_secret(mut self, app_secret: &str) -> GraphResult<Self> {
        let mut mac = HmacSha256::new_from_slice(app_secret.as_bytes())
            .map_err(|e| GraphError::InvalidAppSecret(e.to_string()))?;
        mac.update(self.access_token.as_bytes());
        self.appsecret_proof = Some(hex::encode(mac.finalize().into_bytes()));
        Ok(self)
    }

    /// Fetch a single object by id or path, e.g. "me" or "123456"
    pub async fn get_object<T: DeserializeOwned>(&self, object_id: &str) -> GraphResult<T> {
        let url = format!("{}/{}", self.base_url, object_id);
        debug!("Graph: fetching object {}", object_id);

        let body = self
            .execute(self.client.get(&url).bearer_auth(&self.access_token))
            .await?;

        serde_json::from_str(&body).map_err(|e| GraphError::ParseError(e.to_string()))
    }

    /// Fetch the authenticated user's profile
    pub async fn get_profile(&self) -> GraphResult<GraphProfile> {
        let url = format!("{}/me", self.base_url);
        debug!("Graph: fetching profile");

        let body = self
            .execute(
                self.client
                    .get(&url)
                    .bearer_auth(&self.access_token)
                    .query(&[("fields", PROFILE_FIELDS)]),
            )
            .await?;

        let profile: GraphProfile =
            serde_json::from_str(&body).map_err(|e| GraphError::ParseError(e.to_string()))?;

        info!("Graph: fetched profile id={}", profile.id);
        Ok(profile)
    }

    /// List a connection of an object, e.g. ("me", "friends"). Returns the
    /// items of the first page and the URL of the next page, if any.
    pub async fn get_connections<T: DeserializeOwned>(
        &self,
        object_id: &str,
        connection: &str,
    ) -> GraphResult<(Vec<T>, Option<String>)> {
        let url = format!("{}/{}/{}", self.base_url, object_id, connection);
        debug!("Graph: listing {} of {}", connection, object_id);

        let body = self
            .execute(self.client.get(&url).bearer_auth(&self.access_token))
            .await?;

        let list: GraphListResponse<T> =
            serde_json::from_str(&body).map_err(|e| GraphError::ParseError(e.to_string()))?;

        let next = list.paging.and_then(|p| p.next);
        debug!("Graph: got {} items, has_more={}", list.data.len(), next.is_some());
        Ok((list.data, next))
    }

    /// Fetch the next page of a connection using a paging URL
    pub async fn get_connections_next<T: DeserializeOwned>(
        &self,
        next_url: &str,
    ) -> GraphResult<(Vec<T>, Option<String>)> {
        debug!("Graph: fetching next page");

        let body = self
            .execute(self.client.get(next_url).bearer_auth(&self.access_token))
            .await?;

        let list: GraphListResponse<T> =
            serde_json::from_str(&body).map_err(|e| GraphError::ParseError(e.to_string()))?;

        let next = list.paging.and_then(|p| p.next);
        Ok((list.data, next))
    }

    /// List the authenticated user's friends
    pub async fn get_friends(&self) -> GraphResult<(Vec<GraphFriend>, Option<String>)> {
        self.get_connections("me", "friends").await
    }

    /// List the authenticated user's feed
    pub async fn get_feed(&self) -> GraphResult<(Vec<GraphPost>, Option<String>)> {
        self.get_connections("me", "feed").await
    }

    /// Publish to a connection with form-encoded fields. Returns the id of
    /// the created object.
    pub async fn publish(
        &self,
        object_id: &str,
        connection: &str,
        params: &[(&str, &str)],
    ) -> GraphResult<String> {
        let url = format!("{}/{}/{}", self.base_url, object_id, connection);
        debug!("Graph: publishing to {}/{}", object_id, connection);

        let body = self
            .execute(
                self.client
                    .post(&url)
                    .bearer_auth(&self.access_token)
                    .form(params),
            )
            .await?;

        let created: PublishResponse =
            serde_json::from_str(&body).map_err(|e| GraphError::ParseError(e.to_string()))?;

        info!("Graph: published, id={}", created.id);
        Ok(created.id)
    }

    /// Post a status update to the authenticated user's feed
    pub async fn update_status(&self, message: &str) -> GraphResult<String> {
        self.publish("me", "feed", &[("message", message)]).await
    }

    /// Delete an object
    pub async fn delete_object(&self, object_id: &str) -> GraphResult<()> {
        let url = format!("{}/{}", self.base_url, object_id);
        debug!("Graph: deleting {}", object_id);

        self.execute(self.client.delete(&url).bearer_auth(&self.access_token))
            .await?;

        Ok(())
    }

    /// Send a request and translate error responses into typed errors.
    ///
    /// A response is treated as an error when its status says so or when
    /// the body carries an error envelope despite a success status.
    async fn execute(&self, request: reqwest::RequestBuilder) -> GraphResult<String> {
        let request = match &self.appsecret_proof {
            Some(proof) => request.query(&[("appsecret_proof", proof.as_str())]),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_client_error()
            || status.is_server_error()
            || envelope::body_looks_like_error(&body)
        {
            let details = envelope::extract_error_details(&body);
            debug!("Graph: error response, status={}", status.as_u16());
            return Err(classify::classify_response(status, details.as_ref()));
        }

        Ok(body)
    }
}
