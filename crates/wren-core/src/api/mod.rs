//! HTTP client for the Y server.
//!
//! All server communication goes through [`ApiClient`]. The client holds
//! the base URL (from config) and at most one bearer token (from the
//! credential store); endpoints that require authentication attach it as
//! `Authorization: Bearer <token>`.
//!
//! Error mapping is uniform: 401/403 become [`ApiError::Unauthorized`],
//! other non-success statuses become [`ApiError::Status`] carrying the
//! server's `message` field when one is present, and transport failures
//! become [`ApiError::Network`].

pub mod types;

use reqwest::{RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::credentials::BearerToken;
use crate::error::ApiError;

use types::{
    CreatePostRequest, LoginRequest, LoginResponse, Post, PostsResponse, RegisterRequest,
    ServerMessage,
};

/// Client for the Y server's JSON API.
pub struct ApiClient {
    base_url: String,
    token: Option<BearerToken>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for the given base URL with no credential.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// Creates a client carrying a bearer token.
    pub fn with_token(base_url: impl Into<String>, token: Option<BearerToken>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            http: reqwest::Client::new(),
        }
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.token.as_ref()
    }

    pub fn set_token(&mut self, token: Option<BearerToken>) {
        self.token = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token.as_str()),
            None => builder,
        }
    }

    /// `GET /protected` — returns the server's identity line.
    pub async fn get_protected(&self) -> Result<String, ApiError> {
        let response = self
            .authorize(self.http.get(self.url("/protected")))
            .send()
            .await?;
        let body: ServerMessage = read_json(response).await?;
        Ok(body.message)
    }

    /// `GET /posts` — the newest posts, server-ordered. Unauthenticated.
    pub async fn get_posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.http.get(self.url("/posts")).send().await?;
        let body: PostsResponse = read_json(response).await?;
        debug!(count = body.posts.len(), "fetched posts");
        Ok(body.posts)
    }

    /// `POST /post` — creates a post. Requires a token.
    pub async fn create_post(
        &self,
        message: &str,
        hashtags: &[String],
    ) -> Result<String, ApiError> {
        let request = CreatePostRequest { message, hashtags };
        let response = self
            .authorize(self.http.post(self.url("/post")))
            .json(&request)
            .send()
            .await?;
        let body: ServerMessage = read_json(response).await?;
        Ok(body.message)
    }

    /// `DELETE /posts/:id` — removes a post. Requires a token.
    pub async fn delete_post(&self, id: u64) -> Result<String, ApiError> {
        let response = self
            .authorize(self.http.delete(self.url(&format!("/posts/{id}"))))
            .send()
            .await?;
        let body: ServerMessage = read_json(response).await?;
        Ok(body.message)
    }

    /// `POST /login` — exchanges credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<BearerToken, ApiError> {
        let request = LoginRequest { username, password };
        let response = self
            .http
            .post(self.url("/login"))
            .json(&request)
            .send()
            .await?;
        let body: LoginResponse = read_json(response).await?;
        Ok(BearerToken::new(body.access_token))
    }

    /// `POST /register` — creates an account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<String, ApiError> {
        let request = RegisterRequest {
            username,
            email,
            password,
        };
        let response = self
            .http
            .post(self.url("/register"))
            .json(&request)
            .send()
            .await?;
        let body: ServerMessage = read_json(response).await?;
        Ok(body.message)
    }

    /// `DELETE /delete-account` — removes the authenticated account.
    pub async fn delete_account(&self) -> Result<String, ApiError> {
        let response = self
            .authorize(self.http.delete(self.url("/delete-account")))
            .send()
            .await?;
        let body: ServerMessage = read_json(response).await?;
        Ok(body.message)
    }
}

/// Checks the status and decodes the body as `T`.
async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ApiError::Unauthorized {
            status: status.as_u16(),
        });
    }
    if !status.is_success() {
        let message = response
            .json::<ServerMessage>()
            .await
            .map(|m| m.message)
            .unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(ApiError::Decode)
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn mock_server() -> MockServer {
        MockServer::start().await
    }

    #[tokio::test]
    async fn test_get_protected_sends_bearer_and_reads_message() {
        let server = mock_server().await;
        Mock::given(method("GET"))
            .and(path("/protected"))
            .and(header("authorization", "Bearer tok-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "You have logged in, alice, Role: Admin"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_token(server.uri(), Some(BearerToken::new("tok-1")));
        let message = client.get_protected().await.unwrap();
        assert_eq!(message, "You have logged in, alice, Role: Admin");
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_typed_error() {
        let server = mock_server().await;
        Mock::given(method("GET"))
            .and(path("/protected"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"msg": "Missing Authorization Header"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.get_protected().await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_get_posts_decodes_list() {
        let server = mock_server().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "posts": [
                    {"id": 1700000000123u64, "message": "hi", "hashtags": ["#a"],
                     "username": "alice", "timestamp": "2026-01-01 10:00:00"}
                ]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let posts = client.get_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, 1_700_000_000_123);
        assert_eq!(posts[0].username, "alice");
    }

    #[tokio::test]
    async fn test_status_error_carries_server_message() {
        let server = mock_server().await;
        Mock::given(method("POST"))
            .and(path("/register"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(serde_json::json!({"message": "Username already exists"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let err = client.register("alice", "a@y.io", "pw").await.unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Username already exists");
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = mock_server().await;
        Mock::given(method("POST"))
            .and(path("/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"access_token": "jwt-abc"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let token = client.login("alice", "pw").await.unwrap();
        assert_eq!(token.as_str(), "jwt-abc");
    }

    #[tokio::test]
    async fn test_delete_post_hits_id_path() {
        let server = mock_server().await;
        Mock::given(method("DELETE"))
            .and(path("/posts/42"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"message": "Post deleted successfully"})),
            )
            .mount(&server)
            .await;

        let client = ApiClient::with_token(server.uri(), Some(BearerToken::new("tok")));
        let message = client.delete_post(42).await.unwrap();
        assert_eq!(message, "Post deleted successfully");
    }
}
