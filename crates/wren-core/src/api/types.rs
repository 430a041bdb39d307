//! Wire types for the Y server's JSON API.

use serde::{Deserialize, Serialize};

/// A single post as the server returns it from `GET /posts`.
///
/// `id` is the server's creation timestamp in milliseconds and doubles as
/// the delete handle. Posts are never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub message: String,
    #[serde(default)]
    pub hashtags: Vec<String>,
    pub username: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Deserialize)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct CreatePostRequest<'a> {
    pub message: &'a str,
    pub hashtags: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// The server's generic `{"message": ...}` envelope, used by most
/// non-data endpoints for both success and failure bodies.
#[derive(Debug, Deserialize)]
pub struct ServerMessage {
    #[serde(default)]
    pub message: String,
}
