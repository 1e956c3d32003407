use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::helpers::timestamp;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub following: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Comment {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub is_liked: bool,
}

/// Body returned by the toggle-like endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LikeStatus {
    pub likes: i64,
    pub is_liked: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ContentRequest {
    pub content: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
