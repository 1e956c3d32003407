//! Typed access to the feed service's REST surface.
//!
//! [`FeedApi`] is the seam the UI layer talks to; [`HttpClient`] is the
//! real implementation over `reqwest`. Mutating calls identify the acting
//! user with a `user_id` query parameter, reads pass `current_user_id` so
//! the server can fill in `is_liked`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::core::errors::ApiError;
use crate::core::query_params::{acting_user, viewer, with_query};
use crate::models::models::{
    Comment, ContentRequest, Health, LikeStatus, LoginRequest, Post, SignupRequest, User,
};

#[async_trait]
pub trait FeedApi: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> Result<User, ApiError>;
    async fn signup(&self, req: &SignupRequest) -> Result<User, ApiError>;

    async fn list_posts(&self, current_user_id: i64) -> Result<Vec<Post>, ApiError>;
    async fn create_post(&self, user_id: i64, content: &str) -> Result<Post, ApiError>;
    async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<LikeStatus, ApiError>;
    async fn delete_post(&self, post_id: i64, user_id: i64) -> Result<(), ApiError>;

    async fn add_comment(&self, post_id: i64, user_id: i64, content: &str)
        -> Result<Comment, ApiError>;
    async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), ApiError>;

    async fn get_user(&self, user_id: i64) -> Result<User, ApiError>;
    async fn list_user_posts(&self, user_id: i64, current_user_id: i64)
        -> Result<Vec<Post>, ApiError>;
    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError>;

    async fn health(&self) -> Result<Health, ApiError>;
}

pub struct HttpClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fetch(&self, req: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        log::debug!("<- {} ({} bytes)", status, body.len());

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.fetch(req).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        log::debug!("-> GET {}", path);
        self.http.get(self.url(path))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        log::debug!("-> POST {}", path);
        self.http.post(self.url(path))
    }

    fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        log::debug!("-> DELETE {}", path);
        self.http.delete(self.url(path))
    }
}

#[async_trait]
impl FeedApi for HttpClient {
    async fn login(&self, req: &LoginRequest) -> Result<User, ApiError> {
        self.fetch_json(self.post("/auth/login").json(req)).await
    }

    async fn signup(&self, req: &SignupRequest) -> Result<User, ApiError> {
        self.fetch_json(self.post("/auth/signup").json(req)).await
    }

    async fn list_posts(&self, current_user_id: i64) -> Result<Vec<Post>, ApiError> {
        let path = with_query("/posts", &viewer(current_user_id));
        self.fetch_json(self.get(&path)).await
    }

    async fn create_post(&self, user_id: i64, content: &str) -> Result<Post, ApiError> {
        let path = with_query("/posts", &acting_user(user_id));
        let body = ContentRequest {
            content: content.to_string(),
        };
        self.fetch_json(self.post(&path).json(&body)).await
    }

    async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<LikeStatus, ApiError> {
        let path = with_query(&format!("/posts/{}/like", post_id), &acting_user(user_id));
        self.fetch_json(self.post(&path)).await
    }

    async fn delete_post(&self, post_id: i64, user_id: i64) -> Result<(), ApiError> {
        let path = with_query(&format!("/posts/{}", post_id), &acting_user(user_id));
        self.fetch(self.delete(&path)).await.map(|_| ())
    }

    async fn add_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, ApiError> {
        let path = with_query(&format!("/posts/{}/comments", post_id), &acting_user(user_id));
        let body = ContentRequest {
            content: content.to_string(),
        };
        self.fetch_json(self.post(&path).json(&body)).await
    }

    async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), ApiError> {
        let path = with_query(&format!("/comments/{}", comment_id), &acting_user(user_id));
        self.fetch(self.delete(&path)).await.map(|_| ())
    }

    async fn get_user(&self, user_id: i64) -> Result<User, ApiError> {
        self.fetch_json(self.get(&format!("/users/{}", user_id))).await
    }

    async fn list_user_posts(
        &self,
        user_id: i64,
        current_user_id: i64,
    ) -> Result<Vec<Post>, ApiError> {
        let path = with_query(&format!("/users/{}/posts", user_id), &viewer(current_user_id));
        self.fetch_json(self.get(&path)).await
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        self.fetch(self.delete(&format!("/users/{}", user_id)))
            .await
            .map(|_| ())
    }

    async fn health(&self) -> Result<Health, ApiError> {
        self.fetch_json(self.get("/health")).await
    }
}
