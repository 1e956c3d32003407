//! In-memory `FeedApi` for handler tests. Mirrors the service's rules:
//! newest posts first, `is_liked` per viewer, owner-only deletes (403),
//! banned words rejected (400), bad credentials (401).

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::App;
use crate::client::FeedApi;
use crate::core::errors::ApiError;
use crate::core::helpers::now_utc;
use crate::document::RecordingDialogs;
use crate::models::models::{
    Comment, Health, LikeStatus, LoginRequest, Post, SignupRequest, User,
};
use crate::session::Session;

const BANNED: &[&str] = &["skibidi", "rizz", "gyat"];

#[derive(Default)]
struct State {
    users: Vec<(User, String)>,
    posts: Vec<Post>,
    likes: HashSet<(i64, i64)>,
    next_id: i64,
    calls: Vec<String>,
    forced: HashMap<&'static str, u16>,
    garbled: HashSet<&'static str>,
}

impl State {
    fn id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Result of a committed write, unless its response is set to be garbled.
    fn reply<T>(&mut self, op: &'static str, value: T) -> Result<T, ApiError> {
        if self.garbled.remove(op) {
            return Err(ApiError::Decode("missing field `id`".into()));
        }
        Ok(value)
    }

    fn user(&self, id: i64) -> Result<User, ApiError> {
        self.users
            .iter()
            .find(|(u, _)| u.id == id)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ApiError::NotFound(Some("User not found".into())))
    }

    fn view(&self, filter: impl Fn(&Post) -> bool, viewer: i64) -> Vec<Post> {
        self.posts
            .iter()
            .rev()
            .filter(|p| filter(p))
            .map(|p| Post {
                is_liked: self.likes.contains(&(p.id, viewer)),
                ..p.clone()
            })
            .collect()
    }
}

#[derive(Default)]
pub(crate) struct FakeApi {
    state: Mutex<State>,
}

fn rejected(content: &str) -> bool {
    let lower = content.to_lowercase();
    BANNED.iter().any(|w| lower.contains(w))
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, username: &str, email: &str, password: &str) -> User {
        let mut state = self.lock();
        let user = User {
            id: state.id(),
            username: username.to_string(),
            email: email.to_string(),
            bio: "New user".to_string(),
            followers: 0,
            following: 0,
        };
        state.users.push((user.clone(), password.to_string()));
        user
    }

    pub fn add_post(&self, user: &User, content: &str) -> i64 {
        let mut state = self.lock();
        let id = state.id();
        state.posts.push(Post {
            id,
            user_id: user.id,
            username: user.username.clone(),
            content: content.to_string(),
            likes: 0,
            timestamp: now_utc(),
            comments: Vec::new(),
            is_liked: false,
        });
        id
    }

    pub fn add_comment_as(&self, user: &User, post_id: i64, content: &str) -> i64 {
        let mut state = self.lock();
        let id = state.id();
        let comment = Comment {
            id,
            user_id: user.id,
            username: user.username.clone(),
            content: content.to_string(),
            timestamp: now_utc(),
        };
        if let Some(post) = state.posts.iter_mut().find(|p| p.id == post_id) {
            post.comments.push(comment);
        }
        id
    }

    /// Make the next call to `op` fail with `status`.
    pub fn fail_next(&self, op: &'static str, status: u16) {
        self.lock().forced.insert(op, status);
    }

    /// Make the next call to `op` commit but answer with an unreadable body.
    pub fn garble_next(&self, op: &'static str) {
        self.lock().garbled.insert(op);
    }

    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.lock().calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    pub fn post_exists(&self, post_id: i64) -> bool {
        self.lock().posts.iter().any(|p| p.id == post_id)
    }

    async fn enter(&self, op: &'static str, call: String) -> Result<std::sync::MutexGuard<'_, State>, ApiError> {
        // let concurrently started actions interleave
        tokio::task::yield_now().await;
        let mut state = self.lock();
        state.calls.push(call);
        match state.forced.remove(op) {
            Some(status) => Err(ApiError::from_status(status, "")),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl FeedApi for FakeApi {
    async fn login(&self, req: &LoginRequest) -> Result<User, ApiError> {
        let state = self.enter("login", "POST /auth/login".into()).await?;
        state
            .users
            .iter()
            .find(|(u, pw)| u.email == req.email && *pw == req.password)
            .map(|(u, _)| u.clone())
            .ok_or_else(|| ApiError::Unauthorized(Some("Invalid email or password".into())))
    }

    async fn signup(&self, req: &SignupRequest) -> Result<User, ApiError> {
        let mut state = self.enter("signup", "POST /auth/signup".into()).await?;
        if state.users.iter().any(|(u, _)| u.email == req.email) {
            return Err(ApiError::BadRequest(Some("Email already exists".into())));
        }
        if state.users.iter().any(|(u, _)| u.username == req.username) {
            return Err(ApiError::BadRequest(Some("Username already taken".into())));
        }
        let user = User {
            id: state.id(),
            username: req.username.clone(),
            email: req.email.clone(),
            bio: "New user".to_string(),
            followers: 0,
            following: 0,
        };
        state.users.push((user.clone(), req.password.clone()));
        Ok(user)
    }

    async fn list_posts(&self, current_user_id: i64) -> Result<Vec<Post>, ApiError> {
        let call = format!("GET /posts?current_user_id={}", current_user_id);
        let state = self.enter("list_posts", call).await?;
        Ok(state.view(|_| true, current_user_id))
    }

    async fn create_post(&self, user_id: i64, content: &str) -> Result<Post, ApiError> {
        let call = format!("POST /posts?user_id={} {}", user_id, content);
        let mut state = self.enter("create_post", call).await?;
        if rejected(content) {
            return Err(ApiError::BadRequest(Some("Brainrot content detected".into())));
        }
        let user = state.user(user_id)?;
        let post = Post {
            id: state.id(),
            user_id,
            username: user.username,
            content: content.to_string(),
            likes: 0,
            timestamp: now_utc(),
            comments: Vec::new(),
            is_liked: false,
        };
        state.posts.push(post.clone());
        state.reply("create_post", post)
    }

    async fn toggle_like(&self, post_id: i64, user_id: i64) -> Result<LikeStatus, ApiError> {
        let call = format!("POST /posts/{}/like?user_id={}", post_id, user_id);
        let mut state = self.enter("toggle_like", call).await?;
        let is_liked = if state.likes.remove(&(post_id, user_id)) {
            false
        } else {
            state.likes.insert((post_id, user_id));
            true
        };
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| ApiError::NotFound(Some("Post not found".into())))?;
        post.likes += if is_liked { 1 } else { -1 };
        let status = LikeStatus {
            likes: post.likes,
            is_liked,
        };
        state.reply("toggle_like", status)
    }

    async fn delete_post(&self, post_id: i64, user_id: i64) -> Result<(), ApiError> {
        let call = format!("DELETE /posts/{}?user_id={}", post_id, user_id);
        let mut state = self.enter("delete_post", call).await?;
        let owner = state
            .posts
            .iter()
            .find(|p| p.id == post_id)
            .map(|p| p.user_id)
            .ok_or_else(|| ApiError::NotFound(Some("Post not found".into())))?;
        if owner != user_id {
            return Err(ApiError::Forbidden(Some("You can only delete your own posts".into())));
        }
        state.posts.retain(|p| p.id != post_id);
        Ok(())
    }

    async fn add_comment(
        &self,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, ApiError> {
        let call = format!("POST /posts/{}/comments?user_id={} {}", post_id, user_id, content);
        let mut state = self.enter("add_comment", call).await?;
        if rejected(content) {
            return Err(ApiError::BadRequest(Some("Brainrot content detected".into())));
        }
        let user = state.user(user_id)?;
        let comment = Comment {
            id: state.id(),
            user_id,
            username: user.username,
            content: content.to_string(),
            timestamp: now_utc(),
        };
        let post = state
            .posts
            .iter_mut()
            .find(|p| p.id == post_id)
            .ok_or_else(|| ApiError::NotFound(Some("Post not found".into())))?;
        post.comments.push(comment.clone());
        state.reply("add_comment", comment)
    }

    async fn delete_comment(&self, comment_id: i64, user_id: i64) -> Result<(), ApiError> {
        let call = format!("DELETE /comments/{}?user_id={}", comment_id, user_id);
        let mut state = self.enter("delete_comment", call).await?;
        let owner = state
            .posts
            .iter()
            .flat_map(|p| p.comments.iter())
            .find(|c| c.id == comment_id)
            .map(|c| c.user_id)
            .ok_or_else(|| ApiError::NotFound(Some("Comment not found".into())))?;
        if owner != user_id {
            return Err(ApiError::Forbidden(Some(
                "You can only delete your own comments".into(),
            )));
        }
        for post in state.posts.iter_mut() {
            post.comments.retain(|c| c.id != comment_id);
        }
        Ok(())
    }

    async fn get_user(&self, user_id: i64) -> Result<User, ApiError> {
        let state = self.enter("get_user", format!("GET /users/{}", user_id)).await?;
        state.user(user_id)
    }

    async fn list_user_posts(
        &self,
        user_id: i64,
        current_user_id: i64,
    ) -> Result<Vec<Post>, ApiError> {
        let call = format!("GET /users/{}/posts?current_user_id={}", user_id, current_user_id);
        let state = self.enter("list_user_posts", call).await?;
        state.user(user_id)?;
        Ok(state.view(|p| p.user_id == user_id, current_user_id))
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), ApiError> {
        let mut state = self.enter("delete_user", format!("DELETE /users/{}", user_id)).await?;
        state.user(user_id)?;
        state.users.retain(|(u, _)| u.id != user_id);
        state.posts.retain(|p| p.user_id != user_id);
        for post in state.posts.iter_mut() {
            post.comments.retain(|c| c.user_id != user_id);
        }
        state.likes.retain(|(_, uid)| *uid != user_id);
        Ok(())
    }

    async fn health(&self) -> Result<Health, ApiError> {
        self.enter("health", "GET /health".into()).await?;
        Ok(Health {
            status: "ok".to_string(),
            message: String::new(),
        })
    }
}

/// App over a fresh fake backend with an in-memory session.
pub(crate) fn app_with(api: Arc<FakeApi>, confirm: bool) -> (App, Arc<RecordingDialogs>) {
    let dialogs = Arc::new(RecordingDialogs::new(confirm));
    let app = App::new(api, Session::in_memory(), dialogs.clone());
    (app, dialogs)
}
