use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_SESSION_FILE: &str = ".feedline-session.json";

// Transient notice lifetimes
pub const ERROR_NOTICE_SECS: u64 = 5;
pub const ATOMIZED_NOTICE_SECS: u64 = 3;

pub fn error_notice_ttl() -> Duration {
    Duration::from_secs(ERROR_NOTICE_SECS)
}

pub fn atomized_notice_ttl() -> Duration {
    Duration::from_secs(ATOMIZED_NOTICE_SECS)
}

pub fn api_base_url() -> String {
    std::env::var("FEEDLINE_API_BASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

pub fn session_file() -> String {
    std::env::var("FEEDLINE_SESSION_FILE")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string())
}

// === Session keys ===
pub const CURRENT_USER_KEY: &str = "currentUser";

// === Pages ===
pub const LANDING_PAGE: &str = "index.html";
pub const SIGNUP_PAGE: &str = "signup.html";
pub const FEED_PAGE: &str = "feed.html";
pub const PROFILE_PAGE: &str = "profile.html";

// === Element ids ===
pub const FEED_CONTAINER: &str = "postsFeed";
pub const PROFILE_CONTAINER: &str = "profilePosts";
pub const COMPOSER_INPUT: &str = "newPostContent";
pub const COMPOSER_AVATAR: &str = "composerAvatar";
pub const LOGIN_ERROR: &str = "loginError";
pub const SIGNUP_ERROR: &str = "signupError";
pub const ATOMIZED_WARNING: &str = "atomizedWarning";
pub const COMMENT_ATOMIZED_WARNING: &str = "commentAtomizedWarning";

pub const PROFILE_AVATAR: &str = "profileAvatar";
pub const PROFILE_USERNAME: &str = "profileUsername";
pub const PROFILE_EMAIL: &str = "profileEmail";
pub const PROFILE_BIO: &str = "profileBio";
pub const PROFILE_FOLLOWERS: &str = "profileFollowers";
pub const PROFILE_FOLLOWING: &str = "profileFollowing";
pub const PROFILE_POST_COUNT: &str = "profilePostCount";

pub fn comment_input_id(post_id: i64) -> String {
    format!("comment-input-{}", post_id)
}

/// Post id behind a comment input id, if it is one.
pub fn comment_input_post(input_id: &str) -> Option<i64> {
    input_id.strip_prefix("comment-input-")?.parse().ok()
}

pub fn comments_section_id(post_id: i64) -> String {
    format!("comments-{}", post_id)
}

// === Messages ===
pub const MSG_FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const MSG_GENERIC_ERROR: &str = "An error occurred. Please try again.";
pub const MSG_ALL_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const MSG_ATOMIZED: &str = "Your content was atomized";

pub const CONFIRM_DELETE_POST: &str = "Are you sure you want to delete this post?";
pub const CONFIRM_DELETE_COMMENT: &str = "Are you sure you want to delete this comment?";
pub const CONFIRM_DELETE_ACCOUNT: &str =
    "Are you sure you want to delete your account? This action cannot be undone.";

pub const ALERT_OWN_POSTS_ONLY: &str = "You can only delete your own posts";
pub const ALERT_OWN_COMMENTS_ONLY: &str = "You can only delete your own comments";
pub const ALERT_DELETE_POST_FAILED: &str = "Failed to delete post";
pub const ALERT_DELETE_COMMENT_FAILED: &str = "Failed to delete comment";
pub const ALERT_ACCOUNT_DELETED: &str = "Your account has been deleted successfully";
pub const ALERT_DELETE_ACCOUNT_FAILED: &str = "Failed to delete account. Please try again.";

pub const NO_COMMENTS_PLACEHOLDER: &str = "No comments yet. Be the first to comment!";
pub const NO_POSTS_PLACEHOLDER: &str = "No posts yet. Start sharing!";
