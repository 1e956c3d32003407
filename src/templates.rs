//! View-models for post and comment cards and the profile header, plus
//! their rendering into [`Node`] trees.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::config::*;
use crate::core::helpers::{avatar_initial, format_relative_time};
use crate::models::models::{Comment, Post, User};
use crate::view::{Element, Node};

/// Per-render state the cards depend on besides the posts themselves.
pub struct RenderContext<'a> {
    pub viewer_id: i64,
    pub open_sections: &'a BTreeSet<i64>,
    pub inputs: &'a BTreeMap<String, String>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentCard {
    pub id: i64,
    pub post_id: i64,
    pub initial: String,
    pub username: String,
    pub time: String,
    pub content: String,
    pub can_delete: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub id: i64,
    pub initial: String,
    pub username: String,
    pub time: String,
    pub content: String,
    pub likes: i64,
    pub liked: bool,
    pub can_delete: bool,
    pub comments_open: bool,
    pub draft_comment: String,
    pub comments: Vec<CommentCard>,
}

impl CommentCard {
    pub fn build(comment: &Comment, post_id: i64, ctx: &RenderContext<'_>) -> Self {
        Self {
            id: comment.id,
            post_id,
            initial: avatar_initial(&comment.username),
            username: comment.username.clone(),
            time: format_relative_time(comment.timestamp, ctx.now),
            content: comment.content.clone(),
            can_delete: comment.user_id == ctx.viewer_id,
        }
    }

    pub fn render(&self) -> Node {
        let mut header = Element::new("div")
            .class("comment-header")
            .child(Element::new("div").class("comment-avatar").text(&self.initial))
            .child(
                Element::new("div")
                    .class("comment-meta")
                    .child(Element::new("strong").text(&self.username))
                    .child(Element::new("span").class("comment-time").text(&self.time)),
            );

        if self.can_delete {
            header = header.child(
                Element::new("button")
                    .class("comment-delete-btn")
                    .attr("data-action", "delete-comment")
                    .attr("data-comment-id", self.id.to_string())
                    .attr("data-post-id", self.post_id.to_string())
                    .attr("title", "Delete comment")
                    .text("Delete"),
            );
        }

        Element::new("div")
            .key(format!("comment-{}", self.id))
            .class("comment-item")
            .child(header)
            .child(Element::new("div").class("comment-content").text(&self.content))
            .into()
    }
}

impl PostCard {
    pub fn build(post: &Post, ctx: &RenderContext<'_>) -> Self {
        Self {
            id: post.id,
            initial: avatar_initial(&post.username),
            username: post.username.clone(),
            time: format_relative_time(post.timestamp, ctx.now),
            content: post.content.clone(),
            likes: post.likes,
            liked: post.is_liked,
            can_delete: post.user_id == ctx.viewer_id,
            comments_open: ctx.open_sections.contains(&post.id),
            draft_comment: ctx
                .inputs
                .get(&comment_input_id(post.id))
                .cloned()
                .unwrap_or_default(),
            comments: post
                .comments
                .iter()
                .map(|c| CommentCard::build(c, post.id, ctx))
                .collect(),
        }
    }

    pub fn render(&self) -> Node {
        let header = Element::new("div")
            .class("post-header")
            .child(Element::new("div").class("avatar").text(&self.initial))
            .child(
                Element::new("div")
                    .class("post-meta")
                    .child(Element::new("h4").text(&self.username))
                    .child(Element::new("span").class("post-time").text(&self.time)),
            );

        let like_class = if self.liked { "action-btn liked" } else { "action-btn" };
        let mut actions = Element::new("div")
            .class("post-actions")
            .child(
                Element::new("button")
                    .class(like_class)
                    .attr("data-action", "like")
                    .attr("data-post-id", self.id.to_string())
                    .child(Element::new("span").text(self.likes.to_string())),
            )
            .child(
                Element::new("button")
                    .class("action-btn")
                    .attr("data-action", "toggle-comments")
                    .attr("data-post-id", self.id.to_string())
                    .child(Element::new("span").text(self.comments.len().to_string())),
            );

        if self.can_delete {
            actions = actions.child(
                Element::new("button")
                    .class("action-btn delete-btn")
                    .attr("data-action", "delete-post")
                    .attr("data-post-id", self.id.to_string())
                    .attr("title", "Delete post")
                    .text("Delete"),
            );
        }

        let list: Vec<Node> = if self.comments.is_empty() {
            vec![Element::new("div")
                .class("no-comments")
                .text(NO_COMMENTS_PLACEHOLDER)
                .into()]
        } else {
            self.comments.iter().map(CommentCard::render).collect()
        };

        let display = if self.comments_open { "display: block;" } else { "display: none;" };
        let comments = Element::new("div")
            .class("comments-section")
            .id(comments_section_id(self.id))
            .attr("style", display)
            .child(Element::new("div").class("comments-list").children(list))
            .child(
                Element::new("div")
                    .class("comment-input-container")
                    .child(
                        Element::new("input")
                            .attr("type", "text")
                            .id(comment_input_id(self.id))
                            .class("comment-input")
                            .attr("placeholder", "Write a comment...")
                            .attr("value", &self.draft_comment),
                    )
                    .child(
                        Element::new("button")
                            .class("btn-comment")
                            .attr("data-action", "add-comment")
                            .attr("data-post-id", self.id.to_string())
                            .text("Comment"),
                    ),
            );

        Element::new("div")
            .key(format!("post-{}", self.id))
            .class("post-card")
            .child(header)
            .child(Element::new("div").class("post-content").text(&self.content))
            .child(actions)
            .child(comments)
            .into()
    }
}

/// One card per post in the given order, or the placeholder when given
/// and there are no posts.
pub fn post_list(posts: &[Post], ctx: &RenderContext<'_>, empty: Option<&str>) -> Vec<Node> {
    if posts.is_empty() {
        if let Some(message) = empty {
            return vec![Element::new("div")
                .class("no-posts")
                .child(Element::new("p").text(message))
                .into()];
        }
    }
    posts
        .iter()
        .map(|p| PostCard::build(p, ctx).render())
        .collect()
}

/// Text fields the profile page shows for a user, keyed by element id.
pub fn profile_fields(user: &User) -> Vec<(&'static str, String)> {
    vec![
        (PROFILE_AVATAR, avatar_initial(&user.username)),
        (PROFILE_USERNAME, user.username.clone()),
        (PROFILE_EMAIL, user.email.clone()),
        (PROFILE_BIO, user.bio.clone()),
        (PROFILE_FOLLOWERS, user.followers.to_string()),
        (PROFILE_FOLLOWING, user.following.to_string()),
    ]
}
