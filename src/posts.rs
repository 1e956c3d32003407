use crate::app::{App, Outcome, Skip};
use crate::config::*;
use crate::core::errors::ApiError;
use crate::core::helpers::{avatar_initial, non_blank, now_utc};
use crate::document::Document;
use crate::models::models::Post;
use crate::templates::{post_list, RenderContext};

/// Diff a fresh post list into a mounted container.
pub(crate) fn render_list(
    doc: &mut Document,
    container: &str,
    posts: &[Post],
    viewer_id: i64,
    empty: Option<&str>,
) {
    let nodes = {
        let ctx = RenderContext {
            viewer_id,
            open_sections: doc.open_sections(),
            inputs: doc.inputs(),
            now: now_utc(),
        };
        post_list(posts, &ctx, empty)
    };
    doc.patch(container, nodes);
}

pub async fn render_posts(app: &App) -> Outcome {
    if !app.with_document(|doc| doc.is_mounted(FEED_CONTAINER)) {
        return Outcome::Skipped(Skip::NotMounted);
    }
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };

    match app.api().list_posts(user.id).await {
        Ok(posts) => {
            log::debug!("Rendering {} posts", posts.len());
            app.with_document(|doc| render_list(doc, FEED_CONTAINER, &posts, user.id, None));
            Outcome::Completed
        }
        Err(e) => {
            log::error!("Error fetching posts: {}", e);
            Outcome::Failed(e)
        }
    }
}

pub fn update_composer_avatar(app: &App) {
    if let Some(user) = app.current_user() {
        app.with_document(|doc| doc.set_field(COMPOSER_AVATAR, avatar_initial(&user.username)));
    }
}

/// Show or hide a post's comment section; returns whether it is now open.
pub fn toggle_comments(app: &App, post_id: i64) -> bool {
    app.with_document(|doc| doc.toggle_section(post_id))
}

pub async fn create_post(app: &App, content: &str) -> Outcome {
    let content = match non_blank(content) {
        Some(c) => c,
        None => return Outcome::Skipped(Skip::EmptyInput),
    };
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };
    let _guard = match app.begin("create-post".to_string()) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };

    let created = match app.api().create_post(user.id, content).await {
        Ok(post) => {
            log::info!("Created post {}", post.id);
            Ok(())
        }
        Err(ApiError::Decode(e)) => {
            log::warn!("Post created but response unreadable: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    };
    match created {
        Ok(()) => {
            app.with_document(|doc| doc.clear_input(COMPOSER_INPUT));
            app.rerender().await;
            Outcome::Completed
        }
        Err(e) if e.is_rejected_content() => {
            log::warn!("Post rejected: {}", e);
            app.with_document(|doc| {
                doc.show_notice(ATOMIZED_WARNING, MSG_ATOMIZED, atomized_notice_ttl());
                doc.clear_input(COMPOSER_INPUT);
            });
            Outcome::Failed(e)
        }
        Err(e) => {
            log::error!("Error creating post: {}", e);
            Outcome::Failed(e)
        }
    }
}

pub async fn like(app: &App, post_id: i64) -> Outcome {
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };
    let _guard = match app.begin(format!("like:{}", post_id)) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };

    let toggled = match app.api().toggle_like(post_id, user.id).await {
        Ok(status) => {
            log::debug!("Post {} likes={} liked={}", post_id, status.likes, status.is_liked);
            Ok(())
        }
        Err(ApiError::Decode(e)) => {
            log::warn!("Like toggled but response unreadable: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    };
    match toggled {
        Ok(()) => {
            app.rerender().await;
            Outcome::Completed
        }
        Err(e) => {
            log::error!("Error toggling like: {}", e);
            Outcome::Failed(e)
        }
    }
}

pub async fn add_comment(app: &App, post_id: i64, content: &str) -> Outcome {
    let content = match non_blank(content) {
        Some(c) => c,
        None => return Outcome::Skipped(Skip::EmptyInput),
    };
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };
    let _guard = match app.begin(format!("comment:{}", post_id)) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };

    let input_id = comment_input_id(post_id);
    let added = match app.api().add_comment(post_id, user.id, content).await {
        Ok(comment) => {
            log::info!("Added comment {} to post {}", comment.id, post_id);
            Ok(())
        }
        Err(ApiError::Decode(e)) => {
            log::warn!("Comment added but response unreadable: {}", e);
            Ok(())
        }
        Err(e) => Err(e),
    };
    match added {
        Ok(()) => {
            app.with_document(|doc| {
                doc.clear_input(&input_id);
                doc.open_section(post_id);
            });
            app.rerender().await;
            Outcome::Completed
        }
        Err(e) if e.is_rejected_content() => {
            log::warn!("Comment rejected: {}", e);
            app.with_document(|doc| {
                doc.show_notice(COMMENT_ATOMIZED_WARNING, MSG_ATOMIZED, atomized_notice_ttl());
                doc.clear_input(&input_id);
            });
            Outcome::Failed(e)
        }
        Err(e) => {
            log::error!("Error adding comment: {}", e);
            Outcome::Failed(e)
        }
    }
}

pub async fn delete_post(app: &App, post_id: i64) -> Outcome {
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };
    let _guard = match app.begin(format!("delete-post:{}", post_id)) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };
    if !app.dialogs().confirm(CONFIRM_DELETE_POST) {
        return Outcome::Skipped(Skip::Cancelled);
    }

    match app.api().delete_post(post_id, user.id).await {
        Ok(()) => {
            log::info!("Deleted post {}", post_id);
            app.rerender().await;
            Outcome::Completed
        }
        Err(e) if e.is_forbidden() => {
            app.dialogs().alert(ALERT_OWN_POSTS_ONLY);
            Outcome::Failed(e)
        }
        Err(e) => {
            log::error!("Error deleting post: {}", e);
            app.dialogs().alert(ALERT_DELETE_POST_FAILED);
            Outcome::Failed(e)
        }
    }
}

pub async fn delete_comment(app: &App, comment_id: i64, post_id: i64) -> Outcome {
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };
    let _guard = match app.begin(format!("delete-comment:{}", comment_id)) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };
    if !app.dialogs().confirm(CONFIRM_DELETE_COMMENT) {
        return Outcome::Skipped(Skip::Cancelled);
    }

    match app.api().delete_comment(comment_id, user.id).await {
        Ok(()) => {
            log::info!("Deleted comment {}", comment_id);
            app.with_document(|doc| doc.open_section(post_id));
            app.rerender().await;
            Outcome::Completed
        }
        Err(e) if e.is_forbidden() => {
            app.dialogs().alert(ALERT_OWN_COMMENTS_ONLY);
            Outcome::Failed(e)
        }
        Err(e) => {
            log::error!("Error deleting comment: {}", e);
            app.dialogs().alert(ALERT_DELETE_COMMENT_FAILED);
            Outcome::Failed(e)
        }
    }
}
