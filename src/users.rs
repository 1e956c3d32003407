use crate::app::{App, Outcome, Skip};
use crate::config::*;
use crate::posts::render_list;
use crate::templates::profile_fields;

/// Refresh the profile header and the user's own post list. Nothing is
/// written unless both fetches succeed.
pub async fn update_profile_page(app: &App) -> Outcome {
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };

    let fetched = match app.api().get_user(user.id).await {
        Ok(profile) => app
            .api()
            .list_user_posts(user.id, user.id)
            .await
            .map(|posts| (profile, posts)),
        Err(e) => Err(e),
    };
    let (profile, posts) = match fetched {
        Ok(fetched) => fetched,
        Err(e) => {
            log::error!("Error updating profile: {}", e);
            return Outcome::Failed(e);
        }
    };

    app.with_document(|doc| {
        for (id, value) in profile_fields(&profile) {
            doc.set_field(id, value);
        }
        doc.set_field(PROFILE_POST_COUNT, posts.len().to_string());
        if doc.is_mounted(PROFILE_CONTAINER) {
            render_list(doc, PROFILE_CONTAINER, &posts, user.id, Some(NO_POSTS_PLACEHOLDER));
        }
    });
    Outcome::Completed
}

pub async fn delete_account(app: &App) -> Outcome {
    let user = match app.current_user() {
        Some(u) => u,
        None => return Outcome::Skipped(Skip::NoSession),
    };
    let _guard = match app.begin("delete-account".to_string()) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };
    if !app.dialogs().confirm(CONFIRM_DELETE_ACCOUNT) {
        return Outcome::Skipped(Skip::Cancelled);
    }

    match app.api().delete_user(user.id).await {
        Ok(()) => {
            log::info!("Deleted account {}", user.id);
            app.dialogs().alert(ALERT_ACCOUNT_DELETED);
            if let Err(e) = app.session().set_current_user(None) {
                log::error!("Failed to clear session: {}", e);
            }
            app.with_document(|doc| doc.navigate(LANDING_PAGE));
            Outcome::Completed
        }
        Err(e) => {
            log::error!("Error deleting account: {}", e);
            app.dialogs().alert(ALERT_DELETE_ACCOUNT_FAILED);
            Outcome::Failed(e)
        }
    }
}
