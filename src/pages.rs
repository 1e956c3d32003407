use crate::app::{App, Outcome, Skip};
use crate::auth::require_auth;
use crate::config::*;
use crate::core::query_params::strip_query;
use crate::posts::{render_posts, update_composer_avatar};
use crate::users::update_profile_page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Landing,
    Signup,
    Feed,
    Profile,
    /// Unknown pages still require a session.
    Other,
}

impl Page {
    /// Identify a page by the last segment of its path.
    pub fn from_path(path: &str) -> Self {
        let path = strip_query(path);
        let filename = path.rsplit('/').next().unwrap_or("");
        match filename {
            "" | LANDING_PAGE => Page::Landing,
            SIGNUP_PAGE => Page::Signup,
            FEED_PAGE => Page::Feed,
            PROFILE_PAGE => Page::Profile,
            _ => Page::Other,
        }
    }

    pub fn is_public(self) -> bool {
        matches!(self, Page::Landing | Page::Signup)
    }
}

/// Page-load entry point: enforce the session requirement, mount the
/// page's containers and run its renderer.
pub async fn bootstrap(app: &App, path: &str) -> (Page, Outcome) {
    let page = Page::from_path(path);
    log::debug!("Bootstrapping {:?} from {}", page, path);

    if !page.is_public() && require_auth(app).is_none() {
        return (page, Outcome::Skipped(Skip::NoSession));
    }

    let outcome = match page {
        Page::Feed => {
            app.with_document(|doc| doc.mount(FEED_CONTAINER));
            update_composer_avatar(app);
            render_posts(app).await
        }
        Page::Profile => {
            app.with_document(|doc| doc.mount(PROFILE_CONTAINER));
            update_profile_page(app).await
        }
        Page::Landing | Page::Signup | Page::Other => Outcome::Completed,
    };
    (page, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifies_pages_by_file_name() {
        assert_eq!(Page::from_path("/"), Page::Landing);
        assert_eq!(Page::from_path("/index.html"), Page::Landing);
        assert_eq!(Page::from_path("/frontend/pages/signup.html"), Page::Signup);
        assert_eq!(Page::from_path("/frontend/pages/feed.html?ref=nav"), Page::Feed);
        assert_eq!(Page::from_path("profile.html"), Page::Profile);
        assert_eq!(Page::from_path("/frontend/pages/settings.html"), Page::Other);
    }

    #[test]
    fn only_landing_and_signup_are_public() {
        assert!(Page::Landing.is_public());
        assert!(Page::Signup.is_public());
        assert!(!Page::Feed.is_public());
        assert!(!Page::Profile.is_public());
        assert!(!Page::Other.is_public());
    }

    mod bootstrapping {
        use super::super::*;
        use crate::fake::{app_with, FakeApi};
        use std::sync::Arc;

        #[tokio::test]
        async fn protected_pages_redirect_without_session() {
            let api = Arc::new(FakeApi::new());
            let (app, _) = app_with(api.clone(), true);

            for path in ["feed.html", "profile.html", "settings.html"] {
                let (_, outcome) = bootstrap(&app, path).await;
                assert_eq!(outcome.skipped(), Some(&Skip::NoSession));
                assert_eq!(app.document().location(), Some(LANDING_PAGE));
            }
            assert!(api.calls().is_empty());
        }

        #[tokio::test]
        async fn public_pages_render_without_session() {
            let (app, _) = app_with(Arc::new(FakeApi::new()), true);
            let (page, outcome) = bootstrap(&app, "/frontend/pages/signup.html").await;
            assert_eq!(page, Page::Signup);
            assert!(outcome.is_completed());
            assert_eq!(app.document().location(), None);
        }

        #[tokio::test]
        async fn feed_mounts_and_renders_after_login() {
            let api = Arc::new(FakeApi::new());
            let alice = api.add_user("alice", "alice@example.com", "pw");
            api.add_post(&alice, "hello world");
            let (app, _) = app_with(api.clone(), true);
            app.session().set_current_user(Some(&alice)).unwrap();

            let (page, outcome) = bootstrap(&app, "/frontend/pages/feed.html").await;
            assert_eq!(page, Page::Feed);
            assert!(outcome.is_completed());
            let doc = app.document();
            assert_eq!(doc.field(COMPOSER_AVATAR), Some("A"));
            assert!(doc.container(FEED_CONTAINER).unwrap().html().contains("hello world"));
            assert!(!doc.is_mounted(PROFILE_CONTAINER));
        }

        #[tokio::test]
        async fn logging_out_locks_the_feed_again() {
            let api = Arc::new(FakeApi::new());
            let alice = api.add_user("alice", "alice@example.com", "pw");
            let (app, _) = app_with(api.clone(), true);
            app.session().set_current_user(Some(&alice)).unwrap();
            bootstrap(&app, "feed.html").await;

            crate::auth::logout(&app);
            let before = api.calls().len();
            let (_, outcome) = bootstrap(&app, "feed.html").await;
            assert_eq!(outcome.skipped(), Some(&Skip::NoSession));
            assert_eq!(app.document().location(), Some(LANDING_PAGE));
            assert_eq!(api.calls().len(), before);
        }
    }
}
