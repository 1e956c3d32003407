use crate::app::{App, Outcome, Skip};
use crate::config::*;
use crate::core::errors::ApiError;
use crate::models::models::{LoginRequest, SignupRequest, User};

fn show_error(app: &App, id: &str, message: &str) {
    app.with_document(|doc| doc.show_notice(id, message, error_notice_ttl()));
}

fn start_session(app: &App, user: &User, error_id: &str) -> Outcome {
    if let Err(e) = app.session().set_current_user(Some(user)) {
        log::error!("Failed to store session: {}", e);
        show_error(app, error_id, MSG_GENERIC_ERROR);
        return Outcome::Failed(ApiError::Storage(e.to_string()));
    }
    log::info!("Logged in as {}", user.username);
    app.with_document(|doc| doc.navigate(FEED_PAGE));
    Outcome::Completed
}

pub async fn login(app: &App, email: &str, password: &str) -> Outcome {
    if email.is_empty() || password.is_empty() {
        show_error(app, LOGIN_ERROR, MSG_FILL_ALL_FIELDS);
        return Outcome::Skipped(Skip::Invalid(MSG_FILL_ALL_FIELDS));
    }

    let _guard = match app.begin("login".to_string()) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };

    let req = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    match app.api().login(&req).await {
        Ok(user) => start_session(app, &user, LOGIN_ERROR),
        Err(e) => {
            log::error!("Login error: {}", e);
            let message = match e {
                ApiError::Unauthorized(_) => MSG_INVALID_CREDENTIALS,
                _ => MSG_GENERIC_ERROR,
            };
            show_error(app, LOGIN_ERROR, message);
            Outcome::Failed(e)
        }
    }
}

pub async fn signup(
    app: &App,
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Outcome {
    if username.is_empty() || email.is_empty() || password.is_empty() || confirm_password.is_empty()
    {
        show_error(app, SIGNUP_ERROR, MSG_ALL_FIELDS_REQUIRED);
        return Outcome::Skipped(Skip::Invalid(MSG_ALL_FIELDS_REQUIRED));
    }
    if password != confirm_password {
        show_error(app, SIGNUP_ERROR, MSG_PASSWORD_MISMATCH);
        return Outcome::Skipped(Skip::Invalid(MSG_PASSWORD_MISMATCH));
    }

    let _guard = match app.begin("signup".to_string()) {
        Some(g) => g,
        None => return Outcome::Skipped(Skip::InFlight),
    };

    let req = SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };

    match app.api().signup(&req).await {
        Ok(user) => start_session(app, &user, SIGNUP_ERROR),
        Err(e) => {
            log::error!("Signup error: {}", e);
            let message = e.detail().unwrap_or(MSG_GENERIC_ERROR).to_string();
            app.with_document(|doc| doc.show_notice(SIGNUP_ERROR, message, error_notice_ttl()));
            Outcome::Failed(e)
        }
    }
}

pub fn logout(app: &App) -> Outcome {
    if let Err(e) = app.session().set_current_user(None) {
        log::error!("Failed to clear session: {}", e);
    }
    app.with_document(|doc| doc.navigate(LANDING_PAGE));
    Outcome::Completed
}

/// Redirects to the landing page when nobody is logged in.
pub fn require_auth(app: &App) -> Option<User> {
    let user = app.current_user();
    if user.is_none() {
        app.with_document(|doc| doc.navigate(LANDING_PAGE));
    }
    user
}
