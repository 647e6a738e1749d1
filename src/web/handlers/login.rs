//! Login page and form submission handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::application::services::LoginError;
use crate::domain::entities::{Credentials, FieldErrors};
use crate::state::AppState;
use crate::web::cookies::{self, Flash};
use crate::web::notice::Notice;

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - Identifier and password inputs, each with an inline error slot
/// - "Find ID • PW" (inert) and "Sign up" links
/// - Pop-up blocking warning
#[derive(Template, WebTemplate, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub identifier: String,
    pub identifier_error: Option<String>,
    pub password_error: Option<String>,
    pub notice: Option<Notice>,
}

impl LoginTemplate {
    fn with_errors(identifier: String, errors: &FieldErrors) -> Self {
        Self {
            identifier,
            identifier_error: errors.get("identifier").map(str::to_string),
            password_error: errors.get("password").map(str::to_string),
            notice: None,
        }
    }

    fn with_notice(identifier: String, notice: Notice) -> Self {
        Self {
            identifier,
            notice: Some(notice),
            ..Self::default()
        }
    }
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login`
///
/// Shows a pending flash notification (for example after logout) once.
pub async fn login_page(jar: CookieJar) -> impl IntoResponse {
    let (jar, flash) = cookies::take_flash(jar);

    let page = LoginTemplate {
        notice: flash.map(Notice::from),
        ..LoginTemplate::default()
    };

    (jar, page)
}

/// Handles a login form submission.
///
/// # Endpoint
///
/// `POST /login` with `application/x-www-form-urlencoded` fields
/// `identifier` and `password`.
///
/// # Responses
///
/// - **303 See Other** to `/` on success, with a new `sid` cookie and a
///   success flash
/// - **422 Unprocessable Entity** with inline field errors when validation
///   fails; the auth service is not contacted
/// - **409 Conflict** while another submission for the identifier is pending
/// - **401 Unauthorized** with one generic notice for every other failure
///
/// The identifier is echoed back into the form; the password never is.
pub async fn login_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(credentials): Form<Credentials>,
) -> Response {
    let identifier = credentials.identifier.clone();
    let previous_session = cookies::session_id(&jar);

    match state
        .login_service
        .submit(credentials, previous_session.as_deref())
        .await
    {
        Ok(outcome) => {
            let jar = cookies::with_session(jar, outcome.session_id, state.cookie_secure);
            let jar = cookies::with_flash(jar, Flash::SignedIn, state.cookie_secure);
            (jar, Redirect::to("/")).into_response()
        }
        Err(LoginError::Invalid(errors)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            LoginTemplate::with_errors(identifier, &errors),
        )
            .into_response(),
        Err(LoginError::InProgress) => (
            StatusCode::CONFLICT,
            LoginTemplate::with_notice(identifier, Notice::LOGIN_IN_PROGRESS),
        )
            .into_response(),
        Err(LoginError::Failed) => (
            StatusCode::UNAUTHORIZED,
            LoginTemplate::with_notice(identifier, Notice::LOGIN_FAILED),
        )
            .into_response(),
    }
}
