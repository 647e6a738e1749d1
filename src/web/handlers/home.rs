//! Application root page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;

use crate::domain::entities::{SessionProfile, grade_text};
use crate::web::cookies;
use crate::web::middleware::web_auth::CurrentSession;
use crate::web::notice::Notice;

/// Template for the signed-in home page.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub profile: SessionProfile,
    /// Nickname, or the real name when no nickname is set.
    pub display_name: String,
    pub grade: String,
    pub major: String,
    pub minor: String,
    pub kakao_account: String,
    pub notice: Option<Notice>,
}

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

/// Renders the home page for the current session.
///
/// # Endpoint
///
/// `GET /`
///
/// # Authentication
///
/// Requires a session; see [`crate::web::middleware::web_auth`].
/// Consumes the success flash set by the login handler, so the success
/// notification shows exactly once.
pub async fn home_handler(
    Extension(session): Extension<CurrentSession>,
    jar: CookieJar,
) -> impl IntoResponse {
    let (jar, flash) = cookies::take_flash(jar);
    let profile = session.profile;

    let page = HomeTemplate {
        display_name: profile
            .nickname
            .clone()
            .unwrap_or_else(|| profile.name.clone()),
        grade: grade_text(&profile.grade),
        major: or_dash(&profile.major),
        minor: or_dash(&profile.minor),
        kakao_account: profile
            .kakao_account
            .clone()
            .unwrap_or_else(|| "Not linked".to_string()),
        profile,
        notice: flash.map(Notice::from),
    };

    (jar, page)
}
