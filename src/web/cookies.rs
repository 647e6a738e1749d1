//! Session and flash cookies.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

/// Cookie holding the session id.
pub const SESSION_COOKIE: &str = "sid";

/// Cookie carrying a one-shot notification across a redirect.
pub const FLASH_COOKIE: &str = "flash";

/// One-shot notification shown after a redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    SignedIn,
    SignedOut,
}

impl Flash {
    fn as_str(self) -> &'static str {
        match self {
            Flash::SignedIn => "signed_in",
            Flash::SignedOut => "signed_out",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "signed_in" => Some(Flash::SignedIn),
            "signed_out" => Some(Flash::SignedOut),
            _ => None,
        }
    }
}

fn build(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

/// Returns the session id sent by the browser.
pub fn session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

pub fn with_session(jar: CookieJar, session_id: String, secure: bool) -> CookieJar {
    jar.add(build(SESSION_COOKIE, session_id, secure))
}

pub fn without_session(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

pub fn with_flash(jar: CookieJar, flash: Flash, secure: bool) -> CookieJar {
    jar.add(build(FLASH_COOKIE, flash.as_str().to_string(), secure))
}

/// Reads and clears the flash cookie.
pub fn take_flash(jar: CookieJar) -> (CookieJar, Option<Flash>) {
    let flash = jar
        .get(FLASH_COOKIE)
        .and_then(|cookie| Flash::parse(cookie.value()));

    if jar.get(FLASH_COOKIE).is_some() {
        (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
    } else {
        (jar, flash)
    }
}
