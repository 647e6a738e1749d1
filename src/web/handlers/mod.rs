//! HTML page handlers.

mod home;
mod login;
mod logout;

pub use home::{HomeTemplate, home_handler};
pub use login::{LoginTemplate, login_page, login_submit};
pub use logout::logout_handler;
