//! User-facing notifications rendered on pages.

use super::cookies::Flash;

/// A notification rendered at the top of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Notice {
    /// CSS modifier: `success`, `error` or `info`.
    pub kind: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub const LOGIN_SUCCEEDED: Notice = Notice {
        kind: "success",
        message: "Login successful!",
    };

    pub const LOGIN_FAILED: Notice = Notice {
        kind: "error",
        message: "Login failed! Please check your ID or password.",
    };

    pub const LOGIN_IN_PROGRESS: Notice = Notice {
        kind: "info",
        message: "A login request is already in progress.",
    };

    pub const SIGNED_OUT: Notice = Notice {
        kind: "info",
        message: "You have been signed out.",
    };
}

impl From<Flash> for Notice {
    fn from(flash: Flash) -> Self {
        match flash {
            Flash::SignedIn => Notice::LOGIN_SUCCEEDED,
            Flash::SignedOut => Notice::SIGNED_OUT,
        }
    }
}
