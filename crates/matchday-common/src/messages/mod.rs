//! Message catalog: stable codes to user-facing text
//!
//! Responses carry a machine code plus the catalog text for that code.
//! Translations plug in as further [`MessageCatalog`] implementations.

/// Codes for successful outcomes
pub mod codes {
    pub const LOGIN_SUCCESS: &str = "LOGIN_SUCCESS";
    pub const LOGOUT_SUCCESS: &str = "LOGOUT_SUCCESS";
    pub const SESSION_ALREADY_ENDED: &str = "SESSION_ALREADY_ENDED";
    pub const SESSION_ACTIVE: &str = "SESSION_ACTIVE";
    pub const TOKEN_REFRESHED: &str = "TOKEN_REFRESHED";
    pub const REGISTERED: &str = "REGISTERED";
    pub const PROFILE: &str = "PROFILE";
    pub const SESSIONS_REVOKED: &str = "SESSIONS_REVOKED";
    pub const USER_DELETED: &str = "USER_DELETED";
}

/// Resolves a message code to display text
pub trait MessageCatalog: Send + Sync {
    /// Text for `code`; unknown codes resolve to a generic message
    fn message(&self, code: &str) -> &'static str;
}

/// Built-in English catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn message(&self, code: &str) -> &'static str {
        match code {
            codes::LOGIN_SUCCESS => "Logged in successfully.",
            codes::LOGOUT_SUCCESS => "Logged out successfully.",
            codes::SESSION_ALREADY_ENDED => "No active session; you are logged out.",
            codes::SESSION_ACTIVE => "Session is active.",
            codes::TOKEN_REFRESHED => "Session refreshed.",
            codes::REGISTERED => "Account created. Check your inbox to verify your e-mail.",
            codes::PROFILE => "Current user.",
            codes::SESSIONS_REVOKED => "All sessions of the user were revoked.",
            codes::USER_DELETED => "User deleted.",

            "INVALID_CREDENTIALS" => "Invalid e-mail or password.",
            "INVALID_TOKEN" | "MISSING_AUTH" => "You must be logged in to do that.",
            "TOKEN_EXPIRED" => "Your session has expired. Please log in again.",
            "INVALID_REFRESH_TOKEN" => "Your session is no longer valid. Please log in again.",
            "ACCOUNT_NOT_VERIFIED" => {
                "Your e-mail address is not verified yet. We sent you a new verification e-mail."
            }
            "INSUFFICIENT_PERMISSIONS" => "You are not allowed to do that.",
            "CSRF_MISMATCH" => "The request could not be verified. Reload the page and retry.",
            "VALIDATION_ERROR" | "INVALID_INPUT" | "INVALID_EMAIL" => "The submitted data is invalid.",
            "WEAK_PASSWORD" => "The password is too weak.",
            "NOT_FOUND" | "UNKNOWN_USER" => "The requested resource does not exist.",
            "CONFLICT" | "EMAIL_ALREADY_EXISTS" => "An account with this e-mail already exists.",
            "RATE_LIMIT_EXCEEDED" => "Too many attempts. Please wait a moment and try again.",
            "CLIENT_IP_UNKNOWN" => "Your request could not be attributed to a client.",
            "DATABASE_ERROR" | "CACHE_ERROR" => "A storage error occurred. Please try again later.",
            "EXTERNAL_SERVICE_ERROR" | "MAILER_ERROR" => {
                "An external service is unavailable. Please try again later."
            }
            _ => "Something went wrong. Please try again later.",
        }
    }
}

/// Look up `code` in the default catalog
pub fn t(code: &str) -> &'static str {
    EnglishCatalog.message(code)
}
