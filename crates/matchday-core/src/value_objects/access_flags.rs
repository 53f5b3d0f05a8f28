//! Authorization flags carried by access tokens

use serde::{Deserialize, Serialize};

/// Authorization flags of a user.
///
/// Snapshotted into the access token at issuance time; the request gate trusts
/// the snapshot and never re-reads the store, so changes only become visible at
/// the next refresh or login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccessFlags {
    pub is_admin: bool,
    pub has_access: bool,
}

impl AccessFlags {
    #[must_use]
    pub const fn new(is_admin: bool, has_access: bool) -> Self {
        Self {
            is_admin,
            has_access,
        }
    }

    /// Flags for a regular member that was granted access
    #[must_use]
    pub const fn member() -> Self {
        Self::new(false, true)
    }

    /// Flags for an administrator
    #[must_use]
    pub const fn admin() -> Self {
        Self::new(true, true)
    }
}
