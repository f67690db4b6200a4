//! Authenticated session identity.
//!
//! Authentication itself is an external collaborator: by the time a
//! [`Session`] reaches this crate it is fully trusted. The core only
//! consumes the user id and platform role it carries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use curator_roles::PlatformRole;
use curator_tenancy::User;

use crate::error::{AccessError, AccessResult};

/// The acting user's identity, as established by the authentication
/// layer.
///
/// Carries exactly what the decision contract needs: `{ id, role }`.
/// Role-assignment checks deliberately do not trust the role snapshot
/// here; they re-fetch the stored role at request time (see
/// `AdminService::update_user_role`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// The acting user's id
    pub user_id: Uuid,

    /// The acting user's platform role at authentication time
    pub role: PlatformRole,
}

impl Session {
    /// Create a session for a user id and role.
    pub fn new(user_id: Uuid, role: PlatformRole) -> Self {
        Self { user_id, role }
    }

    /// Create a session for a stored user.
    pub fn for_user(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.platform_role,
        }
    }
}

/// Reject a missing session.
///
/// Every administrative endpoint performs this check first; the
/// distinction between "must sign in" and "signed in but not allowed" is
/// load-bearing for the HTTP layer (401 vs 403).
///
/// # Examples
///
/// ```
/// use curator_access::{require_session, AccessError, Session};
/// use curator_roles::PlatformRole;
/// use uuid::Uuid;
///
/// let session = Session::new(Uuid::now_v7(), PlatformRole::User);
/// assert!(require_session(Some(&session)).is_ok());
/// assert!(matches!(
///     require_session(None),
///     Err(AccessError::Unauthenticated)
/// ));
/// ```
pub fn require_session(session: Option<&Session>) -> AccessResult<&Session> {
    session.ok_or(AccessError::Unauthenticated)
}
