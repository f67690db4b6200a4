//! User domain model
//!
//! This module provides the platform user account. Accounts are unique by
//! their normalized email and carry exactly one platform-wide role.

use chrono::{DateTime, Utc};
use curator_roles::PlatformRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Normalize an email address for use as a unique key.
///
/// Emails are compared case-insensitively and with surrounding whitespace
/// stripped. Every store lookup and every ledger key goes through this
/// function, so a user who registers as `Ada@Example.com` matches an
/// approval recorded for `ada@example.com `.
///
/// # Examples
///
/// ```
/// use curator_tenancy::normalize_email;
///
/// assert_eq!(normalize_email("  Ada@Example.com "), "ada@example.com");
/// ```
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// A platform user account.
///
/// Users are created at registration and never deleted by the
/// authorization core. The platform role is mutated only through the
/// guarded role-update operation, which validates the change against the
/// acting user's stored role.
///
/// # Examples
///
/// ```
/// use curator_roles::PlatformRole;
/// use curator_tenancy::User;
///
/// let user = User::new("Ada@Example.com", PlatformRole::CollectionAdmin);
/// assert_eq!(user.email, "ada@example.com");
/// assert_eq!(user.platform_role, PlatformRole::CollectionAdmin);
/// assert!(user.is_active);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, stored normalized (unique across the platform)
    pub email: String,

    /// Optional display name
    pub display_name: Option<String>,

    /// Platform-wide role
    pub platform_role: PlatformRole,

    /// Whether the account is active
    pub is_active: bool,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the account was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user account.
    ///
    /// The account is created with:
    /// - A newly generated UUID v7 ID
    /// - The email normalized (trimmed, lowercased)
    /// - Active status
    /// - Current timestamps
    ///
    /// # Arguments
    ///
    /// * `email` - The email address (normalized on the way in)
    /// * `platform_role` - The initial platform role
    pub fn new(email: impl AsRef<str>, platform_role: PlatformRole) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            email: normalize_email(email.as_ref()),
            display_name: None,
            platform_role,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
