//! Per-resource membership roles
//!
//! This module defines the rank a user holds on a single organization or
//! collection membership row, independent of their platform-wide role.

use serde::{Deserialize, Serialize};

/// User role within one organization or collection.
///
/// The hierarchy is: `Viewer < Editor < Admin < Owner`, scoped to the
/// resource the membership row points at. Management authority over a
/// resource requires `Admin` or above on that resource; an organization
/// `Admin`/`Owner` also manages every collection beneath the
/// organization.
///
/// # Permission Model
///
/// - **Viewer**: read-only access to the resource
/// - **Editor**: can create and edit content within the resource
/// - **Admin**: can manage the resource and its members
/// - **Owner**: full control of the resource
///
/// # Examples
///
/// ```
/// use curator_roles::MembershipRole;
///
/// let role = MembershipRole::Editor;
/// assert!(role.can_edit());
/// assert!(!role.is_admin());
///
/// assert!(MembershipRole::Owner.is_admin());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MembershipRole {
    /// Read-only access
    Viewer = 1,

    /// Can create and edit content
    Editor = 2,

    /// Can manage the resource and its members
    Admin = 3,

    /// Full control of the resource
    Owner = 4,
}

impl MembershipRole {
    /// All membership roles in ascending rank order.
    pub const fn all() -> [MembershipRole; 4] {
        [
            MembershipRole::Viewer,
            MembershipRole::Editor,
            MembershipRole::Admin,
            MembershipRole::Owner,
        ]
    }

    /// Check if this role carries management authority over the resource.
    ///
    /// # Returns
    ///
    /// `true` for Admin and Owner roles
    pub fn is_admin(&self) -> bool {
        *self >= MembershipRole::Admin
    }

    /// Check if this role can edit content within the resource.
    ///
    /// # Returns
    ///
    /// `true` for Editor, Admin, and Owner roles
    pub fn can_edit(&self) -> bool {
        *self >= MembershipRole::Editor
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(MembershipRole)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use curator_roles::MembershipRole;
    ///
    /// assert_eq!(MembershipRole::parse("admin"), Some(MembershipRole::Admin));
    /// assert_eq!(MembershipRole::parse("VIEWER"), Some(MembershipRole::Viewer));
    /// assert_eq!(MembershipRole::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "viewer" => Some(Self::Viewer),
            "editor" => Some(Self::Editor),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            _ => None,
        }
    }

    /// Get string representation of the role.
    ///
    /// # Returns
    ///
    /// Lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Get a human-readable display name for the role.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Admin => "Admin",
            Self::Owner => "Owner",
        }
    }
}

impl Default for MembershipRole {
    fn default() -> Self {
        Self::Viewer
    }
}
