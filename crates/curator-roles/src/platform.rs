//! Platform-wide roles and capability predicates
//!
//! This module defines the global role carried on every user account and
//! the capability checks the rest of the platform consults before an
//! administrative action.

use serde::{Deserialize, Serialize};

/// Platform-wide role on a user account.
///
/// Roles are hierarchical, with each role inheriting the capabilities of
/// lower roles. The hierarchy is:
/// `User < CollectionAdmin < OrganizationAdmin < SuperUser < Admin`
///
/// # Capability Model
///
/// - **User**: consumer account, no administrative surface
/// - **CollectionAdmin**: can create and manage collections they are
///   scoped to
/// - **OrganizationAdmin**: additionally manages organizations, users,
///   and registration approvals within their scope
/// - **SuperUser**: global content bypass, every resource is in scope
/// - **Admin**: full platform control
///
/// Every capability is a threshold comparison on rank, so a capability
/// granted at one rank is granted at every higher rank. The global
/// content bypass is deliberately reserved for the top two ranks.
///
/// # Examples
///
/// ```
/// use curator_roles::PlatformRole;
///
/// let role = PlatformRole::CollectionAdmin;
/// assert!(role.can_access_admin());
/// assert!(role.can_manage_collections());
/// assert!(!role.can_manage_organizations());
///
/// let admin = PlatformRole::Admin;
/// assert!(admin.can_view_all_content());
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlatformRole {
    /// Consumer account with no administrative surface
    User = 0,

    /// Can create and manage scoped collections
    CollectionAdmin = 1,

    /// Can manage scoped organizations, users, and approvals
    OrganizationAdmin = 2,

    /// Global content bypass; every resource is in scope
    SuperUser = 3,

    /// Full platform control
    Admin = 4,
}

impl PlatformRole {
    /// All platform roles in ascending rank order.
    pub const fn all() -> [PlatformRole; 5] {
        [
            PlatformRole::User,
            PlatformRole::CollectionAdmin,
            PlatformRole::OrganizationAdmin,
            PlatformRole::SuperUser,
            PlatformRole::Admin,
        ]
    }

    /// Check if this role may enter the administrative surface at all.
    ///
    /// # Returns
    ///
    /// `true` for every rank except `User`
    pub fn can_access_admin(&self) -> bool {
        *self >= PlatformRole::CollectionAdmin
    }

    /// Check if this role can create collections.
    ///
    /// # Returns
    ///
    /// `true` for CollectionAdmin and above
    pub fn can_create_collections(&self) -> bool {
        *self >= PlatformRole::CollectionAdmin
    }

    /// Check if this role can manage collections it is scoped to.
    ///
    /// # Returns
    ///
    /// `true` for CollectionAdmin and above
    pub fn can_manage_collections(&self) -> bool {
        *self >= PlatformRole::CollectionAdmin
    }

    /// Check if this role can manage organizations it is scoped to.
    ///
    /// Organizations are the outer tenancy boundary, so this threshold is
    /// strictly above the collection-management threshold.
    ///
    /// # Returns
    ///
    /// `true` for OrganizationAdmin and above
    pub fn can_manage_organizations(&self) -> bool {
        *self >= PlatformRole::OrganizationAdmin
    }

    /// Check if this role can manage user accounts and assign roles.
    ///
    /// # Returns
    ///
    /// `true` for OrganizationAdmin and above
    pub fn can_manage_users(&self) -> bool {
        *self >= PlatformRole::OrganizationAdmin
    }

    /// Check if this role can manage registration approvals.
    ///
    /// # Returns
    ///
    /// `true` for OrganizationAdmin and above
    pub fn can_manage_approvals(&self) -> bool {
        *self >= PlatformRole::OrganizationAdmin
    }

    /// Check if this role carries the global content bypass.
    ///
    /// When this is `true`, every scope check short-circuits to allowed:
    /// the membership resolver is skipped and every organization,
    /// collection, and piece of content is manageable and visible.
    ///
    /// # Returns
    ///
    /// `true` only for the top two ranks (SuperUser and Admin)
    pub fn can_view_all_content(&self) -> bool {
        *self >= PlatformRole::SuperUser
    }

    /// The platform roles this actor may grant to others.
    ///
    /// This is the privilege-escalation guard: the returned set never
    /// contains a role ranked above the actor, and is empty whenever the
    /// actor cannot manage users at all.
    ///
    /// # Returns
    ///
    /// Assignable roles in ascending rank order
    ///
    /// # Examples
    ///
    /// ```
    /// use curator_roles::PlatformRole;
    ///
    /// let roles = PlatformRole::OrganizationAdmin.assignable_roles();
    /// assert!(roles.contains(&PlatformRole::OrganizationAdmin));
    /// assert!(!roles.contains(&PlatformRole::SuperUser));
    ///
    /// assert!(PlatformRole::User.assignable_roles().is_empty());
    /// ```
    pub fn assignable_roles(&self) -> Vec<PlatformRole> {
        if !self.can_manage_users() {
            return Vec::new();
        }
        Self::all().into_iter().filter(|role| role <= self).collect()
    }

    /// Check if this actor may grant `target` to another user.
    ///
    /// Equivalent to membership in [`assignable_roles`](Self::assignable_roles).
    /// Callers must evaluate this against the actor's currently stored
    /// role, not a cached or client-supplied one.
    ///
    /// # Returns
    ///
    /// `true` if the grant would not escalate past the actor's own rank
    pub fn can_assign(&self, target: PlatformRole) -> bool {
        self.can_manage_users() && target <= *self
    }

    /// Role options for selection UIs, restricted to what the actor may
    /// assign.
    ///
    /// # Returns
    ///
    /// `(role, display label)` pairs in ascending rank order
    pub fn role_options(&self) -> Vec<(PlatformRole, &'static str)> {
        self.assignable_roles()
            .into_iter()
            .map(|role| (role, role.display_name()))
            .collect()
    }

    /// Parse role from string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(PlatformRole)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use curator_roles::PlatformRole;
    ///
    /// assert_eq!(PlatformRole::parse("admin"), Some(PlatformRole::Admin));
    /// assert_eq!(
    ///     PlatformRole::parse("COLLECTION_ADMIN"),
    ///     Some(PlatformRole::CollectionAdmin)
    /// );
    /// assert_eq!(PlatformRole::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "collection_admin" => Some(Self::CollectionAdmin),
            "organization_admin" => Some(Self::OrganizationAdmin),
            "super_user" => Some(Self::SuperUser),
            "admin" => Some(Self::Admin),
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
            Self::User => "user",
            Self::CollectionAdmin => "collection_admin",
            Self::OrganizationAdmin => "organization_admin",
            Self::SuperUser => "super_user",
            Self::Admin => "admin",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use curator_roles::PlatformRole;
    ///
    /// assert_eq!(PlatformRole::SuperUser.display_name(), "Super User");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::CollectionAdmin => "Collection Admin",
            Self::OrganizationAdmin => "Organization Admin",
            Self::SuperUser => "Super User",
            Self::Admin => "Admin",
        }
    }
}

impl Default for PlatformRole {
    fn default() -> Self {
        Self::User
    }
}
