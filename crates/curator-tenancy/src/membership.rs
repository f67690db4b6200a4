//! Membership domain models
//!
//! This module provides the membership rows that link users to
//! organizations and collections. At most one row exists per
//! `(resource, user)` pair; the store enforces this with atomic
//! composite-key upserts.

use chrono::{DateTime, Utc};
use curator_roles::MembershipRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Organization membership linking a user to an organization.
///
/// This represents a user's standing within one organization. Management
/// authority over the organization (and, by inheritance, every collection
/// beneath it) requires a role of `Admin` or above on this row.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use curator_roles::MembershipRole;
/// use curator_tenancy::OrganizationMembership;
///
/// let org_id = Uuid::now_v7();
/// let user_id = Uuid::now_v7();
/// let membership = OrganizationMembership::new(org_id, user_id, MembershipRole::Editor);
/// assert_eq!(membership.role, MembershipRole::Editor);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMembership {
    /// Unique membership ID
    pub id: Uuid,

    /// Organization ID (composite-unique with `user_id`)
    pub organization_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the organization
    pub role: MembershipRole,

    /// When the user joined
    pub joined_at: DateTime<Utc>,

    /// Who invited this user (if applicable)
    pub invited_by: Option<Uuid>,
}

impl OrganizationMembership {
    /// Creates a new organization membership.
    ///
    /// The membership is created with a newly generated UUID v7 ID and
    /// the current timestamp for `joined_at`.
    ///
    /// # Arguments
    ///
    /// * `organization_id` - The organization ID
    /// * `user_id` - The user ID
    /// * `role` - The user's role in the organization
    pub fn new(organization_id: Uuid, user_id: Uuid, role: MembershipRole) -> Self {
        Self {
            id: Uuid::now_v7(),
            organization_id,
            user_id,
            role,
            joined_at: Utc::now(),
            invited_by: None,
        }
    }

    /// Set who invited this user.
    pub fn with_inviter(mut self, inviter_id: Uuid) -> Self {
        self.invited_by = Some(inviter_id);
        self
    }
}

/// Collection membership granting a user direct standing on one
/// collection.
///
/// Independent of [`OrganizationMembership`]: a user may hold collection
/// access without any organization-level row, and vice versa.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use curator_roles::MembershipRole;
/// use curator_tenancy::CollectionMembership;
///
/// let collection_id = Uuid::now_v7();
/// let user_id = Uuid::now_v7();
/// let membership = CollectionMembership::new(collection_id, user_id, MembershipRole::Viewer);
/// assert_eq!(membership.collection_id, collection_id);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionMembership {
    /// Unique membership ID
    pub id: Uuid,

    /// Collection ID (composite-unique with `user_id`)
    pub collection_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the collection
    pub role: MembershipRole,

    /// When the user was added
    pub added_at: DateTime<Utc>,

    /// Who added this user (if applicable)
    pub added_by: Option<Uuid>,
}

impl CollectionMembership {
    /// Creates a new collection membership.
    ///
    /// # Arguments
    ///
    /// * `collection_id` - The collection ID
    /// * `user_id` - The user ID
    /// * `role` - The user's role in the collection
    pub fn new(collection_id: Uuid, user_id: Uuid, role: MembershipRole) -> Self {
        Self {
            id: Uuid::now_v7(),
            collection_id,
            user_id,
            role,
            added_at: Utc::now(),
            added_by: None,
        }
    }

    /// Set who added this user to the collection.
    pub fn with_adder(mut self, adder_id: Uuid) -> Self {
        self.added_by = Some(adder_id);
        self
    }
}
