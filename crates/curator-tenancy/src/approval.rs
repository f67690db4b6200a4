//! Approved-email ledger entries
//!
//! This module provides the pre-registration allow-list row: an approval
//! recorded against a normalized email, granting a future account its
//! initial platform role and seed memberships.

use chrono::{DateTime, Utc};
use curator_roles::PlatformRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::normalize_email;

/// A pre-registration approval keyed by normalized email.
///
/// The email is the globally unique key: recording a second approval for
/// the same email overwrites the first (upsert), never duplicates.
/// Registration consumes the entry exactly once, stamping
/// [`consumed_at`](Self::consumed_at); consumed entries are retained for
/// inspection rather than deleted.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use curator_roles::PlatformRole;
/// use curator_tenancy::ApprovedEmail;
///
/// let org_id = Uuid::now_v7();
/// let approval = ApprovedEmail::new("Invitee@Example.com", PlatformRole::CollectionAdmin)
///     .with_organization(org_id);
///
/// assert_eq!(approval.email, "invitee@example.com");
/// assert_eq!(approval.organization_id, Some(org_id));
/// assert!(!approval.is_consumed());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApprovedEmail {
    /// Normalized email address (globally unique key)
    pub email: String,

    /// Organization the new account is seeded into, if any
    pub organization_id: Option<Uuid>,

    /// Collections the new account is seeded into
    #[serde(default)]
    pub collection_ids: Vec<Uuid>,

    /// Platform role granted on registration
    pub role: PlatformRole,

    /// Who recorded this approval (if applicable)
    pub approved_by: Option<Uuid>,

    /// When the approval was recorded
    pub created_at: DateTime<Utc>,

    /// When the approval was last overwritten
    pub updated_at: DateTime<Utc>,

    /// When the approval was consumed by a registration, if it has been
    pub consumed_at: Option<DateTime<Utc>>,
}

impl ApprovedEmail {
    /// Creates a new approval for `email`.
    ///
    /// The email is normalized on the way in; the entry starts
    /// unconsumed with no organization or collections.
    ///
    /// # Arguments
    ///
    /// * `email` - The invitee's email address
    /// * `role` - The platform role to grant on registration
    pub fn new(email: impl AsRef<str>, role: PlatformRole) -> Self {
        let now = Utc::now();
        Self {
            email: normalize_email(email.as_ref()),
            organization_id: None,
            collection_ids: Vec::new(),
            role,
            approved_by: None,
            created_at: now,
            updated_at: now,
            consumed_at: None,
        }
    }

    /// Seed the new account into an organization at registration.
    pub fn with_organization(mut self, organization_id: Uuid) -> Self {
        self.organization_id = Some(organization_id);
        self
    }

    /// Seed the new account into a set of collections at registration.
    pub fn with_collections(mut self, collection_ids: impl IntoIterator<Item = Uuid>) -> Self {
        self.collection_ids = collection_ids.into_iter().collect();
        self
    }

    /// Set who recorded this approval.
    pub fn with_approver(mut self, approver_id: Uuid) -> Self {
        self.approved_by = Some(approver_id);
        self
    }

    /// Check if this approval has already been consumed by a
    /// registration.
    pub fn is_consumed(&self) -> bool {
        self.consumed_at.is_some()
    }
}
