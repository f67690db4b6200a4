//! Store contract for the authorization core.
//!
//! All durable state (users, tenancy entities, memberships, approvals)
//! lives in an external transactional store. This module defines the
//! read/upsert interface that store must satisfy; the core never talks
//! to a database directly.
//!
//! The contract the implementations must honor:
//! - reads are repeatable within a request (stale-by-one-request is
//!   acceptable, authorization is re-evaluated per request)
//! - upserts are atomic with respect to their stated unique key, so two
//!   concurrent writes for the same key converge to one row
//! - uniqueness violations on insert surface as [`StoreError::Conflict`]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use curator_roles::PlatformRole;
use curator_tenancy::{
    ApprovedEmail, Collection, CollectionMembership, Organization, OrganizationMembership, User,
};

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key already exists
    #[error("conflict on {entity} key {key}")]
    Conflict {
        /// Entity kind whose key collided
        entity: &'static str,
        /// The colliding key value
        key: String,
    },

    /// The backend failed
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read/upsert interface over the platform's durable state.
///
/// Implementations wrap the real query engine; [`MemoryStore`] provides
/// an in-process implementation for tests and single-process
/// deployments.
///
/// [`MemoryStore`]: crate::memory::MemoryStore
#[async_trait]
pub trait PlatformStore: Send + Sync {
    // Users

    /// Fetch a user by id.
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Fetch a user by normalized email (the unique key).
    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Insert a new user. Fails with [`StoreError::Conflict`] if the
    /// email is already taken.
    async fn insert_user(&self, user: User) -> StoreResult<User>;

    /// Update a user's platform role. Returns the updated user, or
    /// `None` if the id does not exist.
    async fn update_user_role(
        &self,
        user_id: Uuid,
        role: PlatformRole,
    ) -> StoreResult<Option<User>>;

    // Organizations

    /// Fetch an organization by id.
    async fn organization(&self, id: Uuid) -> StoreResult<Option<Organization>>;

    /// Fetch an organization by slug (the unique key).
    async fn organization_by_slug(&self, slug: &str) -> StoreResult<Option<Organization>>;

    /// Ids of every organization in the store.
    async fn organization_ids(&self) -> StoreResult<Vec<Uuid>>;

    /// Insert a new organization. Fails with [`StoreError::Conflict`] if
    /// the slug is already taken.
    async fn insert_organization(&self, organization: Organization) -> StoreResult<Organization>;

    // Collections

    /// Fetch a collection by id.
    async fn collection(&self, id: Uuid) -> StoreResult<Option<Collection>>;

    /// All collections owned by an organization.
    async fn collections_in_organization(
        &self,
        organization_id: Uuid,
    ) -> StoreResult<Vec<Collection>>;

    /// Insert a new collection.
    async fn insert_collection(&self, collection: Collection) -> StoreResult<Collection>;

    // Organization memberships

    /// Fetch the membership row for `(organization_id, user_id)`, if any.
    async fn organization_membership(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<OrganizationMembership>>;

    /// All organization memberships held by a user.
    async fn organization_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OrganizationMembership>>;

    /// Atomically insert-or-update the membership row keyed by
    /// `(organization_id, user_id)`. An existing row keeps its id and
    /// join timestamp; the role and inviter are overwritten.
    async fn upsert_organization_membership(
        &self,
        membership: OrganizationMembership,
    ) -> StoreResult<OrganizationMembership>;

    // Collection memberships

    /// Fetch the membership row for `(collection_id, user_id)`, if any.
    async fn collection_membership(
        &self,
        collection_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<CollectionMembership>>;

    /// All collection memberships held by a user.
    async fn collection_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<CollectionMembership>>;

    /// Atomically insert-or-update the membership row keyed by
    /// `(collection_id, user_id)`.
    async fn upsert_collection_membership(
        &self,
        membership: CollectionMembership,
    ) -> StoreResult<CollectionMembership>;

    // Approvals

    /// Fetch the approval recorded for a normalized email, if any.
    async fn approved_email(&self, email: &str) -> StoreResult<Option<ApprovedEmail>>;

    /// Atomically insert-or-update the approval keyed by normalized
    /// email. An existing row keeps its creation timestamp; the payload
    /// (role, organization, collections, approver) is overwritten and
    /// the consumed marker is taken from the incoming row.
    async fn upsert_approved_email(&self, approval: ApprovedEmail) -> StoreResult<ApprovedEmail>;

    /// Stamp the consumed marker on an approval. A missing entry is a
    /// no-op.
    async fn mark_approval_consumed(&self, email: &str, at: DateTime<Utc>) -> StoreResult<()>;
}
