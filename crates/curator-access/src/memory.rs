//! In-memory store implementation.
//!
//! Suitable for tests and single-process deployments. Uniqueness and
//! upsert atomicity come from taking the write lock for the whole
//! mutation, which is exactly the guarantee the contract asks of a real
//! backend's transactions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use curator_roles::PlatformRole;
use curator_tenancy::{
    normalize_email, ApprovedEmail, Collection, CollectionMembership, Organization,
    OrganizationMembership, User,
};

use crate::store::{PlatformStore, StoreError, StoreResult};

#[derive(Default)]
struct MemoryState {
    users: HashMap<Uuid, User>,
    user_ids_by_email: HashMap<String, Uuid>,
    organizations: HashMap<Uuid, Organization>,
    organization_ids_by_slug: HashMap<String, Uuid>,
    collections: HashMap<Uuid, Collection>,
    organization_memberships: HashMap<(Uuid, Uuid), OrganizationMembership>,
    collection_memberships: HashMap<(Uuid, Uuid), CollectionMembership>,
    approved_emails: HashMap<String, ApprovedEmail>,
}

/// In-memory [`PlatformStore`] implementation.
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore").finish()
    }
}

impl MemoryStore {
    /// Create a new, empty in-memory store.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::default())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlatformStore for MemoryStore {
    async fn user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .user_ids_by_email
            .get(&normalize_email(email))
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if state.user_ids_by_email.contains_key(&user.email) {
            return Err(StoreError::Conflict {
                entity: "user",
                key: user.email,
            });
        }
        state.user_ids_by_email.insert(user.email.clone(), user.id);
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user_role(
        &self,
        user_id: Uuid,
        role: PlatformRole,
    ) -> StoreResult<Option<User>> {
        let mut state = self.state.write().await;
        Ok(state.users.get_mut(&user_id).map(|user| {
            user.platform_role = role;
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn organization(&self, id: Uuid) -> StoreResult<Option<Organization>> {
        Ok(self.state.read().await.organizations.get(&id).cloned())
    }

    async fn organization_by_slug(&self, slug: &str) -> StoreResult<Option<Organization>> {
        let state = self.state.read().await;
        Ok(state
            .organization_ids_by_slug
            .get(slug)
            .and_then(|id| state.organizations.get(id))
            .cloned())
    }

    async fn organization_ids(&self) -> StoreResult<Vec<Uuid>> {
        Ok(self.state.read().await.organizations.keys().copied().collect())
    }

    async fn insert_organization(&self, organization: Organization) -> StoreResult<Organization> {
        let mut state = self.state.write().await;
        if state.organization_ids_by_slug.contains_key(&organization.slug) {
            return Err(StoreError::Conflict {
                entity: "organization",
                key: organization.slug,
            });
        }
        state
            .organization_ids_by_slug
            .insert(organization.slug.clone(), organization.id);
        state.organizations.insert(organization.id, organization.clone());
        Ok(organization)
    }

    async fn collection(&self, id: Uuid) -> StoreResult<Option<Collection>> {
        Ok(self.state.read().await.collections.get(&id).cloned())
    }

    async fn collections_in_organization(
        &self,
        organization_id: Uuid,
    ) -> StoreResult<Vec<Collection>> {
        Ok(self
            .state
            .read()
            .await
            .collections
            .values()
            .filter(|collection| collection.organization_id() == organization_id)
            .cloned()
            .collect())
    }

    async fn insert_collection(&self, collection: Collection) -> StoreResult<Collection> {
        let mut state = self.state.write().await;
        state.collections.insert(collection.id, collection.clone());
        Ok(collection)
    }

    async fn organization_membership(
        &self,
        organization_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<OrganizationMembership>> {
        Ok(self
            .state
            .read()
            .await
            .organization_memberships
            .get(&(organization_id, user_id))
            .cloned())
    }

    async fn organization_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<OrganizationMembership>> {
        Ok(self
            .state
            .read()
            .await
            .organization_memberships
            .values()
            .filter(|membership| membership.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_organization_membership(
        &self,
        membership: OrganizationMembership,
    ) -> StoreResult<OrganizationMembership> {
        let mut state = self.state.write().await;
        let key = (membership.organization_id, membership.user_id);
        match state.organization_memberships.get_mut(&key) {
            Some(existing) => {
                existing.role = membership.role;
                existing.invited_by = membership.invited_by;
                Ok(existing.clone())
            }
            None => {
                state.organization_memberships.insert(key, membership.clone());
                Ok(membership)
            }
        }
    }

    async fn collection_membership(
        &self,
        collection_id: Uuid,
        user_id: Uuid,
    ) -> StoreResult<Option<CollectionMembership>> {
        Ok(self
            .state
            .read()
            .await
            .collection_memberships
            .get(&(collection_id, user_id))
            .cloned())
    }

    async fn collection_memberships_for_user(
        &self,
        user_id: Uuid,
    ) -> StoreResult<Vec<CollectionMembership>> {
        Ok(self
            .state
            .read()
            .await
            .collection_memberships
            .values()
            .filter(|membership| membership.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn upsert_collection_membership(
        &self,
        membership: CollectionMembership,
    ) -> StoreResult<CollectionMembership> {
        let mut state = self.state.write().await;
        let key = (membership.collection_id, membership.user_id);
        match state.collection_memberships.get_mut(&key) {
            Some(existing) => {
                existing.role = membership.role;
                existing.added_by = membership.added_by;
                Ok(existing.clone())
            }
            None => {
                state.collection_memberships.insert(key, membership.clone());
                Ok(membership)
            }
        }
    }

    async fn approved_email(&self, email: &str) -> StoreResult<Option<ApprovedEmail>> {
        Ok(self
            .state
            .read()
            .await
            .approved_emails
            .get(&normalize_email(email))
            .cloned())
    }

    async fn upsert_approved_email(&self, approval: ApprovedEmail) -> StoreResult<ApprovedEmail> {
        let mut state = self.state.write().await;
        match state.approved_emails.get_mut(&approval.email) {
            Some(existing) => {
                existing.organization_id = approval.organization_id;
                existing.collection_ids = approval.collection_ids;
                existing.role = approval.role;
                existing.approved_by = approval.approved_by;
                existing.consumed_at = approval.consumed_at;
                existing.updated_at = Utc::now();
                Ok(existing.clone())
            }
            None => {
                state
                    .approved_emails
                    .insert(approval.email.clone(), approval.clone());
                Ok(approval)
            }
        }
    }

    async fn mark_approval_consumed(&self, email: &str, at: DateTime<Utc>) -> StoreResult<()> {
        let mut state = self.state.write().await;
        if let Some(approval) = state.approved_emails.get_mut(&normalize_email(email)) {
            approval.consumed_at = Some(at);
            approval.updated_at = at;
        }
        Ok(())
    }
}
