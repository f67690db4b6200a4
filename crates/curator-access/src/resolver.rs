//! Membership-scoping resolver.
//!
//! Computes which organizations and collections a user may administer by
//! combining the platform-level bypass with direct membership rows.
//! Collection authority resolves in a documented two-level order:
//! global bypass, then the direct collection row, then the parent
//! organization's row.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use curator_roles::MembershipRole;

use crate::error::AccessResult;
use crate::session::Session;
use crate::store::PlatformStore;

/// Which record granted a management decision.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GrantSource {
    /// The platform role carries the global bypass
    GlobalBypass,

    /// A direct collection membership of sufficient rank
    CollectionRole,

    /// An organization membership of sufficient rank on the collection's
    /// parent
    OrganizationRole,
}

/// Outcome of a scoped management check.
///
/// The tagged form exists so the inheritance rule is testable in
/// isolation: a denial distinguishes "no membership row at all" from
/// "rows exist but none reaches management rank".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScopeDecision {
    /// Management is allowed, with the record that granted it
    Granted(GrantSource),

    /// Membership rows exist, but the best rank seen is below `Admin`
    DeniedInsufficientRank(MembershipRole),

    /// No membership row reaches the resource (also the answer for a
    /// nonexistent resource id)
    DeniedNoRecord,
}

impl ScopeDecision {
    /// Check if the decision allows management.
    pub fn is_granted(&self) -> bool {
        matches!(self, ScopeDecision::Granted(_))
    }
}

/// Resolves a user's manageable set from membership rows.
///
/// All methods answer `false`/denied for resource ids that do not exist;
/// existence reporting belongs to the caller.
pub struct MembershipResolver {
    store: Arc<dyn PlatformStore>,
}

impl std::fmt::Debug for MembershipResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MembershipResolver").finish()
    }
}

impl MembershipResolver {
    /// Create a resolver over a store.
    pub fn new(store: Arc<dyn PlatformStore>) -> Self {
        Self { store }
    }

    /// Ids of every organization the user may administer.
    ///
    /// With the global bypass this is every organization in the store;
    /// otherwise the organizations where the user holds a membership of
    /// rank `Admin` or above.
    pub async fn manageable_organization_ids(&self, session: &Session) -> AccessResult<Vec<Uuid>> {
        if session.role.can_view_all_content() {
            return Ok(self.store.organization_ids().await?);
        }
        let memberships = self
            .store
            .organization_memberships_for_user(session.user_id)
            .await?;
        Ok(memberships
            .into_iter()
            .filter(|membership| membership.role.is_admin())
            .map(|membership| membership.organization_id)
            .collect())
    }

    /// Check management authority over one organization.
    pub async fn can_manage_organization(
        &self,
        session: &Session,
        organization_id: Uuid,
    ) -> AccessResult<bool> {
        if session.role.can_view_all_content() {
            return Ok(true);
        }
        let membership = self
            .store
            .organization_membership(organization_id, session.user_id)
            .await?;
        Ok(membership.is_some_and(|m| m.role.is_admin()))
    }

    /// Resolve management authority over one collection.
    ///
    /// Fallback order: (1) global bypass, (2) direct collection
    /// membership, (3) membership on the collection's parent
    /// organization. An organization `Admin`/`Owner` therefore manages
    /// every collection beneath the organization without needing a
    /// duplicate collection-level row.
    pub async fn resolve_collection_management(
        &self,
        session: &Session,
        collection_id: Uuid,
    ) -> AccessResult<ScopeDecision> {
        if session.role.can_view_all_content() {
            return Ok(ScopeDecision::Granted(GrantSource::GlobalBypass));
        }

        let Some(collection) = self.store.collection(collection_id).await? else {
            return Ok(ScopeDecision::DeniedNoRecord);
        };

        let mut best_rank: Option<MembershipRole> = None;

        if let Some(membership) = self
            .store
            .collection_membership(collection_id, session.user_id)
            .await?
        {
            if membership.role.is_admin() {
                return Ok(ScopeDecision::Granted(GrantSource::CollectionRole));
            }
            best_rank = Some(membership.role);
        }

        if let Some(membership) = self
            .store
            .organization_membership(collection.organization_id(), session.user_id)
            .await?
        {
            if membership.role.is_admin() {
                return Ok(ScopeDecision::Granted(GrantSource::OrganizationRole));
            }
            best_rank = Some(match best_rank {
                Some(rank) => rank.max(membership.role),
                None => membership.role,
            });
        }

        Ok(match best_rank {
            Some(rank) => ScopeDecision::DeniedInsufficientRank(rank),
            None => ScopeDecision::DeniedNoRecord,
        })
    }

    /// Boolean convenience over
    /// [`resolve_collection_management`](Self::resolve_collection_management).
    pub async fn can_manage_collection(
        &self,
        session: &Session,
        collection_id: Uuid,
    ) -> AccessResult<bool> {
        Ok(self
            .resolve_collection_management(session, collection_id)
            .await?
            .is_granted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use curator_roles::PlatformRole;
    use curator_tenancy::{
        Collection, CollectionMembership, CollectionVisibility, Organization,
        OrganizationMembership,
    };

    async fn seeded_store() -> (Arc<MemoryStore>, Organization, Collection) {
        let store = Arc::new(MemoryStore::new());
        let org = store
            .insert_organization(Organization::new("Acme", "acme"))
            .await
            .unwrap();
        let collection = store
            .insert_collection(Collection::new(
                org.id,
                "Footage",
                CollectionVisibility::Private,
            ))
            .await
            .unwrap();
        (store, org, collection)
    }

    #[tokio::test]
    async fn test_viewer_membership_grants_nothing() {
        let (store, org, _) = seeded_store().await;
        let user_id = Uuid::now_v7();
        store
            .upsert_organization_membership(OrganizationMembership::new(
                org.id,
                user_id,
                MembershipRole::Viewer,
            ))
            .await
            .unwrap();

        let resolver = MembershipResolver::new(store);
        let session = Session::new(user_id, PlatformRole::User);

        assert!(resolver
            .manageable_organization_ids(&session)
            .await
            .unwrap()
            .is_empty());
        assert!(!resolver
            .can_manage_organization(&session, org.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_bypass_sees_every_organization() {
        let (store, org, _) = seeded_store().await;
        let other = store
            .insert_organization(Organization::new("Beta", "beta"))
            .await
            .unwrap();

        let resolver = MembershipResolver::new(store);
        let session = Session::new(Uuid::now_v7(), PlatformRole::Admin);

        let mut ids = resolver.manageable_organization_ids(&session).await.unwrap();
        ids.sort();
        let mut expected = vec![org.id, other.id];
        expected.sort();
        assert_eq!(ids, expected);
        assert!(resolver
            .can_manage_organization(&session, org.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_org_admin_inherits_collection_management() {
        let (store, org, collection) = seeded_store().await;
        let user_id = Uuid::now_v7();
        store
            .upsert_organization_membership(OrganizationMembership::new(
                org.id,
                user_id,
                MembershipRole::Admin,
            ))
            .await
            .unwrap();

        let resolver = MembershipResolver::new(store);
        let session = Session::new(user_id, PlatformRole::User);

        // No collection-level row exists, the parent grant carries.
        let decision = resolver
            .resolve_collection_management(&session, collection.id)
            .await
            .unwrap();
        assert_eq!(decision, ScopeDecision::Granted(GrantSource::OrganizationRole));
    }

    #[tokio::test]
    async fn test_direct_collection_admin_wins_before_parent() {
        let (store, _, collection) = seeded_store().await;
        let user_id = Uuid::now_v7();
        store
            .upsert_collection_membership(CollectionMembership::new(
                collection.id,
                user_id,
                MembershipRole::Owner,
            ))
            .await
            .unwrap();

        let resolver = MembershipResolver::new(store);
        let session = Session::new(user_id, PlatformRole::User);

        let decision = resolver
            .resolve_collection_management(&session, collection.id)
            .await
            .unwrap();
        assert_eq!(decision, ScopeDecision::Granted(GrantSource::CollectionRole));
    }

    #[tokio::test]
    async fn test_denied_distinguishes_rank_from_absence() {
        let (store, org, collection) = seeded_store().await;
        let editor_id = Uuid::now_v7();
        store
            .upsert_organization_membership(OrganizationMembership::new(
                org.id,
                editor_id,
                MembershipRole::Editor,
            ))
            .await
            .unwrap();

        let resolver = MembershipResolver::new(store);

        let editor = Session::new(editor_id, PlatformRole::User);
        assert_eq!(
            resolver
                .resolve_collection_management(&editor, collection.id)
                .await
                .unwrap(),
            ScopeDecision::DeniedInsufficientRank(MembershipRole::Editor)
        );

        let stranger = Session::new(Uuid::now_v7(), PlatformRole::User);
        assert_eq!(
            resolver
                .resolve_collection_management(&stranger, collection.id)
                .await
                .unwrap(),
            ScopeDecision::DeniedNoRecord
        );
    }

    #[tokio::test]
    async fn test_missing_resource_ids_resolve_to_false() {
        let store = Arc::new(MemoryStore::new());
        let resolver = MembershipResolver::new(store);
        let session = Session::new(Uuid::now_v7(), PlatformRole::OrganizationAdmin);

        assert!(!resolver
            .can_manage_organization(&session, Uuid::now_v7())
            .await
            .unwrap());
        assert_eq!(
            resolver
                .resolve_collection_management(&session, Uuid::now_v7())
                .await
                .unwrap(),
            ScopeDecision::DeniedNoRecord
        );
    }

    #[tokio::test]
    async fn test_bypass_short_circuits_missing_collection() {
        let store = Arc::new(MemoryStore::new());
        let resolver = MembershipResolver::new(store);
        let session = Session::new(Uuid::now_v7(), PlatformRole::SuperUser);

        // The bypass answers before any store lookup, even for an id
        // that does not exist.
        assert_eq!(
            resolver
                .resolve_collection_management(&session, Uuid::now_v7())
                .await
                .unwrap(),
            ScopeDecision::Granted(GrantSource::GlobalBypass)
        );
    }

    #[test]
    fn test_scope_decision_serializes() {
        let decision = ScopeDecision::DeniedInsufficientRank(MembershipRole::Editor);
        let json = serde_json::to_string(&decision).unwrap();
        let back: ScopeDecision = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decision);
    }
}
