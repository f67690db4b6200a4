//! Guarded administrative mutations.
//!
//! Every method here follows the same shape: validate input, fetch the
//! targets (absent id is `NotFound`), ask the gate (capability, then
//! scope), then write. The write side uses the store's atomic upserts;
//! slug creation regenerates its key on conflict up to a configured
//! bound.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use curator_roles::{MembershipRole, PlatformRole};
use curator_tenancy::{
    derive_slug, Collection, CollectionMembership, CollectionVisibility, Organization,
    OrganizationMembership, User,
};

use crate::config::AccessConfig;
use crate::error::{AccessError, AccessResult};
use crate::gate::{AccessGate, AdminAction};
use crate::ledger::{ApprovalLedger, ApprovalRequest};
use crate::session::Session;
use crate::store::{PlatformStore, StoreError};

/// Administrative mutation surface, guarded by the access gate.
pub struct AdminService {
    store: Arc<dyn PlatformStore>,
    gate: AccessGate,
    ledger: ApprovalLedger,
    config: AccessConfig,
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService").finish()
    }
}

impl AdminService {
    /// Create an admin service over a store.
    pub fn new(store: Arc<dyn PlatformStore>, config: AccessConfig) -> Self {
        let gate = AccessGate::new(store.clone());
        let ledger = ApprovalLedger::new(store.clone());
        Self {
            store,
            gate,
            ledger,
            config,
        }
    }

    /// The gate backing this service.
    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    /// Create an organization, deriving its slug from the name.
    ///
    /// On a slug conflict the key is regenerated with a random suffix,
    /// up to the configured attempt bound; the final conflict is
    /// reported rather than retried forever. The creator receives an
    /// `Owner` membership row so the organization is manageable without
    /// the global bypass.
    pub async fn create_organization(
        &self,
        session: &Session,
        name: &str,
        description: Option<&str>,
    ) -> AccessResult<Organization> {
        if name.trim().is_empty() {
            return Err(AccessError::Validation(
                "organization name must not be empty".to_string(),
            ));
        }
        self.gate
            .authorize(session, AdminAction::CreateOrganization)
            .await?;

        let base = derive_slug(name);
        let mut slug = base.clone();
        let mut attempt = 0;
        let organization = loop {
            attempt += 1;
            let mut organization = Organization::new(name.trim(), slug.clone());
            if let Some(description) = description {
                organization = organization.with_description(description);
            }
            match self.store.insert_organization(organization).await {
                Ok(organization) => break organization,
                Err(StoreError::Conflict { .. }) if attempt < self.config.slug_retry_max => {
                    slug = format!("{base}-{}", random_suffix());
                    debug!(slug = %slug, attempt, "slug conflict, regenerating");
                }
                Err(err) => {
                    warn!(slug = %slug, attempt, "organization creation failed");
                    return Err(err.into());
                }
            }
        };

        self.store
            .upsert_organization_membership(OrganizationMembership::new(
                organization.id,
                session.user_id,
                MembershipRole::Owner,
            ))
            .await?;
        Ok(organization)
    }

    /// Create a collection inside an organization.
    pub async fn create_collection(
        &self,
        session: &Session,
        organization_id: Uuid,
        name: &str,
        visibility: CollectionVisibility,
    ) -> AccessResult<Collection> {
        if name.trim().is_empty() {
            return Err(AccessError::Validation(
                "collection name must not be empty".to_string(),
            ));
        }
        if self.store.organization(organization_id).await?.is_none() {
            return Err(AccessError::NotFound("organization"));
        }
        self.gate
            .authorize(session, AdminAction::CreateCollection { organization_id })
            .await?;

        let collection = Collection::new(organization_id, name.trim(), visibility);
        Ok(self.store.insert_collection(collection).await?)
    }

    /// Grant or update a user's membership in an organization.
    ///
    /// Upsert semantics: a second grant for the same `(organization,
    /// user)` pair updates the existing row's role instead of adding a
    /// duplicate.
    pub async fn upsert_organization_member(
        &self,
        session: &Session,
        organization_id: Uuid,
        user_id: Uuid,
        role: MembershipRole,
    ) -> AccessResult<OrganizationMembership> {
        if self.store.organization(organization_id).await?.is_none() {
            return Err(AccessError::NotFound("organization"));
        }
        if self.store.user(user_id).await?.is_none() {
            return Err(AccessError::NotFound("user"));
        }
        self.gate
            .authorize(session, AdminAction::ManageOrganization(organization_id))
            .await?;

        let membership = OrganizationMembership::new(organization_id, user_id, role)
            .with_inviter(session.user_id);
        Ok(self.store.upsert_organization_membership(membership).await?)
    }

    /// Grant or update a user's membership in a collection.
    pub async fn upsert_collection_member(
        &self,
        session: &Session,
        collection_id: Uuid,
        user_id: Uuid,
        role: MembershipRole,
    ) -> AccessResult<CollectionMembership> {
        if self.store.collection(collection_id).await?.is_none() {
            return Err(AccessError::NotFound("collection"));
        }
        if self.store.user(user_id).await?.is_none() {
            return Err(AccessError::NotFound("user"));
        }
        self.gate
            .authorize(session, AdminAction::ManageCollection(collection_id))
            .await?;

        let membership =
            CollectionMembership::new(collection_id, user_id, role).with_adder(session.user_id);
        Ok(self.store.upsert_collection_membership(membership).await?)
    }

    /// Change a user's platform role.
    ///
    /// The role arrives as a string from the surface layer and is parsed
    /// before any store access. The assignment check runs against the
    /// actor's **stored** role, re-fetched here, so a stale session
    /// cannot assign above the rank the actor currently holds.
    pub async fn update_user_role(
        &self,
        session: &Session,
        target_user_id: Uuid,
        role: &str,
    ) -> AccessResult<User> {
        let new_role = PlatformRole::parse(role)
            .ok_or_else(|| AccessError::Validation(format!("unrecognized role: {role:?}")))?;

        let Some(actor) = self.store.user(session.user_id).await? else {
            return Err(AccessError::Unauthenticated);
        };
        let actor_session = Session::for_user(&actor);
        self.gate
            .authorize(&actor_session, AdminAction::ManageUsers)
            .await?;

        if self.store.user(target_user_id).await?.is_none() {
            return Err(AccessError::NotFound("user"));
        }
        if !actor.platform_role.can_assign(new_role) {
            debug!(
                actor = %actor.id,
                role = new_role.as_str(),
                "role assignment above actor rank rejected"
            );
            return Err(AccessError::Forbidden(format!(
                "role {} may not assign role {}",
                actor.platform_role.as_str(),
                new_role.as_str()
            )));
        }

        let updated = self
            .store
            .update_user_role(target_user_id, new_role)
            .await?;
        updated.ok_or(AccessError::NotFound("user"))
    }

    /// Record a registration approval.
    ///
    /// An approval targeting an organization requires management scope
    /// on that organization (unless the role bypasses); every listed
    /// collection must exist.
    pub async fn approve_email(
        &self,
        session: &Session,
        request: ApprovalRequest,
    ) -> AccessResult<curator_tenancy::ApprovedEmail> {
        if let Some(organization_id) = request.organization_id {
            if self.store.organization(organization_id).await?.is_none() {
                return Err(AccessError::NotFound("organization"));
            }
        }
        for collection_id in &request.collection_ids {
            if self.store.collection(*collection_id).await?.is_none() {
                return Err(AccessError::NotFound("collection"));
            }
        }
        self.gate
            .authorize(
                session,
                AdminAction::ManageApprovals {
                    organization_id: request.organization_id,
                },
            )
            .await?;

        self.ledger.record(request, Some(session.user_id)).await
    }
}

fn random_suffix() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}
