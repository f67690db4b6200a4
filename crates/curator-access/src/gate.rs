//! Access gate: the single entry point consulted before a mutation or
//! read.
//!
//! The gate encodes the decision contract every administrative endpoint
//! honors: session presence (the caller's [`require_session`] step),
//! then the coarse capability for the action, then the membership scope
//! when the platform role does not carry the global bypass.
//!
//! [`require_session`]: crate::session::require_session

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use curator_tenancy::Collection;

use crate::error::{AccessError, AccessResult};
use crate::resolver::{MembershipResolver, ScopeDecision};
use crate::session::Session;
use crate::store::PlatformStore;

/// An administrative action submitted to the gate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdminAction {
    /// Enter the administrative surface
    AccessAdmin,

    /// Create a new organization
    CreateOrganization,

    /// Mutate an existing organization or its memberships
    ManageOrganization(Uuid),

    /// Create a collection inside an organization
    CreateCollection {
        /// The organization the collection will belong to
        organization_id: Uuid,
    },

    /// Mutate an existing collection or its memberships
    ManageCollection(Uuid),

    /// Manage user accounts and roles
    ManageUsers,

    /// Manage registration approvals, optionally targeting one
    /// organization
    ManageApprovals {
        /// The organization the approval seeds into, if any
        organization_id: Option<Uuid>,
    },
}

impl AdminAction {
    /// Short label for denial messages and logs.
    fn describe(&self) -> &'static str {
        match self {
            AdminAction::AccessAdmin => "access the admin surface",
            AdminAction::CreateOrganization => "create organizations",
            AdminAction::ManageOrganization(_) => "manage this organization",
            AdminAction::CreateCollection { .. } => "create collections",
            AdminAction::ManageCollection(_) => "manage this collection",
            AdminAction::ManageUsers => "manage users",
            AdminAction::ManageApprovals { .. } => "manage approvals",
        }
    }
}

/// Scoping predicate for content reads.
///
/// Produced once per request and composable with a bulk query: the
/// external query layer translates the id sets into a WHERE clause
/// instead of gating items one at a time. Content in a collection is
/// visible iff any of:
///
/// - the user's platform role carries the global bypass
/// - the collection is public and the user holds *any* membership (any
///   rank) in its organization
/// - the user holds a direct membership (any rank) on the collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentFilter {
    bypass: bool,
    member_organization_ids: HashSet<Uuid>,
    member_collection_ids: HashSet<Uuid>,
}

impl ContentFilter {
    /// Check if this filter short-circuits to "everything visible".
    pub fn is_bypass(&self) -> bool {
        self.bypass
    }

    /// Organizations where the user holds any membership.
    pub fn member_organization_ids(&self) -> &HashSet<Uuid> {
        &self.member_organization_ids
    }

    /// Collections where the user holds a direct membership.
    pub fn member_collection_ids(&self) -> &HashSet<Uuid> {
        &self.member_collection_ids
    }

    /// Evaluate the predicate against one collection.
    pub fn allows(&self, collection: &Collection) -> bool {
        if self.bypass {
            return true;
        }
        if self.member_collection_ids.contains(&collection.id) {
            return true;
        }
        collection.visibility.is_public()
            && self
                .member_organization_ids
                .contains(&collection.organization_id())
    }
}

/// The single authorization entry point.
///
/// Other code calls [`authorize`](Self::authorize) before every
/// administrative mutation and [`authorize_content_read`]
/// (or [`content_filter`](Self::content_filter) for bulk reads) before
/// revealing content.
///
/// [`authorize_content_read`]: Self::authorize_content_read
pub struct AccessGate {
    store: Arc<dyn PlatformStore>,
    resolver: MembershipResolver,
}

impl std::fmt::Debug for AccessGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessGate").finish()
    }
}

impl AccessGate {
    /// Create a gate over a store.
    pub fn new(store: Arc<dyn PlatformStore>) -> Self {
        let resolver = MembershipResolver::new(store.clone());
        Self { store, resolver }
    }

    /// The membership resolver backing this gate.
    pub fn resolver(&self) -> &MembershipResolver {
        &self.resolver
    }

    /// Authorize an administrative action.
    ///
    /// Order of evaluation: coarse capability for the action kind, then
    /// immediate success when the role carries the global bypass, then
    /// the membership scope for targeted actions. Untargeted actions
    /// (`AccessAdmin`, `ManageUsers`, approvals with no organization)
    /// pass on capability alone; their listings are constrained
    /// separately through the manageable-id sets.
    pub async fn authorize(&self, session: &Session, action: AdminAction) -> AccessResult<()> {
        let role = session.role;
        let capability_ok = match action {
            AdminAction::AccessAdmin => role.can_access_admin(),
            AdminAction::CreateOrganization | AdminAction::ManageOrganization(_) => {
                role.can_manage_organizations()
            }
            AdminAction::CreateCollection { .. } => role.can_create_collections(),
            AdminAction::ManageCollection(_) => role.can_manage_collections(),
            AdminAction::ManageUsers => role.can_manage_users(),
            AdminAction::ManageApprovals { .. } => role.can_manage_approvals(),
        };
        if !capability_ok {
            debug!(role = role.as_str(), action = ?action, "capability check failed");
            return Err(AccessError::Forbidden(format!(
                "role {} may not {}",
                role.as_str(),
                action.describe()
            )));
        }

        if role.can_view_all_content() {
            return Ok(());
        }

        let scope_ok = match action {
            AdminAction::AccessAdmin
            | AdminAction::CreateOrganization
            | AdminAction::ManageUsers
            | AdminAction::ManageApprovals {
                organization_id: None,
            } => true,
            AdminAction::ManageOrganization(organization_id)
            | AdminAction::CreateCollection { organization_id }
            | AdminAction::ManageApprovals {
                organization_id: Some(organization_id),
            } => {
                self.resolver
                    .can_manage_organization(session, organization_id)
                    .await?
            }
            AdminAction::ManageCollection(collection_id) => {
                match self
                    .resolver
                    .resolve_collection_management(session, collection_id)
                    .await?
                {
                    ScopeDecision::Granted(_) => true,
                    ScopeDecision::DeniedInsufficientRank(_) | ScopeDecision::DeniedNoRecord => {
                        false
                    }
                }
            }
        };
        if !scope_ok {
            debug!(user = %session.user_id, action = ?action, "scope check failed");
            return Err(AccessError::Forbidden(format!(
                "no membership grants the right to {}",
                action.describe()
            )));
        }
        Ok(())
    }

    /// Build the content-visibility filter for a user.
    ///
    /// Fetches the user's membership rows once; the result composes with
    /// a bulk content query.
    pub async fn content_filter(&self, session: &Session) -> AccessResult<ContentFilter> {
        if session.role.can_view_all_content() {
            return Ok(ContentFilter {
                bypass: true,
                member_organization_ids: HashSet::new(),
                member_collection_ids: HashSet::new(),
            });
        }
        let member_organization_ids = self
            .store
            .organization_memberships_for_user(session.user_id)
            .await?
            .into_iter()
            .map(|membership| membership.organization_id)
            .collect();
        let member_collection_ids = self
            .store
            .collection_memberships_for_user(session.user_id)
            .await?
            .into_iter()
            .map(|membership| membership.collection_id)
            .collect();
        Ok(ContentFilter {
            bypass: false,
            member_organization_ids,
            member_collection_ids,
        })
    }

    /// Authorize a read of one collection's content.
    ///
    /// Existence is checked before permission, uniformly: an absent id is
    /// `NotFound`, a present-but-invisible collection is `Forbidden`.
    /// Callers must route every content reveal (including signed URL
    /// issuance) through this check.
    pub async fn authorize_content_read(
        &self,
        session: &Session,
        collection_id: Uuid,
    ) -> AccessResult<Collection> {
        let Some(collection) = self.store.collection(collection_id).await? else {
            return Err(AccessError::NotFound("collection"));
        };
        let filter = self.content_filter(session).await?;
        if filter.allows(&collection) {
            Ok(collection)
        } else {
            debug!(user = %session.user_id, collection = %collection_id, "content read denied");
            Err(AccessError::Forbidden(
                "collection is not visible to this user".to_string(),
            ))
        }
    }
}
