//! Registration: consuming the approval ledger to seed an account.
//!
//! Registration fails closed: without a ledger entry (or the
//! configuration-driven bootstrap identity) no account is created at
//! all. On success the new account's role comes verbatim from the
//! ledger and its seed memberships are created at `Viewer` rank.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use curator_roles::{MembershipRole, PlatformRole};
use curator_tenancy::{CollectionMembership, OrganizationMembership, User};

use crate::config::AccessConfig;
use crate::error::{AccessError, AccessResult};
use crate::ledger::{normalize_and_validate_email, ApprovalLedger, ApprovalState};
use crate::store::PlatformStore;

/// A registration submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegistration {
    /// The submitted email address
    pub email: String,

    /// Optional display name for the new account
    pub display_name: Option<String>,
}

/// The account and seed memberships created by a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationOutcome {
    /// The created user
    pub user: User,

    /// Seeded organization memberships (at `Viewer` rank)
    pub organization_memberships: Vec<OrganizationMembership>,

    /// Seeded collection memberships (at `Viewer` rank)
    pub collection_memberships: Vec<CollectionMembership>,
}

/// Creates accounts from ledger entries.
pub struct RegistrationService {
    store: Arc<dyn PlatformStore>,
    ledger: ApprovalLedger,
    config: AccessConfig,
}

impl std::fmt::Debug for RegistrationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationService").finish()
    }
}

impl RegistrationService {
    /// Create a registration service over a store.
    pub fn new(store: Arc<dyn PlatformStore>, config: AccessConfig) -> Self {
        let ledger = ApprovalLedger::new(store.clone());
        Self {
            store,
            ledger,
            config,
        }
    }

    /// The ledger this service consumes.
    pub fn ledger(&self) -> &ApprovalLedger {
        &self.ledger
    }

    /// Register a new account.
    ///
    /// The bootstrap identity (if configured) registers as a platform
    /// `Admin` with no seed memberships. Every other email must have a
    /// ledger entry; a missing entry is `Forbidden` and leaves the user
    /// table untouched. A repeat registration for the same email fails
    /// on the user-table uniqueness conflict, so a retained ledger entry
    /// never seeds a second account.
    pub async fn register(&self, registration: NewRegistration) -> AccessResult<RegistrationOutcome> {
        let email = normalize_and_validate_email(&registration.email)?;

        if self.config.is_bootstrap_email(&email) {
            info!(email = %email, "bootstrap registration");
            let user = self
                .build_user(&email, PlatformRole::Admin, registration.display_name)
                .await?;
            return Ok(RegistrationOutcome {
                user,
                organization_memberships: Vec::new(),
                collection_memberships: Vec::new(),
            });
        }

        let entry = match self.ledger.lookup(&email).await? {
            ApprovalState::NoRecord => {
                debug!(email = %email, "registration rejected, email not approved");
                return Err(AccessError::Forbidden(
                    "email is not approved for registration".to_string(),
                ));
            }
            ApprovalState::Approved(entry) | ApprovalState::Consumed(entry) => entry,
        };

        let user = self
            .build_user(&email, entry.role, registration.display_name)
            .await?;

        let mut organization_memberships = Vec::new();
        if let Some(organization_id) = entry.organization_id {
            let mut membership =
                OrganizationMembership::new(organization_id, user.id, MembershipRole::Viewer);
            if let Some(approver) = entry.approved_by {
                membership = membership.with_inviter(approver);
            }
            organization_memberships.push(
                self.store
                    .upsert_organization_membership(membership)
                    .await?,
            );
        }

        let mut collection_memberships = Vec::new();
        for collection_id in &entry.collection_ids {
            let mut membership =
                CollectionMembership::new(*collection_id, user.id, MembershipRole::Viewer);
            if let Some(approver) = entry.approved_by {
                membership = membership.with_adder(approver);
            }
            collection_memberships
                .push(self.store.upsert_collection_membership(membership).await?);
        }

        self.ledger.consume(&email).await?;
        info!(email = %email, role = user.platform_role.as_str(), "registration completed");

        Ok(RegistrationOutcome {
            user,
            organization_memberships,
            collection_memberships,
        })
    }

    async fn build_user(
        &self,
        normalized_email: &str,
        role: PlatformRole,
        display_name: Option<String>,
    ) -> AccessResult<User> {
        let mut user = User::new(normalized_email, role);
        if let Some(name) = display_name {
            user = user.with_display_name(name);
        }
        Ok(self.store.insert_user(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ApprovalRequest;
    use crate::memory::MemoryStore;
    use uuid::Uuid;

    fn service(config: AccessConfig) -> (Arc<MemoryStore>, RegistrationService) {
        let store = Arc::new(MemoryStore::new());
        let service = RegistrationService::new(store.clone(), config);
        (store, service)
    }

    #[tokio::test]
    async fn test_unapproved_registration_creates_no_user() {
        let (store, service) = service(AccessConfig::default());

        let err = service
            .register(NewRegistration {
                email: "stranger@example.com".to_string(),
                display_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Forbidden(_)));
        assert!(store
            .user_by_email("stranger@example.com")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_ledger_entry_seeds_role_and_memberships() {
        let (store, service) = service(AccessConfig::default());
        let org_id = Uuid::now_v7();
        let c1 = Uuid::now_v7();
        let c2 = Uuid::now_v7();

        service
            .ledger()
            .record(
                ApprovalRequest {
                    email: "x@y.com".to_string(),
                    role: PlatformRole::CollectionAdmin,
                    organization_id: Some(org_id),
                    collection_ids: vec![c1, c2],
                },
                None,
            )
            .await
            .unwrap();

        let outcome = service
            .register(NewRegistration {
                email: "x@y.com".to_string(),
                display_name: Some("Xan".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(outcome.user.platform_role, PlatformRole::CollectionAdmin);
        assert_eq!(outcome.organization_memberships.len(), 1);
        let org_membership = &outcome.organization_memberships[0];
        assert_eq!(org_membership.organization_id, org_id);
        assert_eq!(org_membership.role, MembershipRole::Viewer);

        assert_eq!(outcome.collection_memberships.len(), 2);
        for membership in &outcome.collection_memberships {
            assert_eq!(membership.role, MembershipRole::Viewer);
            assert!([c1, c2].contains(&membership.collection_id));
        }

        // The ledger entry is retained, marked consumed.
        assert!(matches!(
            service.ledger().lookup("x@y.com").await.unwrap(),
            ApprovalState::Consumed(_)
        ));
        assert!(store.user_by_email("x@y.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_bootstrap_registration_bypasses_ledger() {
        let config = AccessConfig::default().with_bootstrap_admin("Root@Example.com");
        let (_, service) = service(config);

        let outcome = service
            .register(NewRegistration {
                email: " root@example.COM ".to_string(),
                display_name: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome.user.platform_role, PlatformRole::Admin);
        assert!(outcome.organization_memberships.is_empty());
        assert!(outcome.collection_memberships.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_registration_conflicts() {
        let (_, service) = service(AccessConfig::default());
        service
            .ledger()
            .record(
                ApprovalRequest {
                    email: "x@y.com".to_string(),
                    role: PlatformRole::User,
                    organization_id: None,
                    collection_ids: vec![],
                },
                None,
            )
            .await
            .unwrap();

        service
            .register(NewRegistration {
                email: "x@y.com".to_string(),
                display_name: None,
            })
            .await
            .unwrap();

        let err = service
            .register(NewRegistration {
                email: "X@Y.com".to_string(),
                display_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_malformed_email_rejected_before_store() {
        let (store, service) = service(AccessConfig::default());
        let err = service
            .register(NewRegistration {
                email: "nonsense".to_string(),
                display_name: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)));
        assert!(store.user_by_email("nonsense").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_default_role_is_lowest_rank() {
        let (_, service) = service(AccessConfig::default());
        service
            .ledger()
            .record(
                ApprovalRequest {
                    email: "plain@example.com".to_string(),
                    role: PlatformRole::default(),
                    organization_id: None,
                    collection_ids: vec![],
                },
                None,
            )
            .await
            .unwrap();

        let outcome = service
            .register(NewRegistration {
                email: "plain@example.com".to_string(),
                display_name: None,
            })
            .await
            .unwrap();
        assert_eq!(outcome.user.platform_role, PlatformRole::User);
    }
}
