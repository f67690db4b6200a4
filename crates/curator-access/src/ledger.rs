//! Approval ledger: the pre-registration allow-list.
//!
//! Records who may register, and with what initial grant. Entries are
//! keyed by normalized email, written as atomic upserts, and consumed
//! exactly once at registration (the row is retained with a consumed
//! marker, not deleted).

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use curator_roles::PlatformRole;
use curator_tenancy::{normalize_email, ApprovedEmail};

use crate::error::{AccessError, AccessResult};
use crate::store::PlatformStore;

/// Normalize an email and reject input that cannot be one.
///
/// Runs before any store access: a malformed submission never reaches
/// the ledger or the user table.
pub(crate) fn normalize_and_validate_email(email: &str) -> AccessResult<String> {
    let normalized = normalize_email(email);
    if normalized.is_empty() || !normalized.contains('@') {
        return Err(AccessError::Validation(format!(
            "not an email address: {email:?}"
        )));
    }
    Ok(normalized)
}

/// What the ledger knows about an email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalState {
    /// No ledger entry exists
    NoRecord,

    /// An entry exists and has not yet seeded an account
    Approved(ApprovedEmail),

    /// An entry exists and has already seeded an account
    Consumed(ApprovedEmail),
}

/// Payload for recording an approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    /// The invitee's email
    pub email: String,

    /// Platform role to grant on registration
    pub role: PlatformRole,

    /// Organization the account is seeded into, if any
    pub organization_id: Option<Uuid>,

    /// Collections the account is seeded into
    #[serde(default)]
    pub collection_ids: Vec<Uuid>,
}

/// The keyed allow-list consumed at registration time.
pub struct ApprovalLedger {
    store: Arc<dyn PlatformStore>,
}

impl std::fmt::Debug for ApprovalLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApprovalLedger").finish()
    }
}

impl ApprovalLedger {
    /// Create a ledger over a store.
    pub fn new(store: Arc<dyn PlatformStore>) -> Self {
        Self { store }
    }

    /// Look up the approval state for an email.
    pub async fn lookup(&self, email: &str) -> AccessResult<ApprovalState> {
        let normalized = normalize_and_validate_email(email)?;
        Ok(match self.store.approved_email(&normalized).await? {
            None => ApprovalState::NoRecord,
            Some(entry) if entry.is_consumed() => ApprovalState::Consumed(entry),
            Some(entry) => ApprovalState::Approved(entry),
        })
    }

    /// Record (or overwrite) an approval.
    ///
    /// A second approval for the same email replaces the grant rather
    /// than duplicating it; overwriting also clears any consumed marker,
    /// which is harmless because a registered email is blocked by the
    /// user table's uniqueness first.
    pub async fn record(
        &self,
        request: ApprovalRequest,
        approved_by: Option<Uuid>,
    ) -> AccessResult<ApprovedEmail> {
        let normalized = normalize_and_validate_email(&request.email)?;
        let mut approval = ApprovedEmail::new(normalized, request.role)
            .with_collections(request.collection_ids.clone());
        if let Some(organization_id) = request.organization_id {
            approval = approval.with_organization(organization_id);
        }
        if let Some(approver) = approved_by {
            approval = approval.with_approver(approver);
        }
        debug!(email = %approval.email, role = approval.role.as_str(), "recording approval");
        Ok(self.store.upsert_approved_email(approval).await?)
    }

    /// Stamp an approval as consumed.
    pub(crate) async fn consume(&self, normalized_email: &str) -> AccessResult<()> {
        self.store
            .mark_approval_consumed(normalized_email, Utc::now())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn ledger() -> ApprovalLedger {
        ApprovalLedger::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_lookup_no_record() {
        assert_eq!(
            ledger().lookup("nobody@example.com").await.unwrap(),
            ApprovalState::NoRecord
        );
    }

    #[tokio::test]
    async fn test_record_then_lookup_is_case_insensitive() {
        let ledger = ledger();
        ledger
            .record(
                ApprovalRequest {
                    email: "Invitee@Example.com".to_string(),
                    role: PlatformRole::CollectionAdmin,
                    organization_id: None,
                    collection_ids: vec![],
                },
                None,
            )
            .await
            .unwrap();

        match ledger.lookup(" invitee@EXAMPLE.com ").await.unwrap() {
            ApprovalState::Approved(entry) => {
                assert_eq!(entry.role, PlatformRole::CollectionAdmin);
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_second_record_overwrites() {
        let ledger = ledger();
        let org_id = Uuid::now_v7();
        let request = ApprovalRequest {
            email: "invitee@example.com".to_string(),
            role: PlatformRole::User,
            organization_id: None,
            collection_ids: vec![],
        };
        ledger.record(request.clone(), None).await.unwrap();
        ledger
            .record(
                ApprovalRequest {
                    role: PlatformRole::OrganizationAdmin,
                    organization_id: Some(org_id),
                    ..request
                },
                None,
            )
            .await
            .unwrap();

        match ledger.lookup("invitee@example.com").await.unwrap() {
            ApprovalState::Approved(entry) => {
                assert_eq!(entry.role, PlatformRole::OrganizationAdmin);
                assert_eq!(entry.organization_id, Some(org_id));
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_consumed_state_after_consume() {
        let ledger = ledger();
        ledger
            .record(
                ApprovalRequest {
                    email: "invitee@example.com".to_string(),
                    role: PlatformRole::User,
                    organization_id: None,
                    collection_ids: vec![],
                },
                None,
            )
            .await
            .unwrap();
        ledger.consume("invitee@example.com").await.unwrap();

        assert!(matches!(
            ledger.lookup("invitee@example.com").await.unwrap(),
            ApprovalState::Consumed(_)
        ));
    }

    #[tokio::test]
    async fn test_malformed_email_is_rejected_before_store() {
        let ledger = ledger();
        let err = ledger
            .record(
                ApprovalRequest {
                    email: "not-an-email".to_string(),
                    role: PlatformRole::User,
                    organization_id: None,
                    collection_ids: vec![],
                },
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)));

        let err = ledger.lookup("   ").await.unwrap_err();
        assert!(matches!(err, AccessError::Validation(_)));
    }
}
