//! End-to-end tests for the authorization core.
//!
//! These tests exercise the full flow the surrounding services run:
//! approvals are recorded through the admin service, registration
//! consumes them, and the resulting accounts are checked against the
//! gate, the resolver, and the content-visibility filter.
//!
//! Test flows:
//! 1. invite → register → read content
//! 2. organization-admin inheritance over collections
//! 3. manageable-set listings for filters
//! 4. privilege-escalation guards on role updates
//! 5. fail-closed registration

use std::sync::Arc;

use curator_access::{
    AccessConfig, AccessError, AdminAction, AdminService, ApprovalRequest, MemoryStore,
    NewRegistration, PlatformStore, RegistrationService, Session,
};
use curator_roles::{MembershipRole, PlatformRole};
use curator_tenancy::{CollectionVisibility, User};

/// Test fixture wiring the services over one shared in-memory store.
struct TestFixture {
    store: Arc<MemoryStore>,
    admin: AdminService,
    registration: RegistrationService,
    /// Session for a platform Admin account seeded into the store.
    root: Session,
}

impl TestFixture {
    async fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let config = AccessConfig::default();
        let admin = AdminService::new(store.clone(), config.clone());
        let registration = RegistrationService::new(store.clone(), config);

        let root_user = store
            .insert_user(User::new("root@curator.test", PlatformRole::Admin))
            .await
            .unwrap();
        let root = Session::for_user(&root_user);

        Self {
            store,
            admin,
            registration,
            root,
        }
    }
}

#[tokio::test]
async fn test_invite_register_read_flow() {
    let fixture = TestFixture::new().await;

    // Root sets up a tenant with a private and a public collection.
    let org = fixture
        .admin
        .create_organization(&fixture.root, "Acme Media", None)
        .await
        .unwrap();
    let private = fixture
        .admin
        .create_collection(&fixture.root, org.id, "Board Meetings", CollectionVisibility::Private)
        .await
        .unwrap();
    let town_halls = fixture
        .admin
        .create_collection(&fixture.root, org.id, "Town Halls", CollectionVisibility::Public)
        .await
        .unwrap();

    // Invite an editor-to-be into the org and the private collection.
    fixture
        .admin
        .approve_email(
            &fixture.root,
            ApprovalRequest {
                email: "maya@acme.test".to_string(),
                role: PlatformRole::CollectionAdmin,
                organization_id: Some(org.id),
                collection_ids: vec![private.id],
            },
        )
        .await
        .unwrap();

    let outcome = fixture
        .registration
        .register(NewRegistration {
            email: "Maya@Acme.test".to_string(),
            display_name: Some("Maya".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(outcome.user.platform_role, PlatformRole::CollectionAdmin);

    // The seeded memberships make both collections readable: the private
    // one directly, the public one through organization membership.
    let session = Session::for_user(&outcome.user);
    let gate = fixture.admin.gate();
    gate.authorize_content_read(&session, private.id).await.unwrap();
    gate.authorize_content_read(&session, town_halls.id).await.unwrap();

    // Viewer-rank seeds grant no management authority anywhere.
    assert!(!gate
        .resolver()
        .can_manage_collection(&session, private.id)
        .await
        .unwrap());
    assert!(gate
        .resolver()
        .manageable_organization_ids(&session)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_org_admin_manages_collections_without_direct_rows() {
    let fixture = TestFixture::new().await;
    let org = fixture
        .admin
        .create_organization(&fixture.root, "Acme Media", None)
        .await
        .unwrap();
    let collection = fixture
        .admin
        .create_collection(&fixture.root, org.id, "Footage", CollectionVisibility::Private)
        .await
        .unwrap();

    let manager = fixture
        .store
        .insert_user(User::new("lee@acme.test", PlatformRole::CollectionAdmin))
        .await
        .unwrap();
    fixture
        .admin
        .upsert_organization_member(&fixture.root, org.id, manager.id, MembershipRole::Admin)
        .await
        .unwrap();

    // Zero collection-level rows, the organization row carries.
    let session = Session::for_user(&manager);
    fixture
        .admin
        .gate()
        .authorize(&session, AdminAction::ManageCollection(collection.id))
        .await
        .unwrap();

    // And the org shows up in the manageable set used for listings.
    let ids = fixture
        .admin
        .gate()
        .resolver()
        .manageable_organization_ids(&session)
        .await
        .unwrap();
    assert_eq!(ids, vec![org.id]);
}

#[tokio::test]
async fn test_bypass_roles_see_everything_without_memberships() {
    let fixture = TestFixture::new().await;
    let org_a = fixture
        .admin
        .create_organization(&fixture.root, "Acme", None)
        .await
        .unwrap();
    let org_b = fixture
        .admin
        .create_organization(&fixture.root, "Beta", None)
        .await
        .unwrap();

    let auditor = fixture
        .store
        .insert_user(User::new("auditor@curator.test", PlatformRole::SuperUser))
        .await
        .unwrap();
    let session = Session::for_user(&auditor);

    let mut ids = fixture
        .admin
        .gate()
        .resolver()
        .manageable_organization_ids(&session)
        .await
        .unwrap();
    ids.sort();
    let mut expected = vec![org_a.id, org_b.id];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_role_update_cannot_escalate_past_actor() {
    let fixture = TestFixture::new().await;

    let org_admin = fixture
        .store
        .insert_user(User::new("orgadmin@curator.test", PlatformRole::OrganizationAdmin))
        .await
        .unwrap();
    let target = fixture
        .store
        .insert_user(User::new("target@curator.test", PlatformRole::User))
        .await
        .unwrap();
    let session = Session::for_user(&org_admin);

    // Above own rank: rejected.
    let err = fixture
        .admin
        .update_user_role(&session, target.id, "admin")
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));

    // At own rank: allowed.
    let updated = fixture
        .admin
        .update_user_role(&session, target.id, "organization_admin")
        .await
        .unwrap();
    assert_eq!(updated.platform_role, PlatformRole::OrganizationAdmin);
}

#[tokio::test]
async fn test_registration_fails_closed_without_approval() {
    let fixture = TestFixture::new().await;

    let err = fixture
        .registration
        .register(NewRegistration {
            email: "uninvited@acme.test".to_string(),
            display_name: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
    assert!(fixture
        .store
        .user_by_email("uninvited@acme.test")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_collection_admin_cannot_touch_foreign_tenants() {
    let fixture = TestFixture::new().await;
    let org = fixture
        .admin
        .create_organization(&fixture.root, "Acme", None)
        .await
        .unwrap();
    let collection = fixture
        .admin
        .create_collection(&fixture.root, org.id, "Footage", CollectionVisibility::Private)
        .await
        .unwrap();

    let outsider = fixture
        .store
        .insert_user(User::new("outsider@curator.test", PlatformRole::CollectionAdmin))
        .await
        .unwrap();
    let session = Session::for_user(&outsider);
    let gate = fixture.admin.gate();

    // Capability exists, scope does not.
    let err = gate
        .authorize(&session, AdminAction::ManageCollection(collection.id))
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));

    // Content is invisible too: the collection exists, so the denial is
    // Forbidden, not NotFound.
    let err = gate
        .authorize_content_read(&session, collection.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
}
