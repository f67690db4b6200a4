//! # Curator Tenancy Models
//!
//! This crate provides the multi-tenant domain models for the Curator
//! content platform: the entities the authorization core decides over.
//!
//! ## Overview
//!
//! The curator-tenancy crate handles:
//! - **Users**: platform accounts with a normalized, unique email and a
//!   platform-wide role
//! - **Organizations**: top-level tenant entities with a unique slug
//! - **Collections**: content containers owned by exactly one
//!   organization, with a visibility level
//! - **Memberships**: user-organization and user-collection
//!   relationships carrying a per-resource role
//! - **Approvals**: pre-registration ledger entries granting a future
//!   account its initial role and memberships
//!
//! ## Architecture
//!
//! ```text
//! User
//!   ├─ OrganizationMembership ─→ Organization
//!   │                               └─ Collections
//!   │                                     └─ Content (external)
//!   └─ CollectionMembership ───→ Collection
//!
//! ApprovedEmail ─(consumed at registration)─→ User + seed memberships
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use curator_roles::{MembershipRole, PlatformRole};
//! use curator_tenancy::{Collection, CollectionVisibility, Organization, OrganizationMembership, User};
//!
//! let org = Organization::new("Acme Media", "acme-media");
//! let collection = Collection::new(org.id, "Launch Footage", CollectionVisibility::Private);
//!
//! let user = User::new("Editor@Acme.example", PlatformRole::User);
//! assert_eq!(user.email, "editor@acme.example");
//!
//! let membership = OrganizationMembership::new(org.id, user.id, MembershipRole::Editor);
//! assert_eq!(membership.organization_id, org.id);
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate is designed to work with:
//! - `curator-roles`: role fields on users and memberships
//! - `curator-access`: the store contract and decision layer over these
//!   entities

pub mod approval;
pub mod collection;
pub mod membership;
pub mod organization;
pub mod user;

// Re-export main types for convenience
pub use approval::ApprovedEmail;
pub use collection::{Collection, CollectionVisibility};
pub use membership::{CollectionMembership, OrganizationMembership};
pub use organization::{derive_slug, Organization};
pub use user::{normalize_email, User};
