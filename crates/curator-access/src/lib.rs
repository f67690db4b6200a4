//! # Curator Access Control
//!
//! This crate is the authorization decision layer for the Curator
//! content platform. Every administrative mutation and every content
//! read in the surrounding services is gated through it.
//!
//! ## Overview
//!
//! The curator-access crate handles:
//! - **Store contract**: the read/upsert interface the external
//!   transactional store must satisfy, plus an in-memory implementation
//! - **Membership resolution**: computing which organizations and
//!   collections a user may administer
//! - **Access gate**: the single entry point implementing
//!   session → capability → scope, and the content-visibility predicate
//! - **Approval ledger**: the pre-registration allow-list and the
//!   registration flow that consumes it
//! - **Admin service**: the guarded mutations (tenancy creation,
//!   membership grants, role updates, approvals)
//!
//! ## Decision Contract
//!
//! Every administrative endpoint performs, in order:
//! 1. session presence ([`require_session`]): a missing session is
//!    `Unauthenticated`
//! 2. coarse capability for the action: failure is `Forbidden`
//! 3. membership scope via the resolver, unless the platform role
//!    carries the global bypass: failure is `Forbidden`
//!
//! only then does the mutation touch the store.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use curator_access::{AccessGate, AdminAction, MemoryStore, Session};
//! use curator_roles::PlatformRole;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), curator_access::AccessError> {
//! let store = Arc::new(MemoryStore::new());
//! let gate = AccessGate::new(store);
//!
//! let session = Session::new(Uuid::now_v7(), PlatformRole::SuperUser);
//! gate.authorize(&session, AdminAction::ManageUsers).await?;
//!
//! // Bulk content reads compose with the filter instead of gating
//! // one item at a time.
//! let filter = gate.content_filter(&session).await?;
//! assert!(filter.is_bypass());
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! Authorization checks are pure reads and safe to evaluate concurrently
//! for independent requests; the core keeps no shared mutable state of
//! its own. Writes that establish memberships or approvals are atomic
//! upserts keyed by the composite uniqueness constraints, so concurrent
//! grants for the same pair converge to one row.
//!
//! ## Cross-Crate Integration
//!
//! This crate builds on:
//! - `curator-roles`: capability predicates and rank comparisons
//! - `curator-tenancy`: the entities decisions are made over

pub mod admin;
pub mod config;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod memory;
pub mod registration;
pub mod resolver;
pub mod session;
pub mod store;

// Re-export main types
pub use admin::AdminService;
pub use config::{AccessConfig, ConfigError, DEFAULT_SLUG_RETRY_MAX};
pub use error::{AccessError, AccessResult};
pub use gate::{AccessGate, AdminAction, ContentFilter};
pub use ledger::{ApprovalLedger, ApprovalRequest, ApprovalState};
pub use memory::MemoryStore;
pub use registration::{NewRegistration, RegistrationOutcome, RegistrationService};
pub use resolver::{GrantSource, MembershipResolver, ScopeDecision};
pub use session::{require_session, Session};
pub use store::{PlatformStore, StoreError, StoreResult};
