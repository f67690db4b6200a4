//! # Curator Role Tables
//!
//! This crate provides the two role tables for the Curator content platform,
//! shared by every service that makes authorization decisions.
//!
//! ## Overview
//!
//! The curator-roles crate handles:
//! - **Platform roles**: the global rank carried on a user account
//! - **Membership roles**: the per-resource rank carried on an
//!   organization or collection membership
//! - **Capability predicates**: pure functions from a role to a yes/no
//!   capability answer
//! - **Assignment guards**: which roles an actor may grant to others
//!
//! ## Architecture
//!
//! ```text
//! PlatformRole (on User)          MembershipRole (on a membership row)
//!   User                            Viewer
//!   CollectionAdmin                 Editor
//!   OrganizationAdmin               Admin
//!   SuperUser                       Owner
//!   Admin
//! ```
//!
//! Every capability is a single rank comparison against a fixed threshold,
//! so capabilities are monotonic in rank by construction. The one
//! deliberate exception is the global content bypass
//! ([`PlatformRole::can_view_all_content`]), which is reserved for the top
//! two ranks.
//!
//! ## Usage
//!
//! ```rust
//! use curator_roles::{MembershipRole, PlatformRole};
//!
//! let actor = PlatformRole::OrganizationAdmin;
//! assert!(actor.can_manage_collections());
//! assert!(!actor.can_view_all_content());
//!
//! // Assignment is capped at the actor's own rank.
//! assert!(actor.can_assign(PlatformRole::CollectionAdmin));
//! assert!(!actor.can_assign(PlatformRole::SuperUser));
//!
//! let membership = MembershipRole::Editor;
//! assert!(membership.can_edit());
//! assert!(!membership.is_admin());
//! ```
//!
//! ## Integration
//!
//! This crate is consumed by:
//! - `curator-tenancy`: role fields on users and membership rows
//! - `curator-access`: capability checks inside the access gate and
//!   membership resolver

pub mod membership;
pub mod platform;

// Re-export main types for convenience
pub use membership::MembershipRole;
pub use platform::PlatformRole;
