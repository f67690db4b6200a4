//! Organization domain model
//!
//! This module provides the core Organization entity for multi-tenant
//! management. Organizations are the top-level tenant entities that own
//! collections and hold memberships.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// An organization represents a tenant in the multi-tenant system.
///
/// Users can belong to multiple organizations with different membership
/// roles. Each organization owns its collections exclusively.
///
/// # Architecture
///
/// ```text
/// Organization
///   ├─ Members (via OrganizationMembership)
///   └─ Collections
/// ```
///
/// # Examples
///
/// ```
/// use curator_tenancy::Organization;
///
/// let org = Organization::new("Acme Media", "acme-media");
/// assert_eq!(org.name, "Acme Media");
/// assert_eq!(org.slug, "acme-media");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    /// Unique identifier for the organization
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// URL-friendly slug (unique across platform)
    pub slug: String,

    /// Optional description
    pub description: Option<String>,

    /// When the organization was created
    pub created_at: DateTime<Utc>,

    /// When the organization was last updated
    pub updated_at: DateTime<Utc>,

    /// Custom metadata for extensibility
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl Organization {
    /// Creates a new organization.
    ///
    /// The organization is created with:
    /// - A newly generated UUID v7 ID
    /// - Current timestamp for created_at and updated_at
    ///
    /// # Arguments
    ///
    /// * `name` - The organization name
    /// * `slug` - URL-friendly slug (must be unique; see [`derive_slug`])
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            created_at: now,
            updated_at: now,
            metadata: HashMap::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Derive a URL-friendly slug from a display name.
///
/// Lowercases the name, maps every non-alphanumeric run to a single `-`,
/// and trims leading/trailing dashes. An empty result (e.g. a name made
/// entirely of punctuation) falls back to `"org"` so the caller always
/// gets a usable key; uniqueness conflicts are handled by the caller's
/// bounded retry with a regenerated suffix.
///
/// # Examples
///
/// ```
/// use curator_tenancy::derive_slug;
///
/// assert_eq!(derive_slug("Acme Media"), "acme-media");
/// assert_eq!(derive_slug("  R&D -- Lab  "), "r-d-lab");
/// assert_eq!(derive_slug("!!!"), "org");
/// ```
pub fn derive_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    let slug = slug.trim_end_matches('-').to_string();
    if slug.is_empty() {
        "org".to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_creation() {
        let org = Organization::new("Acme Media", "acme-media").with_description("Video library");
        assert_eq!(org.name, "Acme Media");
        assert_eq!(org.slug, "acme-media");
        assert_eq!(org.description.as_deref(), Some("Video library"));
    }

    #[test]
    fn test_derive_slug_basic() {
        assert_eq!(derive_slug("Acme Media"), "acme-media");
        assert_eq!(derive_slug("acme"), "acme");
    }

    #[test]
    fn test_derive_slug_collapses_punctuation() {
        assert_eq!(derive_slug("  R&D -- Lab  "), "r-d-lab");
        assert_eq!(derive_slug("a   b"), "a-b");
    }

    #[test]
    fn test_derive_slug_empty_fallback() {
        assert_eq!(derive_slug(""), "org");
        assert_eq!(derive_slug("!!!"), "org");
    }

    #[test]
    fn test_derive_slug_unicode_is_dropped() {
        // Non-ASCII characters are treated as separators.
        assert_eq!(derive_slug("café crème"), "caf-cr-me");
    }
}
