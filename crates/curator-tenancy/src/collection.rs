//! Collection domain model
//!
//! This module provides the Collection entity: a content container owned
//! by exactly one organization, with a visibility level that drives the
//! content-access predicate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Visibility level determining who can see a collection's content.
///
/// Visibility widens access within the owning organization only; it never
/// exposes content outside the organization's membership.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CollectionVisibility {
    /// Visible only to direct collection members
    Private,

    /// Visible to every member of the owning organization
    Public,
}

impl CollectionVisibility {
    /// Check if this visibility opens the collection to the whole
    /// organization.
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Public)
    }

    /// Parse visibility from string representation (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "private" => Some(Self::Private),
            "public" => Some(Self::Public),
            _ => None,
        }
    }

    /// Get string representation of the visibility.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Public => "public",
        }
    }
}

impl Default for CollectionVisibility {
    fn default() -> Self {
        Self::Private
    }
}

/// A collection of content within an organization.
///
/// Collections belong to exactly one organization for their entire
/// lifetime: the owning organization is fixed at construction and there
/// is no operation that reparents a collection.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use curator_tenancy::{Collection, CollectionVisibility};
///
/// let org_id = Uuid::now_v7();
/// let collection = Collection::new(org_id, "Launch Footage", CollectionVisibility::Private);
/// assert_eq!(collection.organization_id(), org_id);
/// assert!(!collection.visibility.is_public());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    /// Unique identifier for the collection
    pub id: Uuid,

    /// Organization this collection belongs to (fixed at construction)
    organization_id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Visibility level
    pub visibility: CollectionVisibility,

    /// When the collection was created
    pub created_at: DateTime<Utc>,

    /// When the collection was last updated
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Creates a new collection owned by `organization_id`.
    ///
    /// # Arguments
    ///
    /// * `organization_id` - The owning organization (immutable afterwards)
    /// * `name` - The collection name
    /// * `visibility` - Who within the organization can see the content
    pub fn new(
        organization_id: Uuid,
        name: impl Into<String>,
        visibility: CollectionVisibility,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            organization_id,
            name: name.into(),
            description: None,
            visibility,
            created_at: now,
            updated_at: now,
        }
    }

    /// The owning organization's id.
    pub fn organization_id(&self) -> Uuid {
        self.organization_id
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_creation() {
        let org_id = Uuid::now_v7();
        let collection = Collection::new(org_id, "Launch Footage", CollectionVisibility::Public)
            .with_description("Q3 launch recordings");

        assert_eq!(collection.organization_id(), org_id);
        assert_eq!(collection.name, "Launch Footage");
        assert!(collection.visibility.is_public());
        assert_eq!(collection.description.as_deref(), Some("Q3 launch recordings"));
    }

    #[test]
    fn test_visibility_parse() {
        assert_eq!(
            CollectionVisibility::parse("public"),
            Some(CollectionVisibility::Public)
        );
        assert_eq!(
            CollectionVisibility::parse("PRIVATE"),
            Some(CollectionVisibility::Private)
        );
        assert_eq!(CollectionVisibility::parse("hidden"), None);
    }

    #[test]
    fn test_visibility_default_is_private() {
        assert_eq!(CollectionVisibility::default(), CollectionVisibility::Private);
    }
}
