//! # Materials
//!
//! Immutable descriptors for craftable resources.
//!
//! ## Identity
//!
//! Two materials are the same entity when their ids match OR their names match
//! case-insensitively. The rule is reflexive and symmetric but NOT transitive:
//! `(1, "Wood")` matches `(1, "Iron")`, which matches `(2, "Iron")`, yet the
//! first and last share nothing. Because of that, `Material` does not implement
//! `PartialEq`, `Eq` or `Hash`; collections key materials with
//! [`Material::is_same_entity`] over an ordered scan.

/// Numeric identifier for a material.
pub type MaterialId = i32;

/// A craftable resource.
#[derive(Clone, Debug)]
pub struct Material {
    id: MaterialId,
    name: String,
    kind: String,
}

impl Material {
    /// Creates a material with an empty type.
    ///
    /// The name is trimmed. Empty names are accepted.
    #[must_use]
    pub fn new(id: MaterialId, name: &str) -> Self {
        Self::with_type(id, name, "")
    }

    /// Creates a material with a type/category label. Both strings are trimmed.
    #[must_use]
    pub fn with_type(id: MaterialId, name: &str, kind: &str) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            kind: kind.trim().to_string(),
        }
    }

    /// Numeric id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> MaterialId {
        self.id
    }

    /// Trimmed display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trimmed type label, possibly empty.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns true if `other` refers to the same entity under the dual-key
    /// rule: equal ids, or names equal ignoring case.
    #[must_use]
    pub fn is_same_entity(&self, other: &Material) -> bool {
        self.id == other.id || names_match(&self.name, &other.name)
    }
}

/// Case-insensitive name comparison shared by materials and recipes.
pub(crate) fn names_match(a: &str, b: &str) -> bool {
    if a.len() == b.len() && a.eq_ignore_ascii_case(b) {
        return true;
    }
    a.to_lowercase() == b.to_lowercase()
}
