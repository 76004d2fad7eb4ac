//! # Recipes
//!
//! Immutable crafting definitions. Requirements keep the order they were
//! listed in, which decides which shortage a failed craft reports.

use std::cmp::Ordering;

use crate::inventory::Quantity;
use crate::material::{names_match, Material};

/// Ordered mapping from required material to required quantity.
///
/// Inserting a material that is the same entity as an existing key replaces
/// that key's quantity in place.
#[derive(Clone, Debug, Default)]
pub struct Requirements {
    entries: Vec<(Material, Quantity)>,
}

impl Requirements {
    /// Creates an empty requirement set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the quantity required of `material`.
    pub fn insert(&mut self, material: Material, quantity: Quantity) {
        match self
            .entries
            .iter_mut()
            .find(|(m, _)| m.is_same_entity(&material))
        {
            Some(entry) => entry.1 = quantity,
            None => self.entries.push((material, quantity)),
        }
    }

    /// Iterates `(material, quantity)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Material, Quantity)> {
        self.entries.iter().map(|(m, q)| (m, *q))
    }

    /// Quantity required of `material`, if it is a requirement.
    #[must_use]
    pub fn get(&self, material: &Material) -> Option<Quantity> {
        self.entries
            .iter()
            .find(|(m, _)| m.is_same_entity(material))
            .map(|(_, q)| *q)
    }

    /// Number of distinct required materials.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is required.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Material, Quantity)> for Requirements {
    fn from_iter<I: IntoIterator<Item = (Material, Quantity)>>(iter: I) -> Self {
        let mut requirements = Self::new();
        for (material, quantity) in iter {
            requirements.insert(material, quantity);
        }
        requirements
    }
}

/// A crafting recipe.
#[derive(Clone, Debug)]
pub struct Recipe {
    name: String,
    success_rate: f64,
    required: Requirements,
}

impl Recipe {
    /// Creates a recipe. The name is trimmed.
    ///
    /// No range checks are applied to `success_rate` or the quantities.
    #[must_use]
    pub fn new(name: &str, success_rate: f64, required: Requirements) -> Self {
        Self {
            name: name.trim().to_string(),
            success_rate,
            required,
        }
    }

    /// Recipe name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Probability in `[0, 1]` that a craft succeeds.
    #[inline]
    #[must_use]
    pub const fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Required materials in listing order.
    #[inline]
    #[must_use]
    pub const fn required_materials(&self) -> &Requirements {
        &self.required
    }

    /// Returns true if `name` matches this recipe's name ignoring case.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }

    /// Orders recipes by name, ignoring case.
    ///
    /// Names fold to upper case, so `_` and the other ASCII symbols between
    /// `Z` and `a` sort after letters.
    #[must_use]
    pub fn cmp_by_name(&self, other: &Recipe) -> Ordering {
        self.name
            .to_uppercase()
            .cmp(&other.name.to_uppercase())
    }
}
