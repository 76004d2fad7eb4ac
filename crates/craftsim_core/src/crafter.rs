//! # Crafter
//!
//! **Transactional crafting against one shared inventory.**
//!
//! A craft attempt runs four stages in strict order, each able to
//! short-circuit the rest:
//!
//! ```text
//! Lookup -> Validate -> Consume -> Resolve
//!   |          |           |          |
//!   |          |           |          +-- Success / Failure (materials gone either way)
//!   |          |           +-- ConsumeFailed (inventory rolled back)
//!   |          +-- MissingMaterial / InsufficientMaterial (nothing touched)
//!   +-- RecipeNotFound (nothing touched)
//! ```
//!
//! Validate and Consume run under the inventory lock, so crafters sharing an
//! inventory cannot interleave between the check and the removal. Consume is
//! all-or-nothing: the stock is snapshotted first and restored if any single
//! removal fails.
//!
//! ## Example
//!
//! ```rust,ignore
//! let inventory = Arc::new(Mutex::new(Inventory::new()));
//! let mut crafter = Crafter::seeded(Arc::clone(&inventory), 42);
//! crafter.load_materials_from_file("data/materials.txt")?;
//! crafter.load_recipes_from_files(["data/recipes/axe.txt"])?;
//!
//! println!("{}", crafter.craft_item("axe"));
//! ```

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::error::{CraftError, CraftResult};
use crate::inventory::{Inventory, Quantity};
use crate::loader;
use crate::recipe::{Recipe, Requirements};

/// An inventory shared between a crafter and its caller.
pub type SharedInventory = Arc<Mutex<Inventory>>;

/// Result of a craft attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum CraftOutcome {
    /// No loaded recipe has the requested name.
    RecipeNotFound,
    /// A required material is not held at all.
    MissingMaterial {
        /// Name of the missing material.
        material: String,
    },
    /// A required material is held, but not enough of it.
    InsufficientMaterial {
        /// Name of the short material.
        material: String,
        /// Quantity the recipe requires.
        needed: Quantity,
        /// Quantity held.
        have: Quantity,
    },
    /// A removal failed after validation passed; the inventory was restored.
    ConsumeFailed,
    /// Materials consumed and the roll succeeded.
    Success {
        /// Name of the crafted recipe.
        recipe: String,
    },
    /// Materials consumed and the roll failed.
    Failure {
        /// Name of the attempted recipe.
        recipe: String,
    },
}

impl CraftOutcome {
    /// Returns true for [`CraftOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns true if the attempt consumed materials.
    #[must_use]
    pub const fn consumed_materials(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Failure { .. })
    }
}

impl fmt::Display for CraftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RecipeNotFound => f.write_str("Recipe not found."),
            Self::MissingMaterial { material } => write!(f, "Missing material: {material}"),
            Self::InsufficientMaterial {
                material,
                needed,
                have,
            } => write!(f, "Not enough {material} (need {needed}, have {have})"),
            Self::ConsumeFailed => f.write_str("Not enough materials"),
            Self::Success { recipe } => write!(f, "Crafting '{recipe}' succeeded!"),
            Self::Failure { recipe } => write!(f, "Crafting '{recipe}' failed. Materials lost."),
        }
    }
}

/// Holds the recipe catalogue and crafts against one inventory.
///
/// `R` supplies success rolls; inject a seeded or mock generator for
/// reproducible outcomes.
pub struct Crafter<R = ChaCha8Rng> {
    inventory: SharedInventory,
    /// Sorted by name, ignoring case.
    recipes: Vec<Recipe>,
    rng: R,
}

impl Crafter<ChaCha8Rng> {
    /// Creates a crafter whose rolls are seeded from OS entropy.
    #[must_use]
    pub fn new(inventory: SharedInventory) -> Self {
        Self::with_rng(inventory, ChaCha8Rng::from_entropy())
    }

    /// Creates a crafter with reproducible rolls.
    #[must_use]
    pub fn seeded(inventory: SharedInventory, seed: u64) -> Self {
        Self::with_rng(inventory, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Crafter<R> {
    /// Creates a crafter with an explicit roll generator.
    pub fn with_rng(inventory: SharedInventory, rng: R) -> Self {
        Self {
            inventory,
            recipes: Vec::new(),
            rng,
        }
    }

    /// The inventory this crafter consumes from.
    #[must_use]
    pub fn inventory(&self) -> &SharedInventory {
        &self.inventory
    }

    /// Loaded recipes, sorted by name ignoring case.
    #[must_use]
    pub fn recipe_list(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Names of the loaded recipes in catalogue order.
    pub fn recipe_names(&self) -> impl Iterator<Item = &str> {
        self.recipes.iter().map(Recipe::name)
    }

    /// First recipe whose name matches `name` ignoring case.
    #[must_use]
    pub fn find_recipe(&self, name: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.matches_name(name))
    }

    /// Replaces the whole catalogue and sorts it by name.
    ///
    /// The sort is stable, so recipes sharing a name keep their given order
    /// and lookup returns the first of them.
    pub fn replace_recipes(&mut self, recipes: impl IntoIterator<Item = Recipe>) {
        let mut recipes: Vec<Recipe> = recipes.into_iter().collect();
        recipes.sort_by(Recipe::cmp_by_name);
        self.recipes = recipes;
    }

    /// Loads starting materials into the shared inventory.
    ///
    /// # Errors
    ///
    /// See [`Inventory::load_materials_from_file`].
    pub fn load_materials_from_file(&self, path: impl AsRef<Path>) -> CraftResult<usize> {
        self.inventory.lock().load_materials_from_file(path)
    }

    /// Loads one recipe per file and replaces the catalogue with them.
    ///
    /// Material ids resolve against the inventory by id only. Files with
    /// fewer than two lines are skipped. On error the previous catalogue is
    /// kept unchanged.
    ///
    /// Returns the number of recipes loaded.
    ///
    /// # Errors
    ///
    /// - `Io` if a file cannot be read
    /// - `MalformedNumber` / `MissingField` for bad lines
    /// - `UnknownMaterial` if a recipe names an id the inventory never saw
    pub fn load_recipes_from_files<I, P>(&mut self, paths: I) -> CraftResult<usize>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut recipes = Vec::new();
        {
            let inventory = self.inventory.lock();
            for path in paths {
                let path = path.as_ref();
                let Some(record) = loader::read_recipe(path)? else {
                    warn!(path = %path.display(), "skipping recipe file with fewer than two lines");
                    continue;
                };

                let mut required = Requirements::new();
                for (id, quantity) in record.requirements {
                    let material = inventory
                        .get_material(id)
                        .ok_or_else(|| CraftError::UnknownMaterial {
                            path: path.to_path_buf(),
                            id,
                        })?;
                    required.insert(material.clone(), quantity);
                }

                recipes.push(Recipe::new(&record.name, record.success_rate, required));
            }
        }

        let count = recipes.len();
        self.replace_recipes(recipes);
        info!(count, "loaded recipes");
        Ok(count)
    }

    /// Runs Lookup and Validate without touching the inventory.
    ///
    /// # Errors
    ///
    /// Returns the outcome a craft would stop at: `RecipeNotFound`,
    /// `MissingMaterial` or `InsufficientMaterial`.
    pub fn can_craft(&self, recipe_name: &str) -> Result<&Recipe, CraftOutcome> {
        let recipe = self
            .find_recipe(recipe_name)
            .ok_or(CraftOutcome::RecipeNotFound)?;
        check_requirements(recipe, &self.inventory.lock())?;
        Ok(recipe)
    }

    /// Attempts to craft `recipe_name`.
    ///
    /// Never panics for a well-formed request; every path ends in a
    /// [`CraftOutcome`].
    pub fn craft(&mut self, recipe_name: &str) -> CraftOutcome {
        let Some(recipe) = self.recipes.iter().find(|r| r.matches_name(recipe_name)) else {
            debug!(recipe = recipe_name, "recipe not found");
            return CraftOutcome::RecipeNotFound;
        };

        {
            let mut inventory = self.inventory.lock();
            if let Err(outcome) = check_requirements(recipe, &inventory) {
                debug!(recipe = recipe.name(), %outcome, "craft rejected");
                return outcome;
            }
            if let Err(outcome) = consume(recipe, &mut inventory) {
                return outcome;
            }
        }

        let roll: f64 = self.rng.gen();
        let outcome = if roll < recipe.success_rate() {
            CraftOutcome::Success {
                recipe: recipe.name().to_string(),
            }
        } else {
            CraftOutcome::Failure {
                recipe: recipe.name().to_string(),
            }
        };

        debug!(recipe = recipe.name(), roll, %outcome, "craft resolved");
        outcome
    }

    /// Attempts to craft `recipe_name` and renders the outcome as a message.
    pub fn craft_item(&mut self, recipe_name: &str) -> String {
        self.craft(recipe_name).to_string()
    }
}

/// The first short requirement, in listing order, decides the outcome.
fn check_requirements(recipe: &Recipe, inventory: &Inventory) -> Result<(), CraftOutcome> {
    for (material, needed) in recipe.required_materials().iter() {
        let have = inventory.get_quantity(material);
        if have >= needed {
            continue;
        }

        return Err(if have == 0 {
            CraftOutcome::MissingMaterial {
                material: material.name().to_string(),
            }
        } else {
            CraftOutcome::InsufficientMaterial {
                material: material.name().to_string(),
                needed,
                have,
            }
        });
    }
    Ok(())
}

/// Removes every requirement, or none of them.
fn consume(recipe: &Recipe, inventory: &mut Inventory) -> Result<(), CraftOutcome> {
    let snapshot = inventory.snapshot();

    for (material, quantity) in recipe.required_materials().iter() {
        if !inventory.remove_material(material, quantity) {
            inventory.restore(&snapshot);
            warn!(
                recipe = recipe.name(),
                material = material.name(),
                quantity,
                "removal failed after validation, rolled back"
            );
            return Err(CraftOutcome::ConsumeFailed);
        }
    }
    Ok(())
}
