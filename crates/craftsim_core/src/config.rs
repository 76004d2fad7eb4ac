//! # Bootstrap Configuration
//!
//! Where to find the data files, and how to seed success rolls.
//!
//! ```toml
//! materials = "data/materials.txt"
//! recipes = ["data/recipes/axe.txt"]
//! recipe_dir = "data/recipes"
//! seed = 42
//! ```
//!
//! Relative paths resolve against the directory of the config file when it is
//! loaded with [`CraftingConfig::from_file`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde::Deserialize;
use tracing::info;

use crate::crafter::Crafter;
use crate::error::{CraftError, CraftResult};
use crate::inventory::Inventory;
use crate::loader;

/// Extension of recipe files picked up from `recipe_dir`.
pub const RECIPE_EXTENSION: &str = "txt";

/// Data locations and roll seeding for a crafting session.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CraftingConfig {
    /// Materials file seeding the starting inventory.
    pub materials: PathBuf,
    /// Explicit recipe files, loaded first in the listed order.
    #[serde(default)]
    pub recipes: Vec<PathBuf>,
    /// Directory scanned for `*.txt` recipe files, in path order.
    #[serde(default)]
    pub recipe_dir: Option<PathBuf>,
    /// Seed for reproducible success rolls. Entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl CraftingConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::InvalidConfig`] if the TOML is malformed.
    pub fn from_toml_str(text: &str) -> CraftResult<Self> {
        toml::from_str(text).map_err(|e| CraftError::InvalidConfig(e.to_string()))
    }

    /// Reads a config file, resolving relative paths against its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> CraftResult<Self> {
        let path = path.as_ref();
        let mut config = Self::from_toml_str(&loader::read_file(path)?)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        self.materials = base.join(&self.materials);
        for recipe in &mut self.recipes {
            *recipe = base.join(&*recipe);
        }
        if let Some(dir) = self.recipe_dir.as_mut() {
            *dir = base.join(&*dir);
        }
    }

    /// Every recipe file to load: the explicit list, then `recipe_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`CraftError::Io`] if `recipe_dir` cannot be listed.
    pub fn recipe_paths(&self) -> CraftResult<Vec<PathBuf>> {
        let mut paths = self.recipes.clone();

        if let Some(dir) = &self.recipe_dir {
            let io_err = |source: std::io::Error| CraftError::Io {
                path: dir.clone(),
                source,
            };
            let mut found = Vec::new();
            for entry in std::fs::read_dir(dir).map_err(io_err)? {
                let path = entry.map_err(io_err)?.path();
                if path.extension().is_some_and(|ext| ext == RECIPE_EXTENSION) {
                    found.push(path);
                }
            }
            found.sort();
            paths.extend(found);
        }

        Ok(paths)
    }
}

impl Crafter {
    /// Builds a crafter over a fresh inventory: loads materials, then recipes.
    ///
    /// # Errors
    ///
    /// Propagates any load failure.
    pub fn from_config(config: &CraftingConfig) -> CraftResult<Self> {
        let inventory = Arc::new(Mutex::new(Inventory::new()));
        let mut crafter = match config.seed {
            Some(seed) => Crafter::seeded(inventory, seed),
            None => Crafter::new(inventory),
        };

        crafter.load_materials_from_file(&config.materials)?;
        crafter.load_recipes_from_files(config.recipe_paths()?)?;

        info!(
            materials = %config.materials.display(),
            recipes = crafter.recipe_list().len(),
            seeded = config.seed.is_some(),
            "crafter ready"
        );
        Ok(crafter)
    }
}
