//! # CraftSim Core
//!
//! The crafting resolution engine: inventory accounting, recipe lookup and
//! validation, and the consume-then-roll transaction.
//!
//! ## Design Principles
//!
//! 1. **Dual-key material identity** - same id OR same name (ignoring case)
//! 2. **Transactional consumption** - all required materials are removed, or none
//! 3. **Injected randomness** - success rolls come from a caller-supplied generator
//! 4. **Typed outcomes** - craft attempts return [`CraftOutcome`], never errors
//!
//! ## Thread Safety
//!
//! The inventory is shared as `Arc<Mutex<Inventory>>`. A crafter holds the lock
//! across validation and consumption, so crafters sharing one inventory see
//! each craft as a single step.
//!
//! ## Example
//!
//! ```rust,ignore
//! use craftsim_core::{Crafter, CraftingConfig};
//!
//! let config = CraftingConfig::from_file("craftsim.toml")?;
//! let mut crafter = Crafter::from_config(&config)?;
//!
//! for name in crafter.recipe_names() {
//!     println!("{name}");
//! }
//! println!("{}", crafter.craft_item("Axe"));
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod crafter;
pub mod error;
pub mod inventory;
pub mod loader;
pub mod material;
pub mod recipe;

pub use config::CraftingConfig;
pub use crafter::{CraftOutcome, Crafter, SharedInventory};
pub use error::{CraftError, CraftResult};
pub use inventory::{Inventory, InventorySnapshot, MaterialStack, Quantity};
pub use loader::{MaterialRecord, RecipeRecord};
pub use material::{Material, MaterialId};
pub use recipe::{Recipe, Requirements};
