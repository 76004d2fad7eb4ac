//! # Inventory System
//!
//! The authoritative quantity ledger for one player.
//!
//! Stock entries are kept in insertion order and matched with the dual-key
//! material rule (see [`Material::is_same_entity`]). No stock entry holds
//! zero: an entry that reaches exactly zero is removed. Negative additions are
//! carried as a negative balance so the ledger stays the net sum of its
//! additions and removals.
//!
//! Alongside the stock, the inventory remembers every material it has ever
//! been handed (the catalogue). Recipe loading resolves ids against the
//! catalogue, so a material listed with zero starting quantity can still be
//! required by a recipe.

use std::path::Path;

use tracing::{debug, info};

use crate::error::CraftResult;
use crate::loader;
use crate::material::{Material, MaterialId};

/// Signed quantity of a material.
pub type Quantity = i64;

/// A material together with the amount held.
#[derive(Clone, Debug)]
pub struct MaterialStack {
    /// The material.
    pub material: Material,
    /// Amount held, never zero while in an inventory.
    pub quantity: Quantity,
}

/// A player's materials and quantities.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    /// Every distinct material ever added, first-seen wins.
    catalogue: Vec<Material>,
    /// Materials currently held.
    stock: Vec<MaterialStack>,
}

impl Inventory {
    /// Creates a new empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of materials currently held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    /// Returns true if nothing is held.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }

    fn position(&self, material: &Material) -> Option<usize> {
        self.stock
            .iter()
            .position(|s| s.material.is_same_entity(material))
    }

    /// Returns the held quantity of `material`, or 0 if absent.
    #[must_use]
    pub fn get_quantity(&self, material: &Material) -> Quantity {
        self.position(material)
            .map_or(0, |idx| self.stock[idx].quantity)
    }

    /// Adds `quantity` of `material`.
    ///
    /// Sums into an existing same-entity entry, otherwise inserts a new one.
    /// Negative quantities are not rejected: they lower the balance, which may
    /// go below zero. An entry whose balance lands on exactly zero is dropped.
    pub fn add_material(&mut self, material: Material, quantity: Quantity) {
        if !self.catalogue.iter().any(|m| m.is_same_entity(&material)) {
            self.catalogue.push(material.clone());
        }

        match self.position(&material) {
            Some(idx) => {
                let stack = &mut self.stock[idx];
                stack.quantity = stack.quantity.saturating_add(quantity);
                if stack.quantity == 0 {
                    debug!(material = %material.name(), "stock drained by add");
                    self.stock.remove(idx);
                }
            }
            None if quantity != 0 => self.stock.push(MaterialStack { material, quantity }),
            None => {
                debug!(material = %material.name(), "registered material without stock");
            }
        }
    }

    /// Removes `quantity` of `material`.
    ///
    /// Succeeds only if the material is held with at least `quantity`; the
    /// entry is dropped when it reaches exactly zero. On failure, including a
    /// quantity whose subtraction would overflow, nothing changes and `false`
    /// is returned.
    pub fn remove_material(&mut self, material: &Material, quantity: Quantity) -> bool {
        let Some(idx) = self.position(material) else {
            return false;
        };

        let stack = &mut self.stock[idx];
        if stack.quantity < quantity {
            return false;
        }
        let Some(left) = stack.quantity.checked_sub(quantity) else {
            return false;
        };

        stack.quantity = left;
        if left == 0 {
            self.stock.remove(idx);
        }
        true
    }

    /// Iterates the materials currently held.
    pub fn materials(&self) -> impl Iterator<Item = &Material> {
        self.stock.iter().map(|s| &s.material)
    }

    /// Read-only view of every held material and its quantity.
    #[must_use]
    pub fn get_all_materials(&self) -> &[MaterialStack] {
        &self.stock
    }

    /// Every material this inventory has been handed, held or not.
    #[must_use]
    pub fn known_materials(&self) -> &[Material] {
        &self.catalogue
    }

    /// Finds a known material by numeric id only.
    ///
    /// Unlike the quantity operations this ignores names.
    #[must_use]
    pub fn get_material(&self, id: MaterialId) -> Option<&Material> {
        self.catalogue.iter().find(|m| m.id() == id)
    }

    /// Loads `id,name,quantity` lines from a materials file and adds each one.
    ///
    /// Returns the number of records applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a numeric field is
    /// malformed. Records before the malformed line are not applied.
    pub fn load_materials_from_file(&mut self, path: impl AsRef<Path>) -> CraftResult<usize> {
        let path = path.as_ref();
        let records = loader::read_materials(path)?;
        let count = records.len();

        for record in records {
            self.add_material(record.material, record.quantity);
        }

        info!(path = %path.display(), count, "loaded materials");
        Ok(count)
    }

    /// Creates a snapshot of the stock for rollback.
    #[must_use]
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            stock: self.stock.clone(),
        }
    }

    /// Restores the stock from a snapshot (rollback).
    pub fn restore(&mut self, snapshot: &InventorySnapshot) {
        self.stock.clone_from(&snapshot.stock);
    }
}

/// Snapshot of inventory stock for transactional rollback.
#[derive(Clone, Debug)]
pub struct InventorySnapshot {
    stock: Vec<MaterialStack>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn wood() -> Material {
        Material::new(1, "Wood")
    }

    fn iron() -> Material {
        Material::new(2, "Iron")
    }

    #[test]
    fn test_quantity_of_absent_is_zero() {
        let inv = Inventory::new();
        assert_eq!(inv.get_quantity(&wood()), 0);
    }

    #[test]
    fn test_add_sums() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 3);
        inv.add_material(wood(), 4);
        assert_eq!(inv.get_quantity(&wood()), 7);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_add_merges_by_id() {
        let mut inv = Inventory::new();
        inv.add_material(Material::new(1, "Wood"), 2);
        inv.add_material(Material::new(1, "Timber"), 3);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.get_quantity(&Material::new(1, "anything")), 5);
        assert_eq!(inv.get_all_materials()[0].material.name(), "Wood");
    }

    #[test]
    fn test_add_merges_by_name() {
        let mut inv = Inventory::new();
        inv.add_material(Material::new(1, "Wood"), 2);
        inv.add_material(Material::new(9, "WOOD"), 3);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.get_quantity(&Material::new(42, "wood")), 5);
    }

    #[test]
    fn test_remove_items() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 10);
        assert!(inv.remove_material(&wood(), 4));
        assert_eq!(inv.get_quantity(&wood()), 6);
    }

    #[test]
    fn test_remove_insufficient() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 3);
        assert!(!inv.remove_material(&wood(), 4));
        assert_eq!(inv.get_quantity(&wood()), 3);
    }

    #[test]
    fn test_remove_absent() {
        let mut inv = Inventory::new();
        assert!(!inv.remove_material(&iron(), 0));
    }

    #[test]
    fn test_drain_removes_entry() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 5);
        inv.add_material(iron(), 1);
        assert!(inv.remove_material(&wood(), 5));
        assert_eq!(inv.len(), 1);
        assert!(inv.materials().all(|m| !m.is_same_entity(&wood())));
    }

    #[test]
    fn test_zero_quantity_is_known_but_not_held() {
        let mut inv = Inventory::new();
        inv.add_material(Material::new(5, "Dust"), 0);
        assert!(inv.is_empty());
        assert_eq!(inv.get_material(5).map(Material::name), Some("Dust"));
    }

    #[test]
    fn test_negative_add_lowers_balance() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 5);
        inv.add_material(wood(), -2);
        assert_eq!(inv.get_quantity(&wood()), 3);
        inv.add_material(wood(), -3);
        assert_eq!(inv.get_quantity(&wood()), 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_negative_balance_carried() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), -3);
        assert_eq!(inv.get_quantity(&wood()), -3);
        inv.add_material(wood(), 5);
        assert_eq!(inv.get_quantity(&wood()), 2);

        inv.add_material(iron(), 1);
        inv.add_material(iron(), -4);
        assert_eq!(inv.get_quantity(&iron()), -3);
        assert!(!inv.remove_material(&iron(), 1));
        assert_eq!(inv.get_quantity(&iron()), -3);
    }

    #[test]
    fn test_remove_overflow_is_refused() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 5);
        assert!(!inv.remove_material(&wood(), Quantity::MIN));
        assert_eq!(inv.get_quantity(&wood()), 5);
    }

    #[test]
    fn test_get_material_by_id_only() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 1);
        assert!(inv.get_material(1).is_some());
        assert!(inv.get_material(2).is_none());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut inv = Inventory::new();
        inv.add_material(wood(), 5);
        let snapshot = inv.snapshot();

        assert!(inv.remove_material(&wood(), 5));
        inv.add_material(iron(), 2);

        inv.restore(&snapshot);
        assert_eq!(inv.get_quantity(&wood()), 5);
        assert_eq!(inv.get_quantity(&iron()), 0);
        // Catalogue survives rollback.
        assert!(inv.get_material(2).is_some());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Add(i32, Quantity),
        Remove(i32, Quantity),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i32..3, -20i64..20).prop_map(|(m, q)| Op::Add(m, q)),
            (0i32..3, 0i64..20).prop_map(|(m, q)| Op::Remove(m, q)),
        ]
    }

    fn fixture(idx: i32) -> Material {
        Material::new(idx, &format!("mat{idx}"))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 500,
            ..ProptestConfig::default()
        })]

        /// Property: quantity equals additions minus successful removals.
        #[test]
        fn ledger_conserves_quantity(ops in proptest::collection::vec(op_strategy(), 0..64)) {
            let mut inv = Inventory::new();
            let mut expected = [0i64; 3];

            for op in ops {
                match op {
                    Op::Add(m, q) => {
                        inv.add_material(fixture(m), q);
                        expected[m as usize] += q;
                    }
                    Op::Remove(m, q) => {
                        let before = inv.get_quantity(&fixture(m));
                        let removed = inv.remove_material(&fixture(m), q);
                        if q > before {
                            prop_assert!(!removed);
                            prop_assert_eq!(inv.get_quantity(&fixture(m)), before);
                        }
                        if removed {
                            expected[m as usize] -= q;
                        }
                    }
                }
            }

            for (m, want) in expected.iter().enumerate() {
                let m = i32::try_from(m).unwrap();
                prop_assert_eq!(inv.get_quantity(&fixture(m)), *want);
            }
            prop_assert!(inv.get_all_materials().iter().all(|s| s.quantity != 0));
        }
    }
}
