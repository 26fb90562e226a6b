//! Fixed-slot selection state for the comparison view.
//!
//! Each view instance owns one [`SelectionSlots`]; mutations are synchronous
//! and the state lives only as long as the view. Nothing here persists or
//! crosses sessions.

use transom_core::Product;

/// Number of side-by-side comparison positions.
pub const SLOT_COUNT: usize = 3;

/// An ordered, fixed-length sequence of comparison slots, each holding zero
/// or one product. Slot identity is positional.
#[derive(Debug, Clone, Default)]
pub struct SelectionSlots {
    slots: [Option<Product>; SLOT_COUNT],
}

impl SelectionSlots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the slot at `index` with `product` (or empties it).
    ///
    /// Out-of-range indexes are ignored. A product already occupying a
    /// different slot is also ignored, so no product can appear twice;
    /// re-setting a slot to its current occupant is allowed.
    pub fn set_slot(&mut self, index: usize, product: Option<Product>) {
        if index >= SLOT_COUNT {
            return;
        }
        if let Some(candidate) = &product {
            let duplicate = self
                .slots
                .iter()
                .enumerate()
                .any(|(i, slot)| i != index && slot.as_ref().is_some_and(|p| p.id == candidate.id));
            if duplicate {
                return;
            }
        }
        self.slots[index] = product;
    }

    /// Resets every slot to empty.
    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// The product at `index`, if the slot is occupied. Out-of-range
    /// indexes read as empty.
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&Product> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// All slots in position order, empties included.
    #[must_use]
    pub fn slots(&self) -> &[Option<Product>] {
        &self.slots
    }

    /// Occupied slots in position order.
    pub fn selected(&self) -> impl Iterator<Item = &Product> {
        self.slots.iter().filter_map(Option::as_ref)
    }

    /// True iff any slot is occupied.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.slots.iter().any(Option::is_some)
    }

    /// The subset of `catalog` not currently occupying any slot, in catalog
    /// order. Recomputed on every call; nothing is cached.
    #[must_use]
    pub fn available_products<'a>(&self, catalog: &'a [Product]) -> Vec<&'a Product> {
        catalog
            .iter()
            .filter(|p| !self.selected().any(|s| s.id == p.id))
            .collect()
    }
}
