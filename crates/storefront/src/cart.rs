//! Shopping cart.
//!
//! An ordered list of [`CartLine`]s with at most one line per product id.
//! The cart itself is plain in-memory state; [`crate::state::ShopState`]
//! persists it after every mutation.

use shophub_core::{CartLine, Price, Product, ProductId};

/// In-memory cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted lines.
    ///
    /// Lines with a zero quantity are dropped and repeated product ids are
    /// merged into the first occurrence, so the one-line-per-product rule
    /// holds even for hand-edited storage.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(&line.product.id) {
                Some(i) => {
                    if let Some(existing) = cart.lines.get_mut(i) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.product.id == id)
    }

    /// Add one unit of `product`.
    ///
    /// Increments the existing line, or appends a new line with a quantity
    /// of one. Returns the line's new quantity.
    pub fn add_to_cart(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }
        self.lines.push(CartLine::new(product.clone()));
        1
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero removes the line. Returns `false` when no line
    /// exists for `id`, in which case nothing changes.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(id).is_some();
        }
        match self.lines.iter_mut().find(|l| &l.product.id == id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Raise a line's quantity by one (the cart's `+` button).
    pub fn increment(&mut self, id: &ProductId) -> bool {
        match self.get(id) {
            Some(line) => {
                let quantity = line.quantity.saturating_add(1);
                self.update_quantity(id, quantity)
            }
            None => false,
        }
    }

    /// Lower a line's quantity by one, removing it at zero (the `-` button).
    pub fn decrement(&mut self, id: &ProductId) -> bool {
        match self.get(id) {
            Some(line) => {
                let quantity = line.quantity.saturating_sub(1);
                self.update_quantity(id, quantity)
            }
            None => false,
        }
    }

    /// Delete the line for `id`, returning it if it existed.
    pub fn remove_item(&mut self, id: &ProductId) -> Option<CartLine> {
        self.position(id).map(|i| self.lines.remove(i))
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// The line for `id`, if any.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == id)
    }

    /// All lines, in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
