//! Sold-flag operations on a [`Property`](crate::model::Property).
//!
//! These are the only way `is_sold` changes. Each runs inside the property store's actor, so
//! the check and the write happen as one step.

#[derive(Debug, Clone)]
pub enum PropertyAction {
    /// Sets `is_sold` only if it is currently false.
    MarkSold,
    /// Clears `is_sold`. Used to undo a sale when its transaction is cancelled or fails to
    /// persist.
    MarkAvailable,
}

/// Variants match 1:1 with [`PropertyAction`]. The flag reports whether a row changed, the
/// in-memory analogue of an affected-row count.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyActionResult {
    MarkSold(bool),
    MarkAvailable(bool),
}
