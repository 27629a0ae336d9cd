//! Item definitions. Only the item kinds the battle engine consumes are
//! modeled: healing items and capture devices.

use serde::{Deserialize, Serialize};

/// What using an item does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemEffect {
    /// Restore HP to a party member. `None` means a full heal.
    Heal { amount: Option<u16> },
    /// Attempt to capture the active enemy monster (wild battles only).
    Capture { ball_bonus: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub effect: ItemEffect,
}
