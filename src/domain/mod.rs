pub mod error;

// Inventory report model
pub mod inventory;
