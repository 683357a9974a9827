//! Movements: the savings and expenses recorded in the ledger.
//!
//! This module contains everything related to movements:
//! - The `Movement` model, its validated `Amount` and `MovementKind`, and
//!   `MovementBuilder` for creating movements
//! - Database functions for storing and listing movements
//! - The handlers for the movements page

mod db;
mod domain;
mod page;

pub use db::{
    count_movements, create_movement, create_movement_table, get_all_movements, get_movement,
};
pub use domain::{Amount, Movement, MovementBuilder, MovementForm, MovementId, MovementKind};
pub use page::{MovementsPageState, create_movement_endpoint, get_movements_page};
