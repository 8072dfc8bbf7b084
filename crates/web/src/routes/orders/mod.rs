//! Order history handlers on the admin panel.
//!
//! This module contains the history listing, clearing the store, and the
//! per-order edit and delete actions.

mod edit;
mod list;

pub use edit::{MealOption, OrderEditForm, OrderEditTemplate, delete, edit, update};
pub use list::{OrderRow, OrdersTemplate, clear, index};
