//! Orders and the submission rules.
//!
//! `user` and `meal` are snapshots of the display names at submission time,
//! not references into the employee directory or menu.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::menu::MenuBoard;
use crate::types::{MealId, OrderId};

/// Errors from order submission and editing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Ordering before the admin has published a menu.
    #[error("Današnji meni še ni objavljen.")]
    MenuNotPublished,
    /// No meal chosen.
    #[error("Prosimo, izberite malico.")]
    NoMealSelected,
    /// No user name resolved.
    #[error("Prosimo, izberite svoje ime.")]
    NoUser,
    /// The chosen meal id is not on the published menu.
    #[error("Izbrana malica ni na današnjem meniju.")]
    UnknownMeal(MealId),
}

/// A submitted order.
///
/// Serialized with camelCase keys (`hasSoup`); this is also the layout of
/// the persisted order slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub date: NaiveDate,
    pub user: String,
    pub meal: String,
    pub has_soup: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Order {
    /// The note, or `None` when absent or blank.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// Returns a copy with meal, soup and note replaced.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NoMealSelected`] when the new meal name is blank.
    pub fn edited(&self, edit: OrderEdit) -> Result<Self, OrderError> {
        let meal = edit.meal.trim();
        if meal.is_empty() {
            return Err(OrderError::NoMealSelected);
        }
        Ok(Self {
            meal: meal.to_owned(),
            has_soup: edit.has_soup,
            note: clean_note(edit.note),
            ..self.clone()
        })
    }
}

/// Orders placed on `day`, in the given order.
#[must_use]
pub fn orders_on(orders: &[Order], day: NaiveDate) -> Vec<&Order> {
    orders.iter().filter(|o| o.date == day).collect()
}

/// Order form input.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    /// Display name of the person ordering.
    pub user: String,
    /// Selected menu entry.
    pub meal_id: Option<MealId>,
    pub has_soup: bool,
    pub note: Option<String>,
}

impl OrderDraft {
    /// Validate the draft against the published menu and build the order.
    ///
    /// The order gets a fresh id and is dated `today`.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] if the menu is unpublished, no meal is
    /// selected, no user name is set, or the meal is not on the menu.
    pub fn submit(self, menu: &MenuBoard, today: NaiveDate) -> Result<Order, OrderError> {
        if !menu.is_published() {
            return Err(OrderError::MenuNotPublished);
        }
        let meal_id = self
            .meal_id
            .filter(|id| !id.as_str().trim().is_empty())
            .ok_or(OrderError::NoMealSelected)?;
        let user = self.user.trim();
        if user.is_empty() {
            return Err(OrderError::NoUser);
        }
        let meal = menu
            .find(&meal_id)
            .ok_or_else(|| OrderError::UnknownMeal(meal_id.clone()))?;

        Ok(Order {
            id: Some(OrderId::generate()),
            date: today,
            user: user.to_owned(),
            meal: meal.name.clone(),
            has_soup: self.has_soup,
            note: clean_note(self.note),
        })
    }
}

/// Admin edit of an existing order.
#[derive(Debug, Clone, Default)]
pub struct OrderEdit {
    pub meal: String,
    pub has_soup: bool,
    pub note: Option<String>,
}

fn clean_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty())
}
