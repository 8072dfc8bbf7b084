//! Meals and the published daily menu.

use serde::{Deserialize, Serialize};

use crate::types::MealId;

/// Errors from menu publication.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// One of the two daily specials is blank.
    #[error("Prosimo, vnesite obe dnevni malici.")]
    MissingSpecial,
}

/// A menu entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meal {
    pub id: MealId,
    pub name: String,
}

impl Meal {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: MealId::new(id),
            name: name.to_owned(),
        }
    }
}

/// Ids given to the two daily specials on every publish.
pub const DAILY_SPECIAL_IDS: [&str; 2] = ["1", "2"];

/// Always-available meals, in display order.
pub const PERMANENT_MEALS: [(&str, &str); 4] = [
    (
        "3",
        "Dunajski zrezek, Pommes frites, tatarska omaka ali solata",
    ),
    ("4", "Ocvrti sir, Pommes frites, tatarska omaka ali solata"),
    ("5", "Kebab Krožnik"),
    ("6", "Solata s piščancem"),
];

/// The permanent meals as [`Meal`] values.
#[must_use]
pub fn permanent_meals() -> Vec<Meal> {
    PERMANENT_MEALS
        .iter()
        .map(|&(id, name)| Meal::new(id, name))
        .collect()
}

/// The active menu and whether it has been published.
#[derive(Debug, Clone, Default)]
pub struct MenuBoard {
    meals: Vec<Meal>,
    published: bool,
}

impl MenuBoard {
    /// Replace the menu with two fresh specials followed by the permanent meals.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::MissingSpecial`] if either trimmed name is empty;
    /// the board is left unchanged.
    pub fn publish(&mut self, special_1: &str, special_2: &str) -> Result<&[Meal], MenuError> {
        let (special_1, special_2) = (special_1.trim(), special_2.trim());
        if special_1.is_empty() || special_2.is_empty() {
            return Err(MenuError::MissingSpecial);
        }

        let [id_1, id_2] = DAILY_SPECIAL_IDS;
        let mut meals = vec![Meal::new(id_1, special_1), Meal::new(id_2, special_2)];
        meals.extend(permanent_meals());

        self.meals = meals;
        self.published = true;
        Ok(&self.meals)
    }

    /// Whether a menu has been published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        self.published
    }

    /// All meals of the published menu (empty before publication).
    #[must_use]
    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    /// Look up a meal of the published menu.
    #[must_use]
    pub fn find(&self, id: &MealId) -> Option<&Meal> {
        self.meals.iter().find(|m| &m.id == id)
    }
}
