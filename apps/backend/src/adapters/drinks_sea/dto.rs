//! DTOs for drinks_sea adapter.

/// Column values for a new row, already JSON-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrinkCreate {
    pub title: String,
    pub recipe: String,
}

/// Encoded columns to overwrite; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrinkUpdate {
    pub title: Option<String>,
    pub recipe: Option<String>,
}

impl DrinkUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.recipe.is_none()
    }
}
