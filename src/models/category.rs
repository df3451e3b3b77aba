//! Category model
//!
//! Categories are flat labels with a display color. Names are not required
//! to be unique.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Maximum category name length
pub const MAX_CATEGORY_NAME_LEN: usize = 50;

/// Colors handed out to new categories, in rotation
pub const CATEGORY_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#FF6384", "#C9CBCF",
];

/// Color used for expenses whose category no longer exists
pub const UNKNOWN_CATEGORY_COLOR: &str = "#9E9E9E";

/// An expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// CSS hex color, `#RRGGBB`
    pub color: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;
        validate_color(&self.color)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Fields supplied when adding a category
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
}

impl NewCategory {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Mutable category fields
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

pub fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    let len = name.chars().count();
    if len > MAX_CATEGORY_NAME_LEN {
        return Err(CategoryValidationError::NameTooLong(len));
    }
    Ok(())
}

pub fn validate_color(color: &str) -> Result<(), CategoryValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(CategoryValidationError::InvalidColor(color.to_string()))
    }
}

/// The categories seeded on first run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultCategory {
    FoodAndDrink,
    Transportation,
    Shopping,
    Bills,
    Health,
    Education,
    Entertainment,
    Other,
}

impl DefaultCategory {
    /// Get all default categories in seed order
    pub fn all() -> &'static [Self] {
        &[
            Self::FoodAndDrink,
            Self::Transportation,
            Self::Shopping,
            Self::Bills,
            Self::Health,
            Self::Education,
            Self::Entertainment,
            Self::Other,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::FoodAndDrink => "Makanan & Minuman",
            Self::Transportation => "Transportasi",
            Self::Shopping => "Belanja",
            Self::Bills => "Tagihan",
            Self::Health => "Kesehatan",
            Self::Education => "Pendidikan",
            Self::Entertainment => "Hiburan",
            Self::Other => "Lainnya",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::FoodAndDrink => "#FF6384",
            Self::Transportation => "#36A2EB",
            Self::Shopping => "#FFCE56",
            Self::Bills => "#4BC0C0",
            Self::Health => "#9966FF",
            Self::Education => "#FF9F40",
            Self::Entertainment => "#FF6384",
            Self::Other => "#C9CBCF",
        }
    }

    /// Build a stored category for this default
    pub fn to_category(&self, now: DateTime<Utc>) -> Category {
        Category {
            id: CategoryId::new(),
            name: self.name().to_string(),
            color: self.color().to_string(),
            created_at: now,
        }
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Category name too long ({} chars, max {})",
                len, MAX_CATEGORY_NAME_LEN
            ),
            Self::InvalidColor(c) => write!(f, "Invalid color '{}', expected #RRGGBB", c),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
