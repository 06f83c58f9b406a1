//! Category and Subcategory models
//!
//! Categories are the top-level grouping shown with a display color; each
//! holds an ordered list of subcategories, which are what expenses point at.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, SubcategoryId};

/// Palette new categories draw their color from, in order
pub const CATEGORY_PALETTE: &[&str] = &[
    "#10B981", "#3B82F6", "#F59E0B", "#EF4444", "#8B5CF6", "#EC4899", "#14B8A6", "#F97316",
    "#6366F1", "#84CC16",
];

/// Pick the palette color for the `index`-th category
pub fn palette_color(index: usize) -> &'static str {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// A top-level expense grouping (e.g., "Food", "Transport")
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// Display color as a hex string
    pub color: String,

    /// Subcategories owned by this category, in display order
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// Create a new category with no subcategories
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            color: color.into(),
            subcategories: Vec::new(),
        }
    }

    /// Find one of this category's subcategories
    pub fn subcategory(&self, id: &SubcategoryId) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| &s.id == id)
    }

    /// Whether this category holds the given subcategory
    pub fn owns(&self, id: &SubcategoryId) -> bool {
        self.subcategory(id).is_some()
    }

    /// Validate name, color and subcategory names, ignoring back-references
    ///
    /// Back-references are repairable on load and import, everything checked
    /// here is not.
    pub fn validate_fields(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        self.subcategories.iter().try_for_each(Subcategory::validate)
    }

    /// Validate the category, including every subcategory's back-reference
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        self.validate_fields()?;

        for sub in &self.subcategories {
            if sub.category_id != self.id {
                return Err(CategoryValidationError::WrongOwner {
                    subcategory: sub.id.to_string(),
                    category: self.id.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A named grouping within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subcategory {
    /// Unique identifier
    pub id: SubcategoryId,

    /// Display name
    pub name: String,

    /// The category this subcategory belongs to
    pub category_id: CategoryId,
}

impl Subcategory {
    /// Create a new subcategory owned by `category_id`
    pub fn new(name: impl Into<String>, category_id: CategoryId) -> Self {
        Self {
            id: SubcategoryId::new(),
            name: name.into(),
            category_id,
        }
    }

    /// Validate the subcategory
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)
    }
}

impl fmt::Display for Subcategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    Ok(())
}

fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (1..=8).contains(&hex.len()) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validation errors for categories and subcategories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    InvalidColor(String),
    WrongOwner {
        subcategory: String,
        category: String,
    },
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::InvalidColor(color) => write!(f, "Invalid color: {}", color),
            Self::WrongOwner {
                subcategory,
                category,
            } => write!(
                f,
                "Subcategory {} is held by category {} but points elsewhere",
                subcategory, category
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
