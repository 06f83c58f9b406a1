//! Default data
//!
//! The category set a fresh tracker starts with, and the seed used whenever
//! the persisted categories are missing or unreadable.

use crate::models::{Category, CategoryId, Subcategory, SubcategoryId};

/// Default categories with their starter subcategories
pub fn default_categories() -> Vec<Category> {
    vec![
        seed_category(
            "1",
            "Food",
            "#10B981",
            &[("1-1", "Groceries"), ("1-2", "Restaurant"), ("1-3", "Drinks")],
        ),
        seed_category(
            "2",
            "Transport",
            "#3B82F6",
            &[
                ("2-1", "Fuel"),
                ("2-2", "Maintenance"),
                ("2-3", "Public Transport"),
            ],
        ),
    ]
}

fn seed_category(id: &str, name: &str, color: &str, subs: &[(&str, &str)]) -> Category {
    let category_id = CategoryId::from(id);
    Category {
        id: category_id.clone(),
        name: name.to_string(),
        color: color.to_string(),
        subcategories: subs
            .iter()
            .map(|(sub_id, sub_name)| Subcategory {
                id: SubcategoryId::from(*sub_id),
                name: sub_name.to_string(),
                category_id: category_id.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_shape() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults[0].id.as_str(), "1");
        assert_eq!(defaults[0].subcategories.len(), 3);
        assert_eq!(defaults[1].subcategories[2].name, "Public Transport");
    }

    #[test]
    fn test_default_seed_is_valid() {
        for category in default_categories() {
            assert!(category.validate().is_ok(), "{} is invalid", category.name);
        }
    }
}
