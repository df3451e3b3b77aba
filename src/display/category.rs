//! Category display formatting

use crate::models::Category;

/// Format categories as a table
pub fn format_category_list(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("{:12} {:30} {}\n", "ID", "Name", "Color"));
    output.push_str(&"-".repeat(52));
    output.push('\n');

    for category in categories {
        output.push_str(&format!(
            "{:12} {:30} {}\n",
            category.id.to_string(),
            super::truncate(&category.name, 30),
            category.color
        ));
    }

    output
}
