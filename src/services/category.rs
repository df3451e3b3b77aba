//! Category service
//!
//! Any signed-in user can read categories; only admins change them.
//! Deleting a category leaves its expenses in place, and reports show them
//! under "Unknown".

use std::collections::HashMap;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::category::{validate_color, validate_name, CATEGORY_PALETTE};
use crate::models::{Category, CategoryId, CategoryPatch, NewCategory, User};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// All categories in insertion order
    pub fn list(&self) -> Vec<Category> {
        self.storage.categories.get_all()
    }

    /// Categories keyed by ID, for joining against expenses
    pub fn lookup(&self) -> HashMap<CategoryId, Category> {
        self.list().into_iter().map(|c| (c.id, c)).collect()
    }

    /// Create a category
    ///
    /// Without an explicit color the next palette color is used, rotating by
    /// the current number of categories.
    pub fn create(&self, actor: &User, name: &str, color: Option<&str>) -> ExpenseResult<Category> {
        require_admin(actor)?;

        let name = name.trim();
        validate_name(name).map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let color = match color {
            Some(c) => c.trim().to_uppercase(),
            None => self.next_palette_color().to_string(),
        };
        validate_color(&color).map_err(|e| ExpenseError::Validation(e.to_string()))?;

        let category = self.storage.categories.add(NewCategory::new(name, color));
        tracing::info!(name = %category.name, by = %actor.username, "category created");
        Ok(category)
    }

    /// Rename or recolor a category
    pub fn update(
        &self,
        actor: &User,
        identifier: &str,
        patch: CategoryPatch,
    ) -> ExpenseResult<Category> {
        require_admin(actor)?;

        let category = self.resolve(identifier)?;
        let patch = CategoryPatch {
            name: patch.name.map(|n| n.trim().to_string()),
            color: patch.color.map(|c| c.trim().to_uppercase()),
        };
        if let Some(name) = &patch.name {
            validate_name(name).map_err(|e| ExpenseError::Validation(e.to_string()))?;
        }
        if let Some(color) = &patch.color {
            validate_color(color).map_err(|e| ExpenseError::Validation(e.to_string()))?;
        }

        self.storage
            .categories
            .update(category.id, patch)
            .ok_or_else(|| ExpenseError::category_not_found(identifier))
    }

    /// Delete a category; its expenses are kept
    pub fn delete(&self, actor: &User, identifier: &str) -> ExpenseResult<Category> {
        require_admin(actor)?;

        let category = self.resolve(identifier)?;
        self.storage.categories.delete(category.id);

        let orphaned = self.storage.expenses.by_category(category.id).len();
        tracing::info!(
            name = %category.name,
            orphaned_expenses = orphaned,
            by = %actor.username,
            "category deleted"
        );
        Ok(category)
    }

    /// Find a category by name (case-insensitive) or ID
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.find_by_name(identifier) {
            return Ok(Some(category));
        }

        let mut matches = self.storage.categories.find_matching(identifier);
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            _ => Err(ExpenseError::Validation(format!(
                "'{}' matches more than one category; use more characters of the ID",
                identifier
            ))),
        }
    }

    /// Like [`find`](Self::find), but a missing category is an error
    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Category> {
        self.find(identifier)?
            .ok_or_else(|| ExpenseError::category_not_found(identifier))
    }

    fn next_palette_color(&self) -> &'static str {
        CATEGORY_PALETTE[self.storage.categories.count() % CATEGORY_PALETTE.len()]
    }
}

fn require_admin(actor: &User) -> ExpenseResult<()> {
    if actor.role.is_admin() {
        Ok(())
    } else {
        Err(ExpenseError::PermissionDenied(
            "only administrators can manage categories".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewExpense, Role, UserId};
    use chrono::{NaiveDate, Utc};

    fn user(role: Role) -> User {
        User {
            id: UserId::new(),
            name: "Tester".into(),
            username: "tester".into(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_rotates_palette() {
        let storage = Storage::in_memory();
        let service = CategoryService::new(&storage);
        let admin = user(Role::Admin);

        let first = service.create(&admin, "Kopi", None).unwrap();
        let second = service.create(&admin, "Teh", None).unwrap();
        assert_eq!(first.color, CATEGORY_PALETTE[0]);
        assert_eq!(second.color, CATEGORY_PALETTE[1]);

        let custom = service.create(&admin, "Susu", Some("#abcdef")).unwrap();
        assert_eq!(custom.color, "#ABCDEF");
    }

    #[test]
    fn test_create_validates() {
        let storage = Storage::in_memory();
        let service = CategoryService::new(&storage);
        let admin = user(Role::Admin);

        assert!(service.create(&admin, "  ", None).unwrap_err().is_validation());
        assert!(service
            .create(&admin, "Kopi", Some("red"))
            .unwrap_err()
            .is_validation());
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_non_admin_cannot_modify() {
        let storage = Storage::in_memory();
        let service = CategoryService::new(&storage);
        let admin = user(Role::Admin);
        let member = user(Role::User);
        service.create(&admin, "Kopi", None).unwrap();

        assert!(service
            .create(&member, "Teh", None)
            .unwrap_err()
            .is_permission_denied());
        assert!(service
            .delete(&member, "Kopi")
            .unwrap_err()
            .is_permission_denied());
        assert_eq!(service.list().len(), 1);
    }

    #[test]
    fn test_delete_keeps_expenses() {
        let storage = Storage::in_memory();
        let service = CategoryService::new(&storage);
        let admin = user(Role::Admin);
        let kopi = service.create(&admin, "Kopi", None).unwrap();
        storage.expenses.add(NewExpense {
            title: "Espresso".into(),
            amount: Money::from_units(20_000),
            category_id: kopi.id,
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            notes: None,
            user_id: admin.id,
        });

        service.delete(&admin, "kopi").unwrap();
        assert!(service.list().is_empty());
        assert_eq!(storage.expenses.count(), 1);
    }

    #[test]
    fn test_update_and_resolve() {
        let storage = Storage::in_memory();
        let service = CategoryService::new(&storage);
        let admin = user(Role::Admin);
        let kopi = service.create(&admin, "Kopi", None).unwrap();

        let renamed = service
            .update(
                &admin,
                &kopi.id.to_string(),
                CategoryPatch {
                    name: Some(" Kafe ".into()),
                    color: None,
                },
            )
            .unwrap();
        assert_eq!(renamed.name, "Kafe");
        assert_eq!(renamed.color, kopi.color);
        assert!(service.resolve("Kopi").unwrap_err().is_not_found());
        assert_eq!(service.lookup().len(), 1);
    }
}
