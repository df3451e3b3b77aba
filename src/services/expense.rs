//! Expense service
//!
//! Every signed-in user sees every expense. Changing or deleting one is
//! limited to its owner and to admins. Amounts must be positive, dates may
//! not lie in the future, and the category must exist when it is set.

use chrono::{Local, NaiveDate};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::expense::validate_fields;
use crate::models::{CategoryId, Expense, ExpenseId, ExpensePatch, Money, NewExpense, User};
use crate::storage::Storage;

/// Fields for recording an expense
#[derive(Debug, Clone)]
pub struct ExpenseInput {
    pub title: String,
    pub amount: Money,
    pub category_id: CategoryId,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
    today: NaiveDate,
}

impl<'a> ExpenseService<'a> {
    /// Service validating dates against the local calendar date
    pub fn new(storage: &'a Storage) -> Self {
        Self::with_today(storage, Local::now().date_naive())
    }

    pub fn with_today(storage: &'a Storage, today: NaiveDate) -> Self {
        Self { storage, today }
    }

    /// Record an expense owned by `actor`
    pub fn create(&self, actor: &User, input: ExpenseInput) -> ExpenseResult<Expense> {
        let title = input.title.trim().to_string();
        validate_fields(&title, input.amount, input.date, self.today)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        self.ensure_category(input.category_id)?;

        let expense = self.storage.expenses.add(NewExpense {
            title,
            amount: input.amount,
            category_id: input.category_id,
            date: input.date,
            notes: normalize_notes(input.notes),
            user_id: actor.id,
        });

        tracing::info!(id = %expense.id, amount = %expense.amount, by = %actor.username, "expense recorded");
        Ok(expense)
    }

    /// Edit an expense
    ///
    /// The merged record is validated before anything is written.
    pub fn update(&self, actor: &User, id: ExpenseId, patch: ExpensePatch) -> ExpenseResult<Expense> {
        let existing = self.get_editable(actor, id)?;

        let patch = ExpensePatch {
            title: patch.title.map(|t| t.trim().to_string()),
            notes: patch.notes.map(normalize_notes),
            ..patch
        };

        let title = patch.title.as_deref().unwrap_or(existing.title.as_str());
        let amount = patch.amount.unwrap_or(existing.amount);
        let date = patch.date.unwrap_or(existing.date);
        validate_fields(title, amount, date, self.today)
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        if let Some(category_id) = patch.category_id {
            self.ensure_category(category_id)?;
        }

        self.storage
            .expenses
            .update(id, patch)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    /// Delete an expense
    pub fn delete(&self, actor: &User, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self.get_editable(actor, id)?;
        self.storage.expenses.delete(id);
        tracing::info!(id = %id, by = %actor.username, "expense deleted");
        Ok(expense)
    }

    pub fn get(&self, id: ExpenseId) -> Option<Expense> {
        self.storage.expenses.get(id)
    }

    /// All expenses, unsorted
    pub fn list(&self) -> Vec<Expense> {
        self.storage.expenses.get_all()
    }

    /// Find an expense by full or shortened ID
    pub fn resolve(&self, identifier: &str) -> ExpenseResult<Expense> {
        let mut matches = self.storage.expenses.find_matching(identifier);
        match matches.len() {
            0 => Err(ExpenseError::expense_not_found(identifier)),
            1 => Ok(matches.remove(0)),
            _ => Err(ExpenseError::Validation(format!(
                "'{}' matches more than one expense; use more characters of the ID",
                identifier
            ))),
        }
    }

    /// Whether `actor` may change `expense`
    pub fn can_edit(actor: &User, expense: &Expense) -> bool {
        actor.role.is_admin() || expense.is_owned_by(actor.id)
    }

    fn get_editable(&self, actor: &User, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .get(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        if !Self::can_edit(actor, &expense) {
            return Err(ExpenseError::PermissionDenied(
                "only the owner or an administrator can change this expense".into(),
            ));
        }
        Ok(expense)
    }

    fn ensure_category(&self, category_id: CategoryId) -> ExpenseResult<()> {
        if self.storage.categories.get(category_id).is_none() {
            return Err(ExpenseError::category_not_found(category_id.to_string()));
        }
        Ok(())
    }
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, NewCategory, Role, UserId};
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn user(username: &str, role: Role) -> User {
        User {
            id: UserId::new(),
            name: username.into(),
            username: username.into(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    fn setup() -> (Storage, Category) {
        let storage = Storage::in_memory();
        let food = storage
            .categories
            .add(NewCategory::new("Makanan & Minuman", "#FF6384"));
        (storage, food)
    }

    fn input(category_id: CategoryId) -> ExpenseInput {
        ExpenseInput {
            title: " Bakso ".into(),
            amount: Money::from_units(15_000),
            category_id,
            date: today(),
            notes: Some("  ".into()),
        }
    }

    #[test]
    fn test_create_assigns_owner() {
        let (storage, food) = setup();
        let service = ExpenseService::with_today(&storage, today());
        let budi = user("budi", Role::User);

        let expense = service.create(&budi, input(food.id)).unwrap();
        assert_eq!(expense.user_id, budi.id);
        assert_eq!(expense.title, "Bakso");
        assert_eq!(expense.notes, None);
    }

    #[test]
    fn test_create_rejects_invalid_fields() {
        let (storage, food) = setup();
        let service = ExpenseService::with_today(&storage, today());
        let budi = user("budi", Role::User);

        let mut zero = input(food.id);
        zero.amount = Money::zero();
        assert!(service.create(&budi, zero).unwrap_err().is_validation());

        let mut future = input(food.id);
        future.date = today().succ_opt().unwrap();
        assert!(service.create(&budi, future).unwrap_err().is_validation());

        let mut untitled = input(food.id);
        untitled.title = "   ".into();
        assert!(service.create(&budi, untitled).unwrap_err().is_validation());

        assert!(service
            .create(&budi, input(CategoryId::new()))
            .unwrap_err()
            .is_not_found());

        assert!(service.list().is_empty());
    }

    #[test]
    fn test_create_rejects_oversized_amount() {
        let (storage, food) = setup();
        let service = ExpenseService::with_today(&storage, today());
        let budi = user("budi", Role::User);

        let mut huge = input(food.id);
        huge.amount = Money::parse("90000000000000000").unwrap();
        let err = service.create(&budi, huge).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("exceeds the maximum"));
        assert!(service.list().is_empty());
    }

    #[test]
    fn test_owner_or_admin_may_edit() {
        let (storage, food) = setup();
        let service = ExpenseService::with_today(&storage, today());
        let budi = user("budi", Role::User);
        let sari = user("sari", Role::User);
        let admin = user("admin", Role::Admin);
        let expense = service.create(&budi, input(food.id)).unwrap();

        let patch = ExpensePatch {
            amount: Some(Money::from_units(20_000)),
            ..Default::default()
        };
        assert!(service
            .update(&sari, expense.id, patch.clone())
            .unwrap_err()
            .is_permission_denied());
        assert!(service
            .delete(&sari, expense.id)
            .unwrap_err()
            .is_permission_denied());

        let edited = service.update(&budi, expense.id, patch).unwrap();
        assert_eq!(edited.amount, Money::from_units(20_000));
        assert_eq!(edited.user_id, budi.id);

        service.delete(&admin, expense.id).unwrap();
        assert!(service.get(expense.id).is_none());
    }

    #[test]
    fn test_update_validates_merged_record() {
        let (storage, food) = setup();
        let service = ExpenseService::with_today(&storage, today());
        let budi = user("budi", Role::User);
        let expense = service.create(&budi, input(food.id)).unwrap();

        let bad = ExpensePatch {
            amount: Some(Money::from_minor(-100)),
            ..Default::default()
        };
        assert!(service.update(&budi, expense.id, bad).unwrap_err().is_validation());

        let missing_category = ExpensePatch {
            category_id: Some(CategoryId::new()),
            ..Default::default()
        };
        assert!(service
            .update(&budi, expense.id, missing_category)
            .unwrap_err()
            .is_not_found());

        assert_eq!(service.get(expense.id).unwrap(), expense);
    }

    #[test]
    fn test_update_unknown_expense() {
        let (storage, _) = setup();
        let service = ExpenseService::with_today(&storage, today());
        let admin = user("admin", Role::Admin);

        let err = service
            .update(&admin, ExpenseId::new(), ExpensePatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_resolve_short_id() {
        let (storage, food) = setup();
        let service = ExpenseService::with_today(&storage, today());
        let budi = user("budi", Role::User);
        let expense = service.create(&budi, input(food.id)).unwrap();

        assert_eq!(service.resolve(&expense.id.to_string()).unwrap(), expense);
        assert!(service.resolve("exp-zzzz").unwrap_err().is_not_found());
    }
}
