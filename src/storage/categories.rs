//! Category repository
//!
//! Manages the `categories` collection

use chrono::{DateTime, Utc};

use crate::audit::EntityType;
use crate::models::{Category, CategoryId, CategoryPatch, NewCategory};

use super::kv::StorageKey;
use super::repository::{Record, Repository};

pub type CategoryRepository = Repository<Category>;

impl Record for Category {
    type Id = CategoryId;
    type New = NewCategory;
    type Patch = CategoryPatch;

    const KEY: StorageKey = StorageKey::Categories;
    const ENTITY: EntityType = EntityType::Category;

    fn id(&self) -> CategoryId {
        self.id
    }

    fn from_new(new: NewCategory, id: CategoryId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            color: new.color,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: CategoryPatch, _now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Repository<Category> {
    /// First category with this name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<Category> {
        let name = name.trim().to_lowercase();
        self.find(|c| c.name.to_lowercase() == name)
    }
}
