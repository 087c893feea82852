//! Static category catalog backed by a generational arena.
//!
//! Categories live in the arena; the catalog keeps their insertion order and
//! an id lookup. The selection controller only ever holds `CategoryId`s and
//! resolves them here, so nothing outside the catalog owns a category.

use std::collections::{HashMap, HashSet};

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::{Category, CategoryId, Subcategory};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    arena: Arena<Category>,
    order: Vec<Index>,
    by_id: HashMap<CategoryId, Index>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids, duplicate category names
    /// and duplicate subcategory names within one category.
    #[instrument(level = "debug", skip(categories), fields(count = categories.len()))]
    pub fn new(categories: Vec<Category>) -> DomainResult<Self> {
        validate(&categories)?;
        Ok(Self::from_validated(categories))
    }

    pub fn empty() -> Self {
        Self::default()
    }

    fn from_validated(categories: Vec<Category>) -> Self {
        let mut arena = Arena::with_capacity(categories.len());
        let mut order = Vec::with_capacity(categories.len());
        let mut by_id = HashMap::with_capacity(categories.len());
        for category in categories {
            let id = category.id;
            let idx = arena.insert(category);
            order.push(idx);
            by_id.insert(id, idx);
        }
        Self {
            arena,
            order,
            by_id,
        }
    }

    /// The training data set the form ships with.
    pub fn builtin() -> Self {
        Self::from_validated(vec![
            Category::new(10, "internal medecine")
                .with_subcategory(Subcategory::new(
                    "Cardiac",
                    ["electrophysiology", "Critical care", "pacemaker"],
                ))
                .with_subcategory(Subcategory::new(
                    "Rheume",
                    ["Rheumatology1", "Rheumatology2", "Rheumatology3"],
                ))
                .with_subcategory(Subcategory::new("Sport", ["Sport1", "Sport2", "Sport3"])),
            Category::new(35, "Neurology")
                .with_subcategory(Subcategory::new(
                    "Brain",
                    ["Hospice1", "Hospice2", "Hospice3"],
                ))
                .with_subcategory(Subcategory::new(
                    "Child",
                    ["Neuromuscular1", "Neuromuscular2", "Neuromuscular3"],
                ))
                .with_subcategory(Subcategory::new(
                    "Sleep",
                    ["Vascular1", "Vascular2", "Vascular3"],
                )),
        ])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.by_id.get(&id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Categories in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Category> + '_ {
        self.order.iter().filter_map(move |&idx| self.arena.get(idx))
    }

    /// Resolve a user-supplied target: a numeric id first, then an exact name.
    pub fn resolve(&self, target: &str) -> DomainResult<&Category> {
        let target = target.trim();
        if let Ok(raw) = target.parse::<u32>() {
            if let Some(category) = self.get(CategoryId(raw)) {
                return Ok(category);
            }
        }
        self.iter()
            .find(|c| c.name == target)
            .ok_or_else(|| DomainError::UnknownCategory(target.to_string()))
    }

    /// Owned copy of the categories in order (for export).
    pub fn to_vec(&self) -> Vec<Category> {
        self.iter().cloned().collect()
    }

    pub fn subcategory_count(&self) -> usize {
        self.iter().map(|c| c.subcategories.len()).sum()
    }
}

fn validate(categories: &[Category]) -> DomainResult<()> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for category in categories {
        if !ids.insert(category.id) {
            return Err(DomainError::DuplicateCategoryId(category.id));
        }
        if !names.insert(category.name.as_str()) {
            return Err(DomainError::DuplicateCategoryName(category.name.clone()));
        }
        let mut sub_names = HashSet::new();
        for sub in &category.subcategories {
            if !sub_names.insert(sub.name.as_str()) {
                return Err(DomainError::DuplicateSubcategory {
                    category: category.id,
                    name: sub.name.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_builtin_catalog_when_iterating_then_keeps_source_order() {
        let catalog = Catalog::builtin();
        let names: Vec<_> = catalog.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["internal medecine", "Neurology"]);
        assert_eq!(catalog.subcategory_count(), 6);
    }

    #[test]
    fn given_target_when_resolving_then_accepts_id_or_name() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.resolve("35").unwrap().name, "Neurology");
        assert_eq!(catalog.resolve("internal medecine").unwrap().id, CategoryId(10));
        assert_eq!(
            catalog.resolve("Surgery").unwrap_err(),
            DomainError::UnknownCategory("Surgery".into())
        );
    }

    #[test]
    fn given_numeric_name_when_no_such_id_then_falls_back_to_name() {
        let catalog = Catalog::new(vec![Category::new(1, "2024")]).unwrap();
        assert_eq!(catalog.resolve("2024").unwrap().id, CategoryId(1));
    }

    #[test]
    fn given_duplicate_ids_when_building_then_rejects() {
        let result = Catalog::new(vec![Category::new(1, "a"), Category::new(1, "b")]);
        assert_eq!(result.unwrap_err(), DomainError::DuplicateCategoryId(CategoryId(1)));
    }

    #[test]
    fn given_duplicate_subcategory_when_building_then_rejects() {
        let category = Category::new(1, "a")
            .with_subcategory(Subcategory::new("x", ["1"]))
            .with_subcategory(Subcategory::new("x", ["2"]));
        let result = Catalog::new(vec![category]);
        assert!(matches!(
            result,
            Err(DomainError::DuplicateSubcategory { .. })
        ));
    }

    #[test]
    fn given_same_subcategory_name_in_two_categories_when_building_then_accepts() {
        let first = Category::new(1, "a").with_subcategory(Subcategory::new("x", ["1"]));
        let second = Category::new(2, "b").with_subcategory(Subcategory::new("x", ["2"]));
        assert!(Catalog::new(vec![first, second]).is_ok());
    }
}
