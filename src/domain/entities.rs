//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a category within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u32);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CategoryId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Top-level taxonomy node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            subcategories: Vec::new(),
        }
    }

    /// Builder-style append of a subcategory.
    pub fn with_subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategories.push(subcategory);
        self
    }

    /// Look up a subcategory by name.
    pub fn subcategory(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.name == name)
    }

    /// First subcategory in catalog order, if any.
    pub fn first_subcategory(&self) -> Option<&Subcategory> {
        self.subcategories.first()
    }
}

/// Second-level taxonomy node: a name and its ordered item labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub name: String,
    #[serde(default)]
    pub items: Vec<String>,
}

impl Subcategory {
    pub fn new<I, S>(name: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Identity of something the user has checked.
///
/// Subcategory names are only unique within their parent, so the key
/// carries the owning category.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    Category(CategoryId),
    Subcategory(CategoryId, String),
}

impl SelectionKey {
    /// The category this key belongs to (itself, or the parent).
    pub fn category(&self) -> CategoryId {
        match self {
            SelectionKey::Category(id) => *id,
            SelectionKey::Subcategory(id, _) => *id,
        }
    }
}

/// One checked entry in click order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedEntry {
    pub key: SelectionKey,
    /// Display label echoed back to the user
    pub label: String,
}

/// Payload handed to the submission collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub selected_categories: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_category_with_subcategories_when_looking_up_then_finds_by_name() {
        let category = Category::new(10, "internal medecine")
            .with_subcategory(Subcategory::new("Cardiac", ["pacemaker"]))
            .with_subcategory(Subcategory::new("Rheume", ["Rheumatology1"]));

        assert_eq!(category.subcategory("Rheume").map(|s| s.items.len()), Some(1));
        assert!(category.subcategory("Sport").is_none());
        assert_eq!(
            category.first_subcategory().map(|s| s.name.as_str()),
            Some("Cardiac")
        );
    }

    #[test]
    fn given_subcategory_key_when_asking_category_then_returns_parent() {
        let key = SelectionKey::Subcategory(CategoryId(35), "Brain".into());
        assert_eq!(key.category(), CategoryId(35));
    }

    #[test]
    fn given_submission_when_serializing_then_uses_form_field_name() {
        let submission = Submission {
            selected_categories: vec!["Neurology".into()],
        };
        let json = serde_json::to_string(&submission).unwrap();
        assert_eq!(json, r#"{"selectedCategories":["Neurology"]}"#);
    }
}
