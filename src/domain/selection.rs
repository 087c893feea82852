//! Selection state machine.
//!
//! States: collapsed, category expanded, category + subcategory expanded.
//! The controller holds at most one expanded category (by id) and an
//! ordered list of checked entries. Every operation either applies fully or
//! returns a `DomainError` without touching state.
//!
//! Two modes share the transitions and differ in their bookkeeping:
//!
//! - [`SelectionMode::Legacy`]: the item list always follows the first
//!   subcategory of the working copy (index 0, or the one narrowed to by a
//!   check); unchecking a category leaves subcategory labels in place;
//!   labels may repeat and are removed by string. The item-list flag
//!   survives category checks and arrow expand/collapse and is cleared only
//!   by an uncheck or a reset.
//! - [`SelectionMode::Explicit`]: the expanded subcategory is tracked by
//!   name; unchecking a category also drops its subcategory entries;
//!   entries are keyed and never duplicated. Every expansion of a category
//!   starts with the item list hidden.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::{Catalog, Category, CategoryId, SelectedEntry, SelectionKey, Subcategory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Explicit,
    Legacy,
}

/// What is currently drilled into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expansion {
    #[default]
    Collapsed,
    Expanded {
        category: CategoryId,
        /// Narrowed-to (legacy) or explicitly expanded (explicit) subcategory
        focus: Option<String>,
    },
}

/// Coarse state of the form, derived from [`Expansion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormState {
    Collapsed,
    CategoryExpanded,
    SubcategoryExpanded,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    catalog: Catalog,
    mode: SelectionMode,
    expansion: Expansion,
    /// Item-list visibility flag
    items_visible: bool,
    selected: Vec<SelectedEntry>,
}

impl SelectionController {
    pub fn new(catalog: Catalog, mode: SelectionMode) -> Self {
        Self {
            catalog,
            mode,
            expansion: Expansion::Collapsed,
            items_visible: false,
            selected: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Replace the catalog. Selection state is kept as is; ids that no
    /// longer resolve simply read as empty.
    #[instrument(level = "debug", skip(self, catalog), fields(categories = catalog.len()))]
    pub fn load_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
    }

    #[instrument(level = "debug", skip(self))]
    pub fn toggle_category(&mut self, id: CategoryId, checked: bool) -> DomainResult<()> {
        let name = self.category(id)?.name.clone();

        if checked {
            self.expand(id);
            self.record(SelectionKey::Category(id), name);
        } else {
            self.expansion = Expansion::Collapsed;
            self.items_visible = false;
            match self.mode {
                SelectionMode::Legacy => self.selected.retain(|e| e.label != name),
                SelectionMode::Explicit => self.selected.retain(|e| e.key.category() != id),
            }
        }
        debug!(selected = self.selected.len(), "category toggled");
        Ok(())
    }

    /// Arrow affordance next to a category row: expand or collapse without
    /// touching the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn set_category_expanded(&mut self, id: CategoryId, expanded: bool) -> DomainResult<()> {
        self.category(id)?;
        if expanded {
            self.expand(id);
        } else {
            self.expansion = Expansion::Collapsed;
            if self.mode == SelectionMode::Explicit {
                self.items_visible = false;
            }
        }
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn toggle_subcategory(&mut self, name: &str, checked: bool) -> DomainResult<()> {
        let action = if checked {
            "check subcategory"
        } else {
            "uncheck subcategory"
        };
        let (category, subcategory) = self.expanded_subcategory(name, action)?;
        let category = category.id;
        let label = subcategory.name.clone();

        if checked {
            self.expansion = Expansion::Expanded {
                category,
                focus: Some(label.clone()),
            };
            self.items_visible = true;
            self.record(SelectionKey::Subcategory(category, label.clone()), label);
        } else {
            self.expansion = Expansion::Collapsed;
            self.items_visible = false;
            match self.mode {
                SelectionMode::Legacy => self.selected.retain(|e| e.label != label),
                SelectionMode::Explicit => {
                    let key = SelectionKey::Subcategory(category, label);
                    self.selected.retain(|e| e.key != key)
                }
            }
        }
        debug!(selected = self.selected.len(), "subcategory toggled");
        Ok(())
    }

    /// Up/down affordance next to a subcategory row. Never changes the
    /// selection. In legacy mode `target` is ignored.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle_item_list_visibility(&mut self, target: &str, visible: bool) -> DomainResult<()> {
        const ACTION: &str = "toggle item list";
        if self.mode == SelectionMode::Explicit {
            self.expanded_subcategory(target, ACTION)?;
        }
        let Expansion::Expanded { focus, .. } = &mut self.expansion else {
            return Err(DomainError::NoExpandedCategory { action: ACTION });
        };

        match self.mode {
            SelectionMode::Legacy => self.items_visible = visible,
            SelectionMode::Explicit if visible => {
                *focus = Some(target.to_string());
                self.items_visible = true;
            }
            SelectionMode::Explicit => {
                if focus.as_deref() == Some(target) {
                    self.items_visible = false;
                }
            }
        }
        Ok(())
    }

    /// Clear expansion and selection.
    pub fn reset(&mut self) {
        self.expansion = Expansion::Collapsed;
        self.items_visible = false;
        self.selected.clear();
    }

    // ---- accessors ----

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn state(&self) -> FormState {
        match &self.expansion {
            Expansion::Collapsed => FormState::Collapsed,
            Expansion::Expanded { .. } if self.visible_subcategory().is_some() => {
                FormState::SubcategoryExpanded
            }
            Expansion::Expanded { .. } => FormState::CategoryExpanded,
        }
    }

    pub fn expanded_category(&self) -> Option<&Category> {
        match &self.expansion {
            Expansion::Expanded { category, .. } => self.catalog.get(*category),
            Expansion::Collapsed => None,
        }
    }

    pub fn is_category_expanded(&self, id: CategoryId) -> bool {
        matches!(&self.expansion, Expansion::Expanded { category, .. } if *category == id)
            && self.catalog.contains(id)
    }

    pub fn is_subcategory_expanded(&self, name: &str) -> bool {
        self.visible_subcategory().is_some_and(|s| s.name == name)
    }

    /// Items of the shown subcategory, empty when the list is hidden.
    pub fn current_item_list(&self) -> &[String] {
        self.visible_subcategory()
            .map(|s| s.items.as_slice())
            .unwrap_or(&[])
    }

    /// The subcategory the item list refers to, whether shown or not.
    ///
    /// Legacy: the first entry of the working copy, i.e. the narrowed
    /// subcategory or index 0 of the expanded category. Explicit: the
    /// focused subcategory only.
    pub fn focused_subcategory(&self) -> Option<&Subcategory> {
        let Expansion::Expanded { focus, .. } = &self.expansion else {
            return None;
        };
        let category = self.expanded_category()?;
        match (self.mode, focus) {
            (_, Some(name)) => category.subcategory(name),
            (SelectionMode::Legacy, None) => category.first_subcategory(),
            (SelectionMode::Explicit, None) => None,
        }
    }

    pub fn selected_labels(&self) -> Vec<&str> {
        self.selected.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn selected_entries(&self) -> &[SelectedEntry] {
        &self.selected
    }

    pub fn is_selected(&self, key: &SelectionKey) -> bool {
        self.selected.iter().any(|e| &e.key == key)
    }

    // ---- internals ----

    fn visible_subcategory(&self) -> Option<&Subcategory> {
        if self.items_visible {
            self.focused_subcategory()
        } else {
            None
        }
    }

    /// Expand `id` with the full subcategory list. Explicit mode hides the
    /// item list; legacy keeps the flag as it is.
    fn expand(&mut self, id: CategoryId) {
        self.expansion = Expansion::Expanded {
            category: id,
            focus: None,
        };
        if self.mode == SelectionMode::Explicit {
            self.items_visible = false;
        }
    }

    fn category(&self, id: CategoryId) -> DomainResult<&Category> {
        self.catalog
            .get(id)
            .ok_or_else(|| DomainError::UnknownCategory(id.to_string()))
    }

    fn expanded_subcategory(
        &self,
        name: &str,
        action: &'static str,
    ) -> DomainResult<(&Category, &Subcategory)> {
        let category = self
            .expanded_category()
            .ok_or(DomainError::NoExpandedCategory { action })?;
        let subcategory =
            category
                .subcategory(name)
                .ok_or_else(|| DomainError::UnknownSubcategory {
                    category: category.id,
                    name: name.to_string(),
                })?;
        Ok((category, subcategory))
    }

    fn record(&mut self, key: SelectionKey, label: String) {
        if self.mode == SelectionMode::Explicit && self.is_selected(&key) {
            return;
        }
        self.selected.push(SelectedEntry { key, label });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(mode: SelectionMode) -> SelectionController {
        SelectionController::new(Catalog::builtin(), mode)
    }

    #[test]
    fn given_fresh_controller_then_everything_is_collapsed() {
        let c = controller(SelectionMode::Explicit);
        assert_eq!(c.state(), FormState::Collapsed);
        assert!(c.selected_labels().is_empty());
        assert!(c.current_item_list().is_empty());
    }

    #[test]
    fn given_legacy_expanded_category_when_showing_items_then_lists_first_row() {
        let mut c = controller(SelectionMode::Legacy);
        c.set_category_expanded(CategoryId(10), true).unwrap();

        c.toggle_item_list_visibility("Sport", true).unwrap();

        assert_eq!(c.current_item_list()[0], "electrophysiology");
        assert!(c.is_subcategory_expanded("Cardiac"));
        assert!(!c.is_subcategory_expanded("Sport"));
    }

    #[test]
    fn given_explicit_expanded_category_when_showing_items_then_lists_that_row() {
        let mut c = controller(SelectionMode::Explicit);
        c.set_category_expanded(CategoryId(10), true).unwrap();

        c.toggle_item_list_visibility("Sport", true).unwrap();

        assert_eq!(c.current_item_list(), ["Sport1", "Sport2", "Sport3"]);
        assert!(c.is_subcategory_expanded("Sport"));
        assert_eq!(c.state(), FormState::SubcategoryExpanded);
    }

    #[test]
    fn given_failed_operation_then_state_is_unchanged() {
        let mut c = controller(SelectionMode::Explicit);
        c.toggle_category(CategoryId(10), true).unwrap();
        let before = (c.expansion().clone(), c.selected_entries().to_vec());

        let err = c.toggle_subcategory("Brain", true).unwrap_err();

        assert!(matches!(err, DomainError::UnknownSubcategory { .. }));
        assert_eq!((c.expansion().clone(), c.selected_entries().to_vec()), before);
    }
}
