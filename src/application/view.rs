//! Render-ready snapshot of the form.
//!
//! Pure data derived from the controller accessors; the CLI draws it, JSON
//! output serializes it.

use serde::Serialize;

use crate::domain::{CategoryId, FormState, SelectionController, SelectionKey, SelectionMode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    pub mode: SelectionMode,
    pub state: FormState,
    pub categories: Vec<CategoryRow>,
    pub selected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow {
    pub id: CategoryId,
    pub name: String,
    pub checked: bool,
    pub expanded: bool,
    /// Only filled for the expanded row
    pub subcategories: Vec<SubcategoryRow>,
    /// Visible item list, only for the expanded row
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubcategoryRow {
    pub name: String,
    pub checked: bool,
    pub expanded: bool,
}

impl FormView {
    pub fn from_controller(controller: &SelectionController) -> Self {
        let categories = controller
            .catalog()
            .iter()
            .map(|category| {
                let expanded = controller.is_category_expanded(category.id);
                let subcategories = if expanded {
                    category
                        .subcategories
                        .iter()
                        .map(|sub| SubcategoryRow {
                            name: sub.name.clone(),
                            checked: controller.is_selected(&SelectionKey::Subcategory(
                                category.id,
                                sub.name.clone(),
                            )),
                            expanded: controller.is_subcategory_expanded(&sub.name),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                let items = if expanded {
                    controller.current_item_list().to_vec()
                } else {
                    Vec::new()
                };
                CategoryRow {
                    id: category.id,
                    name: category.name.clone(),
                    checked: controller.is_selected(&SelectionKey::Category(category.id)),
                    expanded,
                    subcategories,
                    items,
                }
            })
            .collect();

        Self {
            mode: controller.mode(),
            state: controller.state(),
            categories,
            selected: controller
                .selected_labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn expanded(&self) -> Option<&CategoryRow> {
        self.categories.iter().find(|c| c.expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Catalog;

    #[test]
    fn given_checked_subcategory_when_viewing_then_only_expanded_row_has_children() {
        let mut controller = SelectionController::new(Catalog::builtin(), SelectionMode::Explicit);
        controller.toggle_category(CategoryId(35), true).unwrap();
        controller.toggle_subcategory("Child", true).unwrap();

        let view = FormView::from_controller(&controller);

        let neurology = view.expanded().unwrap();
        assert_eq!(neurology.name, "Neurology");
        assert!(neurology.checked);
        assert_eq!(neurology.subcategories.len(), 3);
        assert!(neurology.subcategories[1].checked);
        assert!(neurology.subcategories[1].expanded);
        assert_eq!(neurology.items[0], "Neuromuscular1");

        let internal = &view.categories[0];
        assert!(!internal.expanded);
        assert!(internal.subcategories.is_empty());
        assert_eq!(view.selected, vec!["Neurology", "Child"]);
        assert_eq!(view.state, FormState::SubcategoryExpanded);
    }
}
