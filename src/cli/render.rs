//! Terminal drawing of catalogs and form views as trees

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::application::{CategoryRow, FormView, SubcategoryRow};
use crate::domain::Catalog;

/// Check box and arrow glyphs.
#[derive(Debug, Clone, Copy)]
pub struct Glyphs {
    pub checked: &'static str,
    pub unchecked: &'static str,
    pub open: &'static str,
    pub closed: &'static str,
}

impl Glyphs {
    pub fn new(ascii: bool) -> Self {
        if ascii {
            Self {
                checked: "[x]",
                unchecked: "[ ]",
                open: "^",
                closed: "v",
            }
        } else {
            Self {
                checked: "☑",
                unchecked: "☐",
                open: "▲",
                closed: "▼",
            }
        }
    }

    fn check(&self, checked: bool) -> String {
        if checked {
            self.checked.green().to_string()
        } else {
            self.unchecked.to_string()
        }
    }

    fn arrow(&self, open: bool) -> String {
        if open {
            self.open.cyan().to_string()
        } else {
            self.closed.dimmed().to_string()
        }
    }
}

/// Draw the form: every category, the expanded one with its subcategories,
/// and the item list under the subcategory it belongs to.
pub fn form_tree(view: &FormView, glyphs: Glyphs) -> Tree<String> {
    let mut root = Tree::new("Categories".bold().to_string());
    for row in &view.categories {
        root.push(category_tree(row, glyphs));
    }
    root
}

fn category_tree(row: &CategoryRow, glyphs: Glyphs) -> Tree<String> {
    let name = if row.expanded {
        row.name.bold().to_string()
    } else {
        row.name.clone()
    };
    let mut node = Tree::new(format!(
        "{} {} {}",
        glyphs.check(row.checked),
        name,
        glyphs.arrow(row.expanded)
    ));

    let mut items_placed = false;
    for sub in &row.subcategories {
        let mut sub_node = subcategory_tree(sub, glyphs);
        if sub.expanded && !items_placed {
            sub_node.leaves.extend(row.items.iter().map(|i| Tree::new(i.clone())));
            items_placed = true;
        }
        node.push(sub_node);
    }
    if !items_placed {
        node.leaves.extend(row.items.iter().map(|i| Tree::new(i.clone())));
    }
    node
}

fn subcategory_tree(row: &SubcategoryRow, glyphs: Glyphs) -> Tree<String> {
    Tree::new(format!(
        "{} {} {}",
        glyphs.check(row.checked),
        row.name,
        glyphs.arrow(row.expanded)
    ))
}

/// The read-only echo of the selection.
pub fn selection_line(labels: &[String]) -> String {
    if labels.is_empty() {
        format!("{} {}", "subjects selected:".bold(), "(none)".dimmed())
    } else {
        format!("{} {}", "subjects selected:".bold(), labels.iter().join(", "))
    }
}

/// Draw a whole catalog, every level open.
pub fn catalog_tree(catalog: &Catalog) -> Tree<String> {
    let mut root = Tree::new(format!("{} categories", catalog.len()).bold().to_string());
    for category in catalog.iter() {
        let mut node = Tree::new(format!("{} {}", category.name, format!("#{}", category.id).dimmed()));
        for sub in &category.subcategories {
            node.push(Tree::new(sub.name.clone()).with_leaves(sub.items.iter().cloned()));
        }
        root.push(node);
    }
    root
}
