//! Form service
//!
//! Drives a [`SelectionController`] with [`FormEvent`]s, resolving textual
//! targets against the catalog, and collects submissions.

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, FormView};
use crate::domain::{Catalog, FormEvent, SelectionController, SelectionMode, Submission};

/// Outcome of applying a batch of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    /// How many events were applied
    pub applied: usize,
    /// Submissions in the order `submit` events occurred
    pub submissions: Vec<Submission>,
}

pub struct FormService {
    controller: SelectionController,
}

impl FormService {
    pub fn new(catalog: Catalog, mode: SelectionMode) -> Self {
        Self {
            controller: SelectionController::new(catalog, mode),
        }
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    pub fn load_catalog(&mut self, catalog: Catalog) {
        self.controller.load_catalog(catalog);
    }

    /// Apply one event. Returns the submission for `submit`.
    #[instrument(level = "debug", skip(self), fields(event = %event))]
    pub fn apply(&mut self, event: &FormEvent) -> ApplicationResult<Option<Submission>> {
        let c = &mut self.controller;
        match event {
            FormEvent::CheckCategory(target) => {
                let id = c.catalog().resolve(target)?.id;
                c.toggle_category(id, true)?;
            }
            FormEvent::UncheckCategory(target) => {
                let id = c.catalog().resolve(target)?.id;
                c.toggle_category(id, false)?;
            }
            FormEvent::ExpandCategory(target) => {
                let id = c.catalog().resolve(target)?.id;
                c.set_category_expanded(id, true)?;
            }
            FormEvent::CollapseCategory(target) => {
                let id = c.catalog().resolve(target)?.id;
                c.set_category_expanded(id, false)?;
            }
            FormEvent::CheckSubcategory(name) => c.toggle_subcategory(name, true)?,
            FormEvent::UncheckSubcategory(name) => c.toggle_subcategory(name, false)?,
            FormEvent::ShowItems(name) => c.toggle_item_list_visibility(name, true)?,
            FormEvent::HideItems(name) => c.toggle_item_list_visibility(name, false)?,
            FormEvent::Reset => c.reset(),
            FormEvent::Submit => return Ok(Some(self.submit())),
        }
        Ok(None)
    }

    /// Apply events in order, stopping at the first failure.
    pub fn apply_all<'a, I>(&mut self, events: I) -> ApplicationResult<RunOutcome>
    where
        I: IntoIterator<Item = &'a FormEvent>,
    {
        let mut outcome = RunOutcome::default();
        for event in events {
            if let Some(submission) = self.apply(event)? {
                outcome.submissions.push(submission);
            }
            outcome.applied += 1;
        }
        debug!("applied {} events", outcome.applied);
        Ok(outcome)
    }

    /// Parse and apply a script of events.
    pub fn apply_script(&mut self, script: &str) -> ApplicationResult<RunOutcome> {
        let events = FormEvent::parse_script(script)?;
        self.apply_all(&events)
    }

    /// Hand the current selection to the submission collaborator.
    pub fn submit(&self) -> Submission {
        let submission = Submission {
            selected_categories: self
                .controller
                .selected_labels()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };
        info!(selected = ?submission.selected_categories, "form submitted");
        submission
    }

    pub fn view(&self) -> FormView {
        FormView::from_controller(&self.controller)
    }
}
