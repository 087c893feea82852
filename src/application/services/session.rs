//! Interactive session service
//!
//! Offers the actions that make sense in the current form state through the
//! [`Selector`] seam, applies the picked one, and repeats until the user
//! cancels or quits.

use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::services::FormService;
use crate::application::{ApplicationError, ApplicationResult, FormView};
use crate::domain::{FormEvent, SelectionController, SelectionKey, Submission};
use crate::infrastructure::traits::{SelectionItem, Selector};

/// Value of the selection item that ends the session.
pub const QUIT: &str = "quit";

pub struct SessionService {
    selector: Arc<dyn Selector>,
    prompt: String,
}

impl SessionService {
    pub fn new(selector: Arc<dyn Selector>, prompt: impl Into<String>) -> Self {
        Self {
            selector,
            prompt: prompt.into(),
        }
    }

    /// Actions available in the current state, in display order.
    pub fn available_actions(controller: &SelectionController) -> Vec<SelectionItem> {
        let mut actions = Vec::new();
        let mut push = |event: FormEvent, display: String| {
            actions.push(SelectionItem {
                display,
                value: event.to_string(),
            })
        };

        for category in controller.catalog().iter() {
            let target = category.id.to_string();
            if controller.is_selected(&SelectionKey::Category(category.id)) {
                push(
                    FormEvent::UncheckCategory(target.clone()),
                    format!("uncheck      {}", category.name),
                );
            } else {
                push(
                    FormEvent::CheckCategory(target.clone()),
                    format!("check        {}", category.name),
                );
            }

            if !controller.is_category_expanded(category.id) {
                push(
                    FormEvent::ExpandCategory(target),
                    format!("expand       {}", category.name),
                );
                continue;
            }
            push(
                FormEvent::CollapseCategory(target),
                format!("collapse     {}", category.name),
            );

            for sub in &category.subcategories {
                let key = SelectionKey::Subcategory(category.id, sub.name.clone());
                if controller.is_selected(&key) {
                    push(
                        FormEvent::UncheckSubcategory(sub.name.clone()),
                        format!("  uncheck    {}", sub.name),
                    );
                } else {
                    push(
                        FormEvent::CheckSubcategory(sub.name.clone()),
                        format!("  check      {}", sub.name),
                    );
                }
                if controller.is_subcategory_expanded(&sub.name) {
                    push(
                        FormEvent::HideItems(sub.name.clone()),
                        format!("  hide       {}", sub.name),
                    );
                } else {
                    push(
                        FormEvent::ShowItems(sub.name.clone()),
                        format!("  show       {}", sub.name),
                    );
                }
            }
        }

        push(FormEvent::Submit, "submit".to_string());
        push(FormEvent::Reset, "reset".to_string());
        actions.push(SelectionItem {
            display: QUIT.to_string(),
            value: QUIT.to_string(),
        });
        actions
    }

    /// Run until cancel or quit. `on_change` is called after every applied
    /// action with the new view and the submission, if one was made.
    #[instrument(level = "debug", skip_all)]
    pub fn run<F>(&self, form: &mut FormService, mut on_change: F) -> ApplicationResult<Vec<Submission>>
    where
        F: FnMut(&FormView, Option<&Submission>),
    {
        let mut submissions = Vec::new();
        loop {
            let actions = Self::available_actions(form.controller());
            let picked = self
                .selector
                .select_one(&actions, &self.prompt)
                .map_err(|message| ApplicationError::OperationFailed {
                    context: "interactive selection".to_string(),
                    source: message.into(),
                })?;

            let Some(picked) = picked else {
                debug!("selection cancelled");
                break;
            };
            if picked.value == QUIT {
                break;
            }

            let event: FormEvent = picked.value.parse()?;
            let submission = form.apply(&event)?;
            on_change(&form.view(), submission.as_ref());
            submissions.extend(submission);
        }
        Ok(submissions)
    }
}
