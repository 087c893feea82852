//! Tests for FormService: events in, views and submissions out

use medus::application::services::FormService;
use medus::application::ApplicationError;
use medus::domain::{Catalog, DomainError, FormEvent, FormState, SelectionMode, Submission};
use medus::util::testing;

fn service(mode: SelectionMode) -> FormService {
    testing::init_test_setup();
    FormService::new(Catalog::builtin(), mode)
}

#[test]
fn given_script_with_submits_when_applying_then_collects_each_snapshot() {
    // Arrange
    let mut form = service(SelectionMode::Explicit);
    let script = r#"
# pick internal medicine, then cardiac
check internal medecine
check-sub Cardiac
submit

uncheck 10
submit
"#;

    // Act
    let outcome = form.apply_script(script).unwrap();

    // Assert
    assert_eq!(outcome.applied, 5);
    assert_eq!(
        outcome.submissions,
        vec![
            Submission {
                selected_categories: vec!["internal medecine".into(), "Cardiac".into()]
            },
            Submission {
                selected_categories: vec![]
            },
        ]
    );
    assert_eq!(form.view().state, FormState::Collapsed);
}

#[test]
fn given_same_script_in_legacy_mode_then_subcategory_survives_category_uncheck() {
    let mut form = service(SelectionMode::Legacy);

    let outcome = form
        .apply_script("check 10\ncheck-sub Cardiac\nuncheck 10\nsubmit\n")
        .unwrap();

    assert_eq!(
        outcome.submissions[0].selected_categories,
        vec!["Cardiac".to_string()]
    );
}

#[test]
fn given_category_targets_when_applying_then_id_and_name_are_equivalent() {
    let mut by_id = service(SelectionMode::Explicit);
    let mut by_name = service(SelectionMode::Explicit);

    by_id.apply(&FormEvent::CheckCategory("35".into())).unwrap();
    by_name
        .apply(&FormEvent::CheckCategory("Neurology".into()))
        .unwrap();

    assert_eq!(by_id.view(), by_name.view());
}

#[test]
fn given_failing_event_when_applying_batch_then_stops_and_reports_domain_error() {
    let mut form = service(SelectionMode::Explicit);
    let events = vec![
        FormEvent::CheckCategory("10".into()),
        FormEvent::CheckSubcategory("Brain".into()),
        FormEvent::Submit,
    ];

    let err = form.apply_all(&events).unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::UnknownSubcategory { .. })
    ));
    assert_eq!(
        form.controller().selected_labels(),
        vec!["internal medecine"]
    );
}

#[test]
fn given_malformed_script_when_applying_then_nothing_is_applied() {
    let mut form = service(SelectionMode::Explicit);

    let err = form.apply_script("check 10\n\ntoggle 35\n").unwrap_err();

    assert!(matches!(
        err,
        ApplicationError::Domain(DomainError::InvalidEvent { line: 3, .. })
    ));
    assert!(form.controller().selected_labels().is_empty());
}

#[test]
fn given_show_and_hide_events_when_applying_then_selection_is_unchanged() {
    let mut form = service(SelectionMode::Explicit);

    form.apply_script("expand Neurology\nshow Brain\n").unwrap();
    let shown = form.view();
    assert_eq!(shown.expanded().unwrap().items[0], "Hospice1");
    assert!(shown.selected.is_empty());

    form.apply_script("hide Brain\ncollapse 35\n").unwrap();
    assert_eq!(form.view().state, FormState::Collapsed);
}

#[test]
fn given_reset_event_when_applying_then_form_is_cleared() {
    let mut form = service(SelectionMode::Legacy);

    let outcome = form
        .apply_script("check 10\ncheck 35\nreset\nsubmit\n")
        .unwrap();

    assert!(outcome.submissions[0].selected_categories.is_empty());
}
