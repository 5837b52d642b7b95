#![allow(clippy::unwrap_used)]

mod common;

use common::{FlakyBackend, Harness};
use eduspace_core::view::{FormKind, LoadTicket, Resource, ViewController, ViewState};
use eduspace_core::{
    Department, EntityId, Field, Severity, Student, Teacher, UNKNOWN_DEPARTMENT,
};
use pretty_assertions::assert_eq;

type Students = ViewController<Student, FlakyBackend>;
type Teachers = ViewController<Teacher, FlakyBackend>;
type Departments = ViewController<Department, FlakyBackend>;

/// Run a load ticket against the harness backend and apply the result.
async fn settle<E: Resource>(
    view: &mut ViewController<E, FlakyBackend>,
    ticket: LoadTicket,
    h: &Harness,
) -> bool {
    let loaded = ticket.run::<E, FlakyBackend>(h.backend.as_ref()).await;
    view.finish_load(loaded)
}

fn first_names(view: &Students) -> Vec<String> {
    view.rows()
        .iter()
        .map(|r| r.record.first_name.clone())
        .collect()
}

// ── Loading ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn mount_goes_idle_loading_ready() {
    let h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    assert_eq!(view.state(), ViewState::Idle);

    let ticket = view.begin_load();
    assert_eq!(view.state(), ViewState::Loading);

    assert!(settle(&mut view, ticket, &h).await);
    assert_eq!(view.state(), ViewState::Ready);
    assert_eq!(first_names(&view), ["Alice", "Bob"]);
    assert_eq!(view.departments().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn rows_carry_department_names() {
    let h = Harness::seeded();
    let mut view = Teachers::new(&h.ctx);
    view.reload().await;
    let departments: Vec<&str> = view
        .rows()
        .iter()
        .map(|r| r.cell(Field::Department))
        .collect();
    assert_eq!(departments, ["Computer Science", "Mathematics"]);
}

#[tokio::test(start_paused = true)]
async fn stale_load_is_discarded() {
    let h = Harness::seeded();
    let mut view = Students::new(&h.ctx);

    let old = view.begin_load();
    let old_result = old.run::<Student, _>(h.backend.as_ref()).await;

    h.backend.store().delete::<Student>(&EntityId::from("1"));
    let fresh = view.begin_load();
    let fresh_result = fresh.run::<Student, _>(h.backend.as_ref()).await;

    assert!(view.finish_load(fresh_result));
    assert!(!view.finish_load(old_result));
    assert_eq!(first_names(&view), ["Bob"]);
    assert_eq!(view.state(), ViewState::Ready);
}

#[tokio::test(start_paused = true)]
async fn failed_load_keeps_last_good_rows_and_notifies() {
    let mut h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    view.reload().await;

    h.backend.fail_reads(true);
    view.reload().await;
    assert_eq!(view.state(), ViewState::Ready);
    assert_eq!(first_names(&view), ["Alice", "Bob"]);
    assert_eq!(
        h.last_notification(),
        Some((
            Severity::Error,
            "Failed to load students: backend unavailable".into()
        ))
    );
}

#[tokio::test(start_paused = true)]
async fn failed_first_load_is_ready_and_empty() {
    let h = Harness::seeded();
    h.backend.fail_reads(true);
    let mut view = Departments::new(&h.ctx);
    view.reload().await;
    assert_eq!(view.state(), ViewState::Ready);
    assert!(view.rows().is_empty());
}

// ── Filtering and scope ─────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn query_filters_across_fields() {
    let h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    view.reload().await;

    let ticket = view.set_query("MATH");
    settle(&mut view, ticket, &h).await;
    assert_eq!(first_names(&view), ["Bob"]);

    let ticket = view.set_query("school.edu");
    settle(&mut view, ticket, &h).await;
    assert_eq!(first_names(&view), ["Alice", "Bob"]);

    let ticket = view.set_query("nobody");
    settle(&mut view, ticket, &h).await;
    assert!(view.rows().is_empty());
}

#[tokio::test(start_paused = true)]
async fn query_refilters_before_reload_lands() {
    let h = Harness::seeded();
    let mut view = Teachers::new(&h.ctx);
    view.reload().await;
    let _pending = view.set_query("calculus");
    assert_eq!(view.rows().len(), 1);
    assert_eq!(view.rows()[0].record.last_name, "Davis");
}

#[tokio::test(start_paused = true)]
async fn department_scope_narrows_the_list() {
    let h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    view.reload().await;

    let ticket = view.set_department_scope(Some(EntityId::from("1")));
    settle(&mut view, ticket, &h).await;
    assert_eq!(first_names(&view), ["Alice"]);
    assert_eq!(view.departments().len(), 3);

    let ticket = view.set_department_scope(Some(EntityId::from("")));
    assert!(view.department_scope().is_none());
    settle(&mut view, ticket, &h).await;
    assert_eq!(first_names(&view), ["Alice", "Bob"]);
}

#[tokio::test(start_paused = true)]
async fn scope_cycles_through_departments_and_back_to_all() {
    let h = Harness::seeded();
    let mut view = Teachers::new(&h.ctx);
    view.reload().await;

    let mut seen = Vec::new();
    for _ in 0..4 {
        let ticket = view.cycle_department_scope();
        seen.push(view.department_scope().map(ToString::to_string));
        settle(&mut view, ticket, &h).await;
    }
    assert_eq!(
        seen,
        [
            Some("1".to_owned()),
            Some("2".to_owned()),
            Some("3".to_owned()),
            None
        ]
    );
}

// ── Create / edit ───────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn create_closes_modal_notifies_and_reloads() {
    let mut h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    view.reload().await;

    assert!(view.open_create());
    assert_eq!(view.state(), ViewState::ModalOpen(FormKind::Create));
    let form = view.form_mut().unwrap();
    form.set(Field::FirstName, "Carol");
    form.set(Field::LastName, "White");
    form.set(Field::Email, "carol@school.edu");
    form.set(Field::Department, "3");
    form.set(Field::EnrollmentDate, "2024-09-01");

    view.submit().await;
    assert_eq!(view.state(), ViewState::Ready);
    assert_eq!(first_names(&view), ["Alice", "Bob", "Carol"]);
    assert_eq!(view.rows()[2].cell(Field::Department), "Physics");
    assert_eq!(
        h.last_notification(),
        Some((Severity::Success, "Student created".into()))
    );
}

#[tokio::test(start_paused = true)]
async fn missing_required_field_blocks_submit() {
    let mut h = Harness::seeded();
    let mut view = Departments::new(&h.ctx);
    view.reload().await;
    view.open_create();
    view.form_mut().unwrap().set(Field::Name, "History");

    assert!(view.begin_submit().is_none());
    assert_eq!(view.state(), ViewState::ModalOpen(FormKind::Create));
    assert_eq!(
        h.last_notification(),
        Some((Severity::Error, "Code is required".into()))
    );
    assert_eq!(h.backend.store().count::<Department>(), 3);
}

#[tokio::test(start_paused = true)]
async fn edit_prefills_exact_values_and_round_trips() {
    let h = Harness::seeded();
    let mut view = Teachers::new(&h.ctx);
    view.reload().await;
    let before: Teacher = h.backend.store().get(&EntityId::from("2")).unwrap();

    assert!(view.open_edit(&EntityId::from("2")));
    assert_eq!(view.state(), ViewState::ModalOpen(FormKind::Edit));
    let form = view.form().unwrap().clone();
    assert_eq!(form, before.to_form());
    assert_eq!(form.get(Field::FirstName), "Prof. Alan");
    assert_eq!(form.get(Field::Department), "2");

    view.submit().await;
    let after: Teacher = h.backend.store().get(&EntityId::from("2")).unwrap();
    assert_eq!(after, before);
}

#[tokio::test(start_paused = true)]
async fn failed_submit_keeps_modal_and_releases_loading() {
    let mut h = Harness::seeded();
    let mut view = Departments::new(&h.ctx);
    view.reload().await;
    view.open_edit(&EntityId::from("3"));
    view.form_mut().unwrap().set(Field::Name, "Applied Physics");

    h.backend.fail_writes(true);
    let ticket = view.begin_submit().unwrap();
    assert_eq!(view.state(), ViewState::Loading);
    assert!(!view.cancel_modal(), "cannot cancel mid-submission");

    let submitted = ticket.run(h.backend.as_ref()).await;
    assert!(view.finish_submit(submitted).is_none());
    assert_eq!(view.state(), ViewState::ModalOpen(FormKind::Edit));
    assert!(!view.is_loading());
    assert_eq!(view.form().unwrap().get(Field::Name), "Applied Physics");
    assert_eq!(
        h.last_notification(),
        Some((Severity::Error, "Operation failed: backend unavailable".into()))
    );
}

#[tokio::test(start_paused = true)]
async fn cancel_modal_makes_no_call() {
    let h = Harness::seeded();
    let mut view = Departments::new(&h.ctx);
    view.reload().await;
    view.open_create();
    view.form_mut().unwrap().set(Field::Name, "Draft");
    assert!(view.cancel_modal());
    assert_eq!(view.state(), ViewState::Ready);
    assert_eq!(h.backend.store().count::<Department>(), 3);
}

// ── Delete ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn delete_requires_confirmation() {
    let mut h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    view.reload().await;

    assert!(view.request_delete(&EntityId::from("2")));
    assert_eq!(view.state(), ViewState::ConfirmingDelete);
    assert_eq!(
        view.confirm_prompt().as_deref(),
        Some("Are you sure you want to delete Bob Johnson?")
    );

    view.confirm_delete_and_wait().await;
    assert_eq!(first_names(&view), ["Alice"]);
    assert_eq!(
        h.last_notification(),
        Some((Severity::Success, "Deleted successfully".into()))
    );
}

#[tokio::test(start_paused = true)]
async fn cancelled_delete_leaves_store_alone() {
    let h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    view.reload().await;
    view.request_delete(&EntityId::from("1"));
    assert!(view.cancel_delete());
    assert_eq!(view.state(), ViewState::Ready);
    assert!(view.confirm_delete().is_none());
    assert_eq!(h.backend.store().count::<Student>(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_delete_keeps_list() {
    let mut h = Harness::seeded();
    let mut view = Teachers::new(&h.ctx);
    view.reload().await;
    h.backend.fail_writes(true);

    view.request_delete(&EntityId::from("1"));
    view.confirm_delete_and_wait().await;
    assert_eq!(view.rows().len(), 2);
    assert_eq!(view.state(), ViewState::Ready);
    assert_eq!(
        h.last_notification().map(|(s, _)| s),
        Some(Severity::Error)
    );
}

#[tokio::test(start_paused = true)]
async fn failed_delete_leaves_a_pending_reload_loading() {
    let mut h = Harness::seeded();
    let mut view = Teachers::new(&h.ctx);
    view.reload().await;

    view.request_delete(&EntityId::from("1"));
    let delete = view.confirm_delete().unwrap();
    let reload = view.set_query("emily");
    h.backend.fail_writes(true);

    let deleted = delete.run::<Teacher, FlakyBackend>(h.backend.as_ref()).await;
    assert!(view.finish_delete(deleted).is_none());
    assert!(view.is_loading());
    assert_eq!(view.state(), ViewState::Loading);

    assert!(settle(&mut view, reload, &h).await);
    assert_eq!(view.state(), ViewState::Ready);
    assert_eq!(view.rows().len(), 1);
    assert_eq!(
        h.last_notification().map(|(s, _)| s),
        Some(Severity::Error)
    );
}

#[tokio::test(start_paused = true)]
async fn deleted_department_shows_unknown_on_next_load() {
    let h = Harness::seeded();
    let mut departments = Departments::new(&h.ctx);
    let mut students = Students::new(&h.ctx);
    departments.reload().await;
    students.reload().await;

    departments.request_delete(&EntityId::from("1"));
    departments.confirm_delete_and_wait().await;
    assert_eq!(departments.rows().len(), 2);

    students.reload().await;
    let alice = &students.rows()[0];
    assert_eq!(alice.record.first_name, "Alice");
    assert_eq!(alice.cell(Field::Department), UNKNOWN_DEPARTMENT);
}

// ── Lifecycle ───────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn unmount_drops_in_flight_results() {
    let mut h = Harness::seeded();
    let mut view = Students::new(&h.ctx);
    view.reload().await;
    view.open_create();
    let form = view.form_mut().unwrap();
    for (field, value) in [
        (Field::FirstName, "Dan"),
        (Field::LastName, "Brown"),
        (Field::Email, "dan@school.edu"),
        (Field::Department, "1"),
        (Field::EnrollmentDate, "2024-01-01"),
    ] {
        form.set(field, value);
    }
    let ticket = view.begin_submit().unwrap();
    view.unmount();
    assert_eq!(view.state(), ViewState::Idle);
    assert!(view.rows().is_empty());

    let submitted = ticket.run(h.backend.as_ref()).await;
    assert!(view.finish_submit(submitted).is_none());
    assert!(h.notifications().is_empty());
}
