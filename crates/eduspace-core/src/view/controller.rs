// ── Generic list view controller ──
//
// One controller per entity kind. It owns the rows, the filter text,
// the department scope, the loading flag and any open modal, and it is
// the only place facade failures turn into notifications.
//
// Asynchronous work is split in three: a synchronous `begin_*` that
// moves the state machine and returns a ticket, the ticket's `run`
// which talks to the backend and can be spawned, and a synchronous
// `finish_*` that reconciles the result. Load tickets carry a request
// generation; a result whose generation is no longer current is dropped.

use std::sync::Arc;

use futures::future::try_join;
use tracing::{debug, warn};

use super::form::Form;
use super::resource::Resource;
use crate::backend::Backend;
use crate::context::AppContext;
use crate::error::CoreError;
use crate::filter;
use crate::join::{self, ViewRow};
use crate::model::{Department, Entity, EntityId};

// ── State ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit,
}

/// Observable state of a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Mounted, nothing fetched yet.
    Idle,
    Loading,
    Ready,
    ModalOpen(FormKind),
    ConfirmingDelete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(EntityId),
}

impl FormMode {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::Create => FormKind::Create,
            Self::Edit(_) => FormKind::Edit,
        }
    }
}

/// What is drawn on top of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay<E> {
    None,
    Form {
        mode: FormMode,
        form: Form,
        submitting: bool,
    },
    ConfirmDelete(ViewRow<E>),
}

// ── Tickets ─────────────────────────────────────────────────────────

/// A pending list fetch.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    department: Option<EntityId>,
}

/// Result of [`LoadTicket::run`], handed back to [`ViewController::finish_load`].
#[derive(Debug)]
pub struct Loaded<E> {
    generation: u64,
    result: Result<(Vec<E>, Vec<Department>), CoreError>,
}

impl LoadTicket {
    /// Fetch the records and, for affiliated kinds, the department list
    /// in parallel.
    pub async fn run<E: Resource, B: Backend>(self, backend: &B) -> Loaded<E> {
        let result = if E::JOINS_DEPARTMENTS {
            try_join(
                backend.list::<E>(self.department.as_ref()),
                backend.list::<Department>(None),
            )
            .await
        } else {
            backend
                .list::<E>(None)
                .await
                .map(|records| (records, Vec::new()))
        };
        Loaded {
            generation: self.generation,
            result,
        }
    }
}

#[derive(Debug, Clone)]
enum SubmitRequest<E: Entity> {
    Create(E::Create),
    Update(EntityId, E::Update),
}

/// A validated form submission.
#[derive(Debug, Clone)]
pub struct SubmitTicket<E: Entity> {
    epoch: u64,
    request: SubmitRequest<E>,
}

#[derive(Debug)]
pub struct Submitted<E> {
    epoch: u64,
    kind: FormKind,
    result: Result<E, CoreError>,
}

impl<E: Entity> SubmitTicket<E> {
    pub async fn run<B: Backend>(self, backend: &B) -> Submitted<E> {
        let (kind, result) = match self.request {
            SubmitRequest::Create(request) => (FormKind::Create, backend.create::<E>(request).await),
            SubmitRequest::Update(id, update) => {
                (FormKind::Edit, backend.update::<E>(&id, update).await)
            }
        };
        Submitted {
            epoch: self.epoch,
            kind,
            result,
        }
    }
}

/// A confirmed delete.
#[derive(Debug, Clone)]
pub struct DeleteTicket {
    epoch: u64,
    id: EntityId,
}

#[derive(Debug)]
pub struct Deleted {
    epoch: u64,
    result: Result<bool, CoreError>,
}

impl DeleteTicket {
    pub async fn run<E: Entity, B: Backend>(self, backend: &B) -> Deleted {
        Deleted {
            epoch: self.epoch,
            result: backend.delete::<E>(&self.id).await,
        }
    }
}

// ── Controller ──────────────────────────────────────────────────────

pub struct ViewController<E: Resource, B: Backend> {
    ctx: AppContext<B>,
    all_rows: Vec<ViewRow<E>>,
    rows: Vec<ViewRow<E>>,
    departments: Vec<Department>,
    query: String,
    department_scope: Option<EntityId>,
    overlay: Overlay<E>,
    /// A list fetch is in flight.
    fetching: bool,
    /// A submit or delete is in flight.
    mutating: bool,
    loaded: bool,
    /// Bumped by every load and by unmount.
    generation: u64,
    /// Bumped by unmount only; guards submit and delete results.
    epoch: u64,
}

impl<E: Resource, B: Backend> ViewController<E, B> {
    /// Notifications raised by this controller are tagged with `E::VIEW`.
    pub fn new(ctx: &AppContext<B>) -> Self {
        Self {
            ctx: ctx.for_view(E::VIEW),
            all_rows: Vec::new(),
            rows: Vec::new(),
            departments: Vec::new(),
            query: String::new(),
            department_scope: None,
            overlay: Overlay::None,
            fetching: false,
            mutating: false,
            loaded: false,
            generation: 0,
            epoch: 0,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn state(&self) -> ViewState {
        match &self.overlay {
            Overlay::Form {
                submitting: true, ..
            } => ViewState::Loading,
            Overlay::Form { mode, .. } => ViewState::ModalOpen(mode.kind()),
            Overlay::ConfirmDelete(_) => ViewState::ConfirmingDelete,
            Overlay::None if self.is_loading() => ViewState::Loading,
            Overlay::None if self.loaded => ViewState::Ready,
            Overlay::None => ViewState::Idle,
        }
    }

    /// Rows after the filter, as displayed.
    pub fn rows(&self) -> &[ViewRow<E>] {
        &self.rows
    }

    /// Departments fetched with the last load; options for the
    /// department select and the scope selector.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn department_scope(&self) -> Option<&EntityId> {
        self.department_scope.as_ref()
    }

    pub fn overlay(&self) -> &Overlay<E> {
        &self.overlay
    }

    pub fn is_loading(&self) -> bool {
        self.fetching || self.mutating
    }

    pub fn form(&self) -> Option<&Form> {
        match &self.overlay {
            Overlay::Form { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Editable form, unless a submission is in flight.
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.overlay {
            Overlay::Form {
                form,
                submitting: false,
                ..
            } => Some(form),
            _ => None,
        }
    }

    /// Prompt for the pending delete, if one is awaiting confirmation.
    pub fn confirm_prompt(&self) -> Option<String> {
        match &self.overlay {
            Overlay::ConfirmDelete(row) => Some(format!(
                "Are you sure you want to delete {}?",
                row.record.describe()
            )),
            _ => None,
        }
    }

    // ── Loading ──────────────────────────────────────────────────────

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.fetching = true;
        debug!(kind = %E::KIND, generation = self.generation, "load started");
        LoadTicket {
            generation: self.generation,
            department: self.department_scope.clone(),
        }
    }

    /// Apply a fetch result. Returns `false` when it was stale and dropped.
    pub fn finish_load(&mut self, loaded: Loaded<E>) -> bool {
        if loaded.generation != self.generation {
            debug!(
                kind = %E::KIND,
                got = loaded.generation,
                current = self.generation,
                "stale load discarded"
            );
            return false;
        }
        self.fetching = false;
        self.loaded = true;
        match loaded.result {
            Ok((records, departments)) => {
                self.all_rows = join::annotate(records, &departments);
                self.departments = departments;
                self.refilter();
            }
            Err(e) => {
                warn!(kind = %E::KIND, error = %e, "load failed");
                self.ctx
                    .notifier
                    .error(format!("Failed to load {}: {e}", E::KIND.plural()));
            }
        }
        true
    }

    /// Change the filter text. Rows are re-filtered at once and a reload
    /// is started.
    pub fn set_query(&mut self, query: impl Into<String>) -> LoadTicket {
        self.query = query.into();
        self.refilter();
        self.begin_load()
    }

    /// Restrict an affiliated kind to one department; `None` or an empty
    /// id lists everything.
    pub fn set_department_scope(&mut self, department: Option<EntityId>) -> LoadTicket {
        self.department_scope = department.filter(|id| !id.is_empty());
        self.begin_load()
    }

    /// Step the scope through "all" and each known department, in order.
    pub fn cycle_department_scope(&mut self) -> LoadTicket {
        let next = match &self.department_scope {
            None => self.departments.first(),
            Some(current) => self
                .departments
                .iter()
                .skip_while(|d| &d.id != current)
                .nth(1),
        }
        .map(|d| d.id.clone());
        self.set_department_scope(next)
    }

    fn refilter(&mut self) {
        self.rows = filter::apply(&self.all_rows, &self.query);
    }

    // ── Create / edit ────────────────────────────────────────────────

    /// Open a blank form. Ignored while another overlay is open.
    pub fn open_create(&mut self) -> bool {
        if !matches!(self.overlay, Overlay::None) {
            return false;
        }
        self.overlay = Overlay::Form {
            mode: FormMode::Create,
            form: E::blank_form(),
            submitting: false,
        };
        true
    }

    /// Open a form pre-filled with the displayed record `id`.
    pub fn open_edit(&mut self, id: &EntityId) -> bool {
        if !matches!(self.overlay, Overlay::None) {
            return false;
        }
        let Some(row) = self.all_rows.iter().find(|r| r.record.id() == id) else {
            return false;
        };
        self.overlay = Overlay::Form {
            mode: FormMode::Edit(id.clone()),
            form: row.record.to_form(),
            submitting: false,
        };
        true
    }

    /// Close the form without any backend call. Refused mid-submission.
    pub fn cancel_modal(&mut self) -> bool {
        match self.overlay {
            Overlay::Form {
                submitting: false, ..
            } => {
                self.overlay = Overlay::None;
                true
            }
            _ => false,
        }
    }

    /// Validate the open form and mark it submitting.
    ///
    /// A blank required field raises an error notification and keeps the
    /// form open; no ticket is issued.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket<E>> {
        let Overlay::Form {
            mode,
            form,
            submitting,
        } = &mut self.overlay
        else {
            return None;
        };
        if *submitting {
            return None;
        }
        if let Some(missing) = form.first_missing(E::REQUIRED) {
            let err = CoreError::validation(format!("{missing} is required"));
            self.ctx.notifier.error(err.to_string());
            return None;
        }
        let request = match mode {
            FormMode::Create => SubmitRequest::Create(E::create_request(form)),
            FormMode::Edit(id) => SubmitRequest::Update(id.clone(), E::update_request(form)),
        };
        *submitting = true;
        self.mutating = true;
        Some(SubmitTicket {
            epoch: self.epoch,
            request,
        })
    }

    /// On success close the form, notify and start a full reload.
    /// On failure keep the form open and release loading.
    pub fn finish_submit(&mut self, submitted: Submitted<E>) -> Option<LoadTicket> {
        if submitted.epoch != self.epoch {
            return None;
        }
        match submitted.result {
            Ok(record) => {
                let verb = match submitted.kind {
                    FormKind::Create => "created",
                    FormKind::Edit => "updated",
                };
                debug!(kind = %E::KIND, id = %record.id(), verb, "submit succeeded");
                self.overlay = Overlay::None;
                self.mutating = false;
                self.ctx.notifier.success(format!("{} {verb}", E::KIND));
                Some(self.begin_load())
            }
            Err(e) => {
                warn!(kind = %E::KIND, error = %e, "submit failed");
                if let Overlay::Form { submitting, .. } = &mut self.overlay {
                    *submitting = false;
                }
                self.mutating = false;
                self.ctx.notifier.error(format!("Operation failed: {e}"));
                None
            }
        }
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Ask for confirmation before deleting the displayed record `id`.
    pub fn request_delete(&mut self, id: &EntityId) -> bool {
        if !matches!(self.overlay, Overlay::None) {
            return false;
        }
        let Some(row) = self.all_rows.iter().find(|r| r.record.id() == id) else {
            return false;
        };
        self.overlay = Overlay::ConfirmDelete(row.clone());
        true
    }

    pub fn cancel_delete(&mut self) -> bool {
        if matches!(self.overlay, Overlay::ConfirmDelete(_)) {
            self.overlay = Overlay::None;
            true
        } else {
            false
        }
    }

    pub fn confirm_delete(&mut self) -> Option<DeleteTicket> {
        let Overlay::ConfirmDelete(row) = &self.overlay else {
            return None;
        };
        let id = row.record.id().clone();
        self.overlay = Overlay::None;
        self.mutating = true;
        Some(DeleteTicket {
            epoch: self.epoch,
            id,
        })
    }

    /// On success notify and reload; on failure the list stays as it was.
    pub fn finish_delete(&mut self, deleted: Deleted) -> Option<LoadTicket> {
        if deleted.epoch != self.epoch {
            return None;
        }
        match deleted.result {
            Ok(_) => {
                self.mutating = false;
                self.ctx.notifier.success("Deleted successfully");
                Some(self.begin_load())
            }
            Err(e) => {
                warn!(kind = %E::KIND, error = %e, "delete failed");
                self.mutating = false;
                self.ctx.notifier.error(format!("Operation failed: {e}"));
                None
            }
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// The view left the screen: discard its state and make every
    /// in-flight result stale. A later mount starts from `Idle`.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.epoch += 1;
        self.fetching = false;
        self.mutating = false;
        self.loaded = false;
        self.overlay = Overlay::None;
        self.query.clear();
        self.department_scope = None;
        self.all_rows.clear();
        self.rows.clear();
        self.departments.clear();
    }

    // ── In-place drivers ─────────────────────────────────────────────

    /// Load and apply in one step.
    pub async fn reload(&mut self) {
        let ticket = self.begin_load();
        self.run_load(ticket).await;
    }

    /// Submit the open form and, on success, wait for the reload.
    pub async fn submit(&mut self) {
        let Some(ticket) = self.begin_submit() else {
            return;
        };
        let backend = Arc::clone(&self.ctx.backend);
        let submitted = ticket.run(backend.as_ref()).await;
        if let Some(reload) = self.finish_submit(submitted) {
            self.run_load(reload).await;
        }
    }

    /// Confirm the pending delete and, on success, wait for the reload.
    pub async fn confirm_delete_and_wait(&mut self) {
        let Some(ticket) = self.confirm_delete() else {
            return;
        };
        let backend = Arc::clone(&self.ctx.backend);
        let deleted = ticket.run::<E, B>(backend.as_ref()).await;
        if let Some(reload) = self.finish_delete(deleted) {
            self.run_load(reload).await;
        }
    }

    async fn run_load(&mut self, ticket: LoadTicket) {
        let backend = Arc::clone(&self.ctx.backend);
        let loaded = ticket.run::<E, B>(backend.as_ref()).await;
        self.finish_load(loaded);
    }
}
