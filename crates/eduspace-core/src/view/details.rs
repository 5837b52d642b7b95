// ── Teacher detail view ──
//
// One teacher, the name of their department, and the students who
// share that department. All three fetches run in parallel; a failure
// reports `Missing` so the caller can fall back to the teacher list.

use futures::future::try_join3;
use tracing::{debug, warn};

use crate::backend::Backend;
use crate::context::AppContext;
use crate::error::CoreError;
use crate::join::DepartmentIndex;
use crate::model::{Department, EntityId, Student, Teacher};

/// Everything the detail view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherProfile {
    pub teacher: Teacher,
    pub department_name: String,
    /// Students in the teacher's department, in insertion order.
    pub students: Vec<Student>,
}

#[derive(Debug, Clone)]
pub struct DetailsTicket {
    generation: u64,
    id: EntityId,
}

#[derive(Debug)]
pub struct DetailsLoaded {
    generation: u64,
    result: Result<TeacherProfile, CoreError>,
}

impl DetailsTicket {
    pub async fn run<B: Backend>(self, backend: &B) -> DetailsLoaded {
        let result = try_join3(
            backend.get::<Teacher>(&self.id),
            backend.list::<Department>(None),
            backend.list::<Student>(None),
        )
        .await
        .map(|(teacher, departments, students)| {
            let department_name = DepartmentIndex::new(&departments)
                .name_of(&teacher.department_id)
                .to_owned();
            let students = students
                .into_iter()
                .filter(|s| s.department_id == teacher.department_id)
                .collect();
            TeacherProfile {
                teacher,
                department_name,
                students,
            }
        });
        DetailsLoaded {
            generation: self.generation,
            result,
        }
    }
}

/// What a finished load means for navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsOutcome {
    Shown,
    /// The teacher could not be fetched; leave the detail view.
    Missing,
    Stale,
}

pub struct TeacherDetails<B: Backend> {
    ctx: AppContext<B>,
    profile: Option<TeacherProfile>,
    loading: bool,
    generation: u64,
}

impl<B: Backend> TeacherDetails<B> {
    pub fn new(ctx: &AppContext<B>) -> Self {
        Self {
            // Untagged: a failed fetch unmounts this view right away.
            ctx: ctx.clone(),
            profile: None,
            loading: false,
            generation: 0,
        }
    }

    pub fn profile(&self) -> Option<&TeacherProfile> {
        self.profile.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start loading teacher `id`, clearing whatever was shown before.
    pub fn begin_load(&mut self, id: EntityId) -> DetailsTicket {
        self.generation += 1;
        self.loading = true;
        self.profile = None;
        debug!(%id, generation = self.generation, "teacher details requested");
        DetailsTicket {
            generation: self.generation,
            id,
        }
    }

    pub fn finish_load(&mut self, loaded: DetailsLoaded) -> DetailsOutcome {
        if loaded.generation != self.generation {
            return DetailsOutcome::Stale;
        }
        self.loading = false;
        match loaded.result {
            Ok(profile) => {
                self.profile = Some(profile);
                DetailsOutcome::Shown
            }
            Err(e) => {
                warn!(error = %e, "teacher details failed");
                self.ctx
                    .notifier
                    .error(format!("Failed to load teacher: {e}"));
                DetailsOutcome::Missing
            }
        }
    }

    pub fn unmount(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.profile = None;
    }

    /// Load and apply in one step.
    pub async fn load(&mut self, id: EntityId) -> DetailsOutcome {
        let ticket = self.begin_load(id);
        let backend = std::sync::Arc::clone(&self.ctx.backend);
        let loaded = ticket.run(backend.as_ref()).await;
        self.finish_load(loaded)
    }
}
