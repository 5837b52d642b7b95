use futures::future::try_join3;
use tracing::warn;

use crate::backend::Backend;
use crate::context::AppContext;
use crate::error::CoreError;
use crate::model::{Department, Student, Teacher};
use crate::navigation::ViewKind;

/// Record totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub departments: usize,
    pub students: usize,
    pub teachers: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CountsTicket {
    generation: u64,
}

#[derive(Debug)]
pub struct CountsLoaded {
    generation: u64,
    result: Result<Counts, CoreError>,
}

impl CountsTicket {
    pub async fn run<B: Backend>(self, backend: &B) -> CountsLoaded {
        let result = try_join3(
            backend.list::<Department>(None),
            backend.list::<Student>(None),
            backend.list::<Teacher>(None),
        )
        .await
        .map(|(departments, students, teachers)| Counts {
            departments: departments.len(),
            students: students.len(),
            teachers: teachers.len(),
        });
        CountsLoaded {
            generation: self.generation,
            result,
        }
    }
}

pub struct Dashboard<B: Backend> {
    ctx: AppContext<B>,
    counts: Option<Counts>,
    loading: bool,
    generation: u64,
}

impl<B: Backend> Dashboard<B> {
    pub fn new(ctx: &AppContext<B>) -> Self {
        Self {
            ctx: ctx.for_view(ViewKind::Dashboard),
            counts: None,
            loading: false,
            generation: 0,
        }
    }

    /// `None` until the first load lands.
    pub fn counts(&self) -> Option<Counts> {
        self.counts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin_load(&mut self) -> CountsTicket {
        self.generation += 1;
        self.loading = true;
        CountsTicket {
            generation: self.generation,
        }
    }

    pub fn finish_load(&mut self, loaded: CountsLoaded) -> bool {
        if loaded.generation != self.generation {
            return false;
        }
        self.loading = false;
        match loaded.result {
            Ok(counts) => self.counts = Some(counts),
            Err(e) => {
                warn!(error = %e, "dashboard counts failed");
                self.ctx
                    .notifier
                    .error(format!("Failed to load dashboard: {e}"));
            }
        }
        true
    }

    pub fn unmount(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.counts = None;
    }

    pub async fn reload(&mut self) {
        let ticket = self.begin_load();
        let backend = std::sync::Arc::clone(&self.ctx.backend);
        let loaded = ticket.run(backend.as_ref()).await;
        self.finish_load(loaded);
    }
}
