// Shared fixtures for controller tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eduspace_core::notify::{self, NotificationCenter};
use eduspace_core::{
    AppContext, Backend, CoreError, DataStore, Entity, EntityId, LatencyConfig, MemoryBackend,
    Severity, User,
};
use secrecy::SecretString;

/// In-memory backend whose mutating calls (or every call) can be made to fail.
pub struct FlakyBackend {
    inner: MemoryBackend,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl FlakyBackend {
    pub fn new(store: Arc<DataStore>) -> Self {
        Self {
            inner: MemoryBackend::new(store, LatencyConfig::none()),
            fail_writes: AtomicBool::new(false),
            fail_reads: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn store(&self) -> &Arc<DataStore> {
        self.inner.store()
    }

    fn check(flag: &AtomicBool) -> Result<(), CoreError> {
        if flag.load(Ordering::SeqCst) {
            Err(CoreError::operation("backend unavailable"))
        } else {
            Ok(())
        }
    }
}

impl Backend for FlakyBackend {
    async fn login(&self, email: &str, credential: &SecretString) -> Result<User, CoreError> {
        self.inner.login(email, credential).await
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        credential: &SecretString,
    ) -> Result<User, CoreError> {
        self.inner.register(name, email, credential).await
    }

    async fn list<E: Entity>(&self, department: Option<&EntityId>) -> Result<Vec<E>, CoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.list(department).await
    }

    async fn get<E: Entity>(&self, id: &EntityId) -> Result<E, CoreError> {
        Self::check(&self.fail_reads)?;
        self.inner.get(id).await
    }

    async fn create<E: Entity>(&self, request: E::Create) -> Result<E, CoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.create(request).await
    }

    async fn update<E: Entity>(&self, id: &EntityId, update: E::Update) -> Result<E, CoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.update(id, update).await
    }

    async fn delete<E: Entity>(&self, id: &EntityId) -> Result<bool, CoreError> {
        Self::check(&self.fail_writes)?;
        self.inner.delete::<E>(id).await
    }
}

pub struct Harness {
    pub backend: Arc<FlakyBackend>,
    pub ctx: AppContext<FlakyBackend>,
    pub center: NotificationCenter,
}

impl Harness {
    pub fn seeded() -> Self {
        Self::with_store(DataStore::seeded())
    }

    pub fn with_store(store: DataStore) -> Self {
        let backend = Arc::new(FlakyBackend::new(Arc::new(store)));
        let (notifier, center) = notify::channel(Duration::from_secs(5));
        let ctx = AppContext::new(Arc::clone(&backend), notifier);
        Self {
            backend,
            ctx,
            center,
        }
    }

    /// Every message received so far, with its severity.
    pub fn notifications(&mut self) -> Vec<(Severity, String)> {
        self.center.tick();
        self.center
            .visible()
            .map(|n| (n.severity, n.message.clone()))
            .collect()
    }

    pub fn last_notification(&mut self) -> Option<(Severity, String)> {
        self.notifications().pop()
    }
}
