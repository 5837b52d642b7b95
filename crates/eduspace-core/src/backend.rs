// ── Data access facade ──
//
// The only way controllers reach stored records. `Backend` is the seam
// tests replace with scripted implementations; `MemoryBackend` wraps a
// shared `DataStore` and resolves every call after an artificial delay.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;
use tracing::{debug, info, warn};

use crate::config::LatencyConfig;
use crate::error::CoreError;
use crate::model::{Entity, EntityId, User};
use crate::store::DataStore;

/// Asynchronous CRUD and auth surface over the record store.
///
/// Every method returns a `Send` future so callers can hand the work to
/// `tokio::spawn`.
pub trait Backend: Send + Sync + 'static {
    fn login(
        &self,
        email: &str,
        credential: &SecretString,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    fn register(
        &self,
        name: &str,
        email: &str,
        credential: &SecretString,
    ) -> impl Future<Output = Result<User, CoreError>> + Send;

    /// All records of kind `E`; a non-empty `department` narrows
    /// affiliated kinds to that department.
    fn list<E: Entity>(
        &self,
        department: Option<&EntityId>,
    ) -> impl Future<Output = Result<Vec<E>, CoreError>> + Send;

    fn get<E: Entity>(&self, id: &EntityId) -> impl Future<Output = Result<E, CoreError>> + Send;

    fn create<E: Entity>(
        &self,
        request: E::Create,
    ) -> impl Future<Output = Result<E, CoreError>> + Send;

    fn update<E: Entity>(
        &self,
        id: &EntityId,
        update: E::Update,
    ) -> impl Future<Output = Result<E, CoreError>> + Send;

    /// Idempotent: deleting an absent id still succeeds.
    fn delete<E: Entity>(&self, id: &EntityId)
    -> impl Future<Output = Result<bool, CoreError>> + Send;
}

// ── In-memory implementation ────────────────────────────────────────

/// [`Backend`] over a shared [`DataStore`] with simulated latency.
#[derive(Clone)]
pub struct MemoryBackend {
    store: Arc<DataStore>,
    latency: LatencyConfig,
}

impl MemoryBackend {
    pub fn new(store: Arc<DataStore>, latency: LatencyConfig) -> Self {
        Self { store, latency }
    }

    /// Direct access to the underlying store, bypassing latency.
    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

impl Backend for MemoryBackend {
    async fn login(&self, email: &str, credential: &SecretString) -> Result<User, CoreError> {
        pause(self.latency.auth).await;
        let result = self.store.authenticate(email, credential);
        match &result {
            Ok(user) => info!(email, role = %user.role, "login accepted"),
            Err(e) => warn!(email, error = %e, "login rejected"),
        }
        result
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        credential: &SecretString,
    ) -> Result<User, CoreError> {
        pause(self.latency.auth).await;
        let result = self.store.register(name, email, credential.clone());
        match &result {
            Ok(user) => info!(email, id = %user.id, "user registered"),
            Err(e) => warn!(email, error = %e, "registration rejected"),
        }
        result
    }

    async fn list<E: Entity>(&self, department: Option<&EntityId>) -> Result<Vec<E>, CoreError> {
        debug!(kind = %E::KIND, ?department, "list");
        pause(self.latency.read).await;
        Ok(self.store.list(department))
    }

    async fn get<E: Entity>(&self, id: &EntityId) -> Result<E, CoreError> {
        debug!(kind = %E::KIND, %id, "get");
        pause(self.latency.read).await;
        self.store.get(id)
    }

    async fn create<E: Entity>(&self, request: E::Create) -> Result<E, CoreError> {
        debug!(kind = %E::KIND, "create");
        pause(self.latency.write).await;
        Ok(self.store.create(request))
    }

    async fn update<E: Entity>(&self, id: &EntityId, update: E::Update) -> Result<E, CoreError> {
        debug!(kind = %E::KIND, %id, "update");
        pause(self.latency.write).await;
        self.store.update(id, update)
    }

    async fn delete<E: Entity>(&self, id: &EntityId) -> Result<bool, CoreError> {
        debug!(kind = %E::KIND, %id, "delete");
        pause(self.latency.write).await;
        Ok(self.store.delete::<E>(id))
    }
}
