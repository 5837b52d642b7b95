// ── Central data store ──
//
// One collection per entity kind plus the user accounts. Constructed
// explicitly and shared behind an `Arc`; there is no global instance.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use secrecy::{ExposeSecret, SecretString};
use tracing::trace;

use super::collection::EntityCollection;
use super::seed;
use crate::error::CoreError;
use crate::model::{Department, Entity, EntityId, Role, Student, Teacher, User};

struct Account {
    user: User,
    credential: SecretString,
}

/// Synchronous store for departments, students, teachers and users.
///
/// Thread-safe: reads and writes go through per-shard `DashMap` locks,
/// so concurrent tasks never wait on one another for long.
pub struct DataStore {
    pub(crate) departments: EntityCollection<Department>,
    pub(crate) students: EntityCollection<Student>,
    pub(crate) teachers: EntityCollection<Teacher>,
    /// Keyed by email, compared case-sensitively.
    accounts: DashMap<String, Account>,
}

impl DataStore {
    /// An empty store with no accounts.
    pub fn new() -> Self {
        Self {
            departments: EntityCollection::new(),
            students: EntityCollection::new(),
            teachers: EntityCollection::new(),
            accounts: DashMap::new(),
        }
    }

    /// A store holding the demo departments, people and admin account.
    pub fn seeded() -> Self {
        let store = Self::new();
        seed::populate(&store);
        store
    }

    // ── Entity operations ────────────────────────────────────────────

    /// Every record of kind `E`, in insertion order.
    ///
    /// A non-empty `department` keeps only records affiliated with it;
    /// kinds without a department reference ignore it.
    pub fn list<E: Entity>(&self, department: Option<&EntityId>) -> Vec<E> {
        let records = E::collection(self).snapshot();
        match department.filter(|id| !id.is_empty()) {
            Some(wanted) => records
                .into_iter()
                .filter(|record| record.department_id().is_none_or(|id| id == wanted))
                .collect(),
            None => records,
        }
    }

    pub fn get<E: Entity>(&self, id: &EntityId) -> Result<E, CoreError> {
        E::collection(self)
            .get(id)
            .ok_or_else(|| CoreError::not_found(E::KIND.to_string(), id.as_str()))
    }

    pub fn create<E: Entity>(&self, request: E::Create) -> E {
        let record = E::collection(self).create(request);
        trace!(kind = %E::KIND, id = %record.id(), "record created");
        record
    }

    pub fn update<E: Entity>(&self, id: &EntityId, update: E::Update) -> Result<E, CoreError> {
        E::collection(self)
            .update(id, update)
            .ok_or_else(|| CoreError::not_found(E::KIND.to_string(), id.as_str()))
    }

    /// Always succeeds; deleting an absent id is a no-op.
    pub fn delete<E: Entity>(&self, id: &EntityId) -> bool {
        let removed = E::collection(self).remove(id);
        trace!(kind = %E::KIND, %id, removed, "record deleted");
        true
    }

    pub fn count<E: Entity>(&self) -> usize {
        E::collection(self).len()
    }

    /// Seed helper: store `record` under its own id.
    pub(crate) fn insert<E: Entity>(&self, record: E) -> bool {
        E::collection(self).insert(record)
    }

    // ── Accounts ─────────────────────────────────────────────────────

    /// The user whose email and credential both match exactly.
    pub fn authenticate(&self, email: &str, credential: &SecretString) -> Result<User, CoreError> {
        let account = self.accounts.get(email).ok_or(CoreError::InvalidCredentials)?;
        if account.credential.expose_secret() == credential.expose_secret() {
            Ok(account.user.clone())
        } else {
            Err(CoreError::InvalidCredentials)
        }
    }

    /// Create a `user`-role account. Fails if the email is already registered.
    pub fn register(
        &self,
        name: &str,
        email: &str,
        credential: SecretString,
    ) -> Result<User, CoreError> {
        self.add_account(EntityId::generate(), name, email, Role::User, credential)
    }

    pub(crate) fn add_account(
        &self,
        id: EntityId,
        name: &str,
        email: &str,
        role: Role,
        credential: SecretString,
    ) -> Result<User, CoreError> {
        match self.accounts.entry(email.to_owned()) {
            Entry::Occupied(_) => Err(CoreError::DuplicateUser {
                email: email.to_owned(),
            }),
            Entry::Vacant(slot) => {
                let user = User {
                    id,
                    name: name.to_owned(),
                    email: email.to_owned(),
                    role,
                };
                slot.insert(Account {
                    user: user.clone(),
                    credential,
                });
                Ok(user)
            }
        }
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::requests::{CreateStudentRequest, UpdateStudentRequest};

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    fn student_request(dept: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            first_name: "Carol".into(),
            last_name: "White".into(),
            email: "carol@school.edu".into(),
            department_id: EntityId::from(dept),
            enrollment_date: "2024-01-15".into(),
        }
    }

    #[test]
    fn seeded_store_matches_demo_data() {
        let store = DataStore::seeded();
        assert_eq!(store.count::<Department>(), 3);
        assert_eq!(store.count::<Student>(), 2);
        assert_eq!(store.count::<Teacher>(), 2);

        let codes: Vec<String> = store
            .list::<Department>(None)
            .into_iter()
            .map(|d| d.code)
            .collect();
        assert_eq!(codes, ["CS", "MATH", "PHY"]);
    }

    #[test]
    fn create_then_get_returns_submitted_fields() {
        let store = DataStore::new();
        let created: Student = store.create(student_request("1"));
        let fetched: Student = store.get(&created.id).unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.first_name, "Carol");
        assert_eq!(fetched.enrollment_date, "2024-01-15");
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = DataStore::new();
        let err = store.get::<Teacher>(&EntityId::from("9")).unwrap_err();
        assert_eq!(err, CoreError::not_found("Teacher", "9"));
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = DataStore::new();
        let err = store
            .update::<Student>(&EntityId::from("9"), UpdateStudentRequest::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn list_scopes_by_department() {
        let store = DataStore::seeded();
        let maths: Vec<Student> = store.list(Some(&EntityId::from("2")));
        assert_eq!(maths.len(), 1);
        assert_eq!(maths[0].first_name, "Bob");

        let unscoped: Vec<Student> = store.list(Some(&EntityId::from("")));
        assert_eq!(unscoped.len(), 2);
    }

    #[test]
    fn department_lists_ignore_scope() {
        let store = DataStore::seeded();
        let all: Vec<Department> = store.list(Some(&EntityId::from("1")));
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn delete_is_idempotent() {
        let store = DataStore::new();
        let created: Student = store.create(student_request("1"));
        assert!(store.delete::<Student>(&created.id));
        assert!(store.delete::<Student>(&created.id));
        assert!(store.list::<Student>(None).is_empty());
    }

    #[test]
    fn deleting_a_department_leaves_its_students() {
        let store = DataStore::seeded();
        store.delete::<Department>(&EntityId::from("1"));
        let alice: Student = store.get(&EntityId::from("1")).unwrap();
        assert_eq!(alice.department_id, EntityId::from("1"));
    }

    #[test]
    fn demo_admin_authenticates() {
        let store = DataStore::seeded();
        let user = store
            .authenticate("admin@school.edu", &secret("password"))
            .unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.name, "Admin User");
    }

    #[test]
    fn wrong_credential_or_unknown_email_is_rejected() {
        let store = DataStore::seeded();
        assert_eq!(
            store.authenticate("admin@school.edu", &secret("nope")),
            Err(CoreError::InvalidCredentials)
        );
        assert_eq!(
            store.authenticate("ADMIN@school.edu", &secret("password")),
            Err(CoreError::InvalidCredentials)
        );
    }

    #[test]
    fn register_rejects_existing_email() {
        let store = DataStore::seeded();
        let err = store
            .register("Other", "admin@school.edu", secret("secret1"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateUser { .. }));
    }

    #[test]
    fn registered_user_can_log_in() {
        let store = DataStore::new();
        let user = store
            .register("Dana", "dana@school.edu", secret("hunter22"))
            .unwrap();
        assert_eq!(user.role, Role::User);
        let again = store
            .authenticate("dana@school.edu", &secret("hunter22"))
            .unwrap();
        assert_eq!(again, user);
    }
}
