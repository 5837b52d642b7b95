// ── Demo records ──

use secrecy::SecretString;
use tracing::debug;

use super::DataStore;
use crate::model::{Department, EntityId, Role, Student, Teacher};

pub(super) fn populate(store: &DataStore) {
    let departments = [
        ("1", "Computer Science", "CS", "Software and Hardware engineering"),
        ("2", "Mathematics", "MATH", "Pure and Applied Mathematics"),
        ("3", "Physics", "PHY", "Study of matter and energy"),
    ];
    for (id, name, code, description) in departments {
        store.insert(Department {
            id: EntityId::from(id),
            name: name.into(),
            code: code.into(),
            description: description.into(),
        });
    }

    let students = [
        ("1", "Alice", "Smith", "alice@school.edu", "1"),
        ("2", "Bob", "Johnson", "bob@school.edu", "2"),
    ];
    for (id, first, last, email, dept) in students {
        store.insert(Student {
            id: EntityId::from(id),
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            department_id: EntityId::from(dept),
            enrollment_date: "2023-09-01".into(),
        });
    }

    let teachers = [
        ("1", "Dr. Emily", "Brown", "emily@school.edu", "1", "AI"),
        ("2", "Prof. Alan", "Davis", "alan@school.edu", "2", "Calculus"),
    ];
    for (id, first, last, email, dept, specialization) in teachers {
        store.insert(Teacher {
            id: EntityId::from(id),
            first_name: first.into(),
            last_name: last.into(),
            email: email.into(),
            department_id: EntityId::from(dept),
            specialization: specialization.into(),
        });
    }

    // A fresh store cannot already hold this email.
    let _ = store.add_account(
        EntityId::from("u1"),
        "Admin User",
        "admin@school.edu",
        Role::Admin,
        SecretString::from("password".to_owned()),
    );

    debug!("demo data seeded");
}
