use eduspace_core::filter;
use eduspace_core::join::{DepartmentIndex, annotate};
use eduspace_core::{
    CreateStudentRequest, CreateTeacherRequest, DataStore, Department, EntityId, Field, Student,
    Teacher, UNKNOWN_DEPARTMENT, UpdateTeacherRequest,
};
use proptest::prelude::*;
use proptest::test_runner::Config;

fn text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .@-]{0,16}"
}

fn dept_id() -> impl Strategy<Value = String> {
    "[1-5]"
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn create_then_get_returns_submitted_fields(
        first_name in text(),
        last_name in text(),
        email in text(),
        department in dept_id(),
        enrollment_date in text(),
    ) {
        let store = DataStore::new();
        let request = CreateStudentRequest {
            first_name,
            last_name,
            email,
            department_id: EntityId::from(department),
            enrollment_date,
        };
        let created: Student = store.create(request.clone());
        let fetched: Student = store.get(&created.id).expect("just created");
        prop_assert_eq!(&fetched.id, &created.id);
        prop_assert_eq!(fetched.first_name, request.first_name);
        prop_assert_eq!(fetched.last_name, request.last_name);
        prop_assert_eq!(fetched.email, request.email);
        prop_assert_eq!(fetched.department_id, request.department_id);
        prop_assert_eq!(fetched.enrollment_date, request.enrollment_date);
    }

    #[test]
    fn update_leaves_absent_fields_untouched(
        email in proptest::option::of(text()),
        specialization in proptest::option::of(text()),
    ) {
        let store = DataStore::new();
        let created: Teacher = store.create(CreateTeacherRequest {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: "grace@school.edu".into(),
            department_id: EntityId::from("1"),
            specialization: "Compilers".into(),
        });
        let update = UpdateTeacherRequest {
            email: email.clone(),
            specialization: specialization.clone(),
            ..Default::default()
        };
        let updated: Teacher = store.update(&created.id, update).expect("exists");
        prop_assert_eq!(&updated.first_name, &created.first_name);
        prop_assert_eq!(&updated.last_name, &created.last_name);
        prop_assert_eq!(&updated.department_id, &created.department_id);
        prop_assert_eq!(updated.email, email.unwrap_or(created.email));
        prop_assert_eq!(updated.specialization, specialization.unwrap_or(created.specialization));
    }

    #[test]
    fn join_resolves_name_or_sentinel(
        known in proptest::collection::btree_set(dept_id(), 0..5),
        refs in proptest::collection::vec(dept_id(), 0..10),
    ) {
        let departments: Vec<Department> = known
            .iter()
            .map(|id| Department {
                id: EntityId::from(id.as_str()),
                name: format!("Dept {id}"),
                code: id.clone(),
                description: String::new(),
            })
            .collect();
        let students: Vec<Student> = refs
            .iter()
            .enumerate()
            .map(|(i, dept)| Student {
                id: EntityId::from(i.to_string()),
                first_name: "S".into(),
                last_name: i.to_string(),
                email: String::new(),
                department_id: EntityId::from(dept.as_str()),
                enrollment_date: String::new(),
            })
            .collect();

        let index = DepartmentIndex::new(&departments);
        let rows = annotate(students, &departments);
        prop_assert_eq!(rows.len(), refs.len());
        for (row, dept) in rows.iter().zip(&refs) {
            let expected = if known.contains(dept) {
                format!("Dept {dept}")
            } else {
                UNKNOWN_DEPARTMENT.to_owned()
            };
            prop_assert_eq!(row.cell(Field::Department), expected.as_str());
            prop_assert_eq!(index.name_of(&row.record.department_id), expected.as_str());
        }
    }

    #[test]
    fn filter_matches_iff_some_field_contains_query(
        values in proptest::collection::vec("[A-Za-z]{0,8}", 1..5),
        query in "[A-Za-z]{0,3}",
    ) {
        let expected = query.is_empty()
            || values
                .iter()
                .any(|v| v.to_lowercase().contains(&query.to_lowercase()));
        prop_assert_eq!(
            filter::matches(&query, values.iter().map(String::as_str)),
            expected
        );
    }

    #[test]
    fn delete_twice_then_list_is_empty(count in 0_usize..6) {
        let store = DataStore::new();
        let ids: Vec<EntityId> = (0..count)
            .map(|i| {
                let created: Student = store.create(CreateStudentRequest {
                    first_name: format!("S{i}"),
                    last_name: String::new(),
                    email: String::new(),
                    department_id: EntityId::from("1"),
                    enrollment_date: String::new(),
                });
                created.id
            })
            .collect();
        for id in &ids {
            prop_assert!(store.delete::<Student>(id));
            prop_assert!(store.delete::<Student>(id));
        }
        prop_assert!(store.list::<Student>(None).is_empty());
    }
}
