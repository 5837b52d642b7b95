// ── Per-entity view description ──
//
// Everything a generic list view needs to know about one entity kind:
// its columns, its form, which inputs are required, and how form text
// becomes create and update requests.

use super::form::Form;
use crate::model::{Department, Entity, EntityId, Field, Student, Teacher};
use crate::navigation::ViewKind;
use crate::requests::{
    CreateDepartmentRequest, CreateStudentRequest, CreateTeacherRequest,
    UpdateDepartmentRequest, UpdateStudentRequest, UpdateTeacherRequest,
};

/// A table column: header text and the field it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub field: Field,
}

const fn col(title: &'static str, field: Field) -> Column {
    Column { title, field }
}

pub trait Resource: Entity {
    /// The view that lists this kind.
    const VIEW: ViewKind;
    /// Rows are joined against the department list on every load.
    const JOINS_DEPARTMENTS: bool;
    const COLUMNS: &'static [Column];
    const FORM_FIELDS: &'static [Field];
    /// Inputs that must be non-blank before a submit reaches the backend.
    const REQUIRED: &'static [Field];

    fn create_request(form: &Form) -> Self::Create;

    /// Every form field is sent, so an unchanged form rewrites the same values.
    fn update_request(form: &Form) -> Self::Update;

    /// Human name, as used in "Are you sure you want to delete {name}?".
    fn describe(&self) -> String;

    fn to_form(&self) -> Form {
        Form::from_record(self, Self::FORM_FIELDS)
    }

    fn blank_form() -> Form {
        Form::blank(Self::FORM_FIELDS)
    }
}

impl Resource for Department {
    const VIEW: ViewKind = ViewKind::Departments;
    const JOINS_DEPARTMENTS: bool = false;
    const COLUMNS: &'static [Column] = &[
        col("Name", Field::Name),
        col("Code", Field::Code),
        col("Description", Field::Description),
    ];
    const FORM_FIELDS: &'static [Field] = &[Field::Name, Field::Code, Field::Description];
    const REQUIRED: &'static [Field] = &[Field::Name, Field::Code];

    fn create_request(form: &Form) -> CreateDepartmentRequest {
        CreateDepartmentRequest {
            name: form.take(Field::Name),
            code: form.take(Field::Code),
            description: form.take(Field::Description),
        }
    }

    fn update_request(form: &Form) -> UpdateDepartmentRequest {
        UpdateDepartmentRequest {
            name: Some(form.take(Field::Name)),
            code: Some(form.take(Field::Code)),
            description: Some(form.take(Field::Description)),
        }
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}

impl Resource for Student {
    const VIEW: ViewKind = ViewKind::Students;
    const JOINS_DEPARTMENTS: bool = true;
    const COLUMNS: &'static [Column] = &[
        col("First Name", Field::FirstName),
        col("Last Name", Field::LastName),
        col("Email", Field::Email),
        col("Department", Field::Department),
        col("Enrolled", Field::EnrollmentDate),
    ];
    const FORM_FIELDS: &'static [Field] = &[
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Department,
        Field::EnrollmentDate,
    ];
    const REQUIRED: &'static [Field] = Self::FORM_FIELDS;

    fn create_request(form: &Form) -> CreateStudentRequest {
        CreateStudentRequest {
            first_name: form.take(Field::FirstName),
            last_name: form.take(Field::LastName),
            email: form.take(Field::Email),
            department_id: EntityId::from(form.take(Field::Department)),
            enrollment_date: form.take(Field::EnrollmentDate),
        }
    }

    fn update_request(form: &Form) -> UpdateStudentRequest {
        UpdateStudentRequest {
            first_name: Some(form.take(Field::FirstName)),
            last_name: Some(form.take(Field::LastName)),
            email: Some(form.take(Field::Email)),
            department_id: Some(EntityId::from(form.take(Field::Department))),
            enrollment_date: Some(form.take(Field::EnrollmentDate)),
        }
    }

    fn describe(&self) -> String {
        self.full_name()
    }
}

impl Resource for Teacher {
    const VIEW: ViewKind = ViewKind::Teachers;
    const JOINS_DEPARTMENTS: bool = true;
    const COLUMNS: &'static [Column] = &[
        col("First Name", Field::FirstName),
        col("Last Name", Field::LastName),
        col("Email", Field::Email),
        col("Department", Field::Department),
        col("Specialization", Field::Specialization),
    ];
    const FORM_FIELDS: &'static [Field] = &[
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::Department,
        Field::Specialization,
    ];
    const REQUIRED: &'static [Field] = Self::FORM_FIELDS;

    fn create_request(form: &Form) -> CreateTeacherRequest {
        CreateTeacherRequest {
            first_name: form.take(Field::FirstName),
            last_name: form.take(Field::LastName),
            email: form.take(Field::Email),
            department_id: EntityId::from(form.take(Field::Department)),
            specialization: form.take(Field::Specialization),
        }
    }

    fn update_request(form: &Form) -> UpdateTeacherRequest {
        UpdateTeacherRequest {
            first_name: Some(form.take(Field::FirstName)),
            last_name: Some(form.take(Field::LastName)),
            email: Some(form.take(Field::Email)),
            department_id: Some(EntityId::from(form.take(Field::Department))),
            specialization: Some(form.take(Field::Specialization)),
        }
    }

    fn describe(&self) -> String {
        self.full_name()
    }
}
