use strum::Display;

/// Every named attribute a record, column or form input can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
pub enum Field {
    #[strum(to_string = "ID")]
    Id,
    #[strum(to_string = "Name")]
    Name,
    #[strum(to_string = "Code")]
    Code,
    #[strum(to_string = "Description")]
    Description,
    #[strum(to_string = "First Name")]
    FirstName,
    #[strum(to_string = "Last Name")]
    LastName,
    #[strum(to_string = "Email")]
    Email,
    #[strum(to_string = "Department")]
    Department,
    #[strum(to_string = "Enrollment Date")]
    EnrollmentDate,
    #[strum(to_string = "Specialization")]
    Specialization,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_read_as_column_headers() {
        assert_eq!(Field::Id.to_string(), "ID");
        assert_eq!(Field::FirstName.to_string(), "First Name");
        assert_eq!(Field::EnrollmentDate.to_string(), "Enrollment Date");
    }
}
