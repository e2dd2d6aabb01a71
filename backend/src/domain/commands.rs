//! Domain-level command and query types.
//!
//! Services take these instead of long argument lists. Callers outside the
//! crate build them from whatever form their input arrives in.

pub mod students {
    use crate::domain::models::Student;

    /// Input for registering a new student.
    #[derive(Debug, Clone)]
    pub struct CreateStudentCommand {
        pub name: String,
        pub class_name: String,
        pub level: String,
        pub halaqah: Option<String>,
        /// `YYYY-MM-DD`
        pub enrolled_on: Option<String>,
    }

    /// Partial update; `None` leaves a field unchanged.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateStudentCommand {
        pub student_id: String,
        pub name: Option<String>,
        pub class_name: Option<String>,
        pub level: Option<String>,
        pub halaqah: Option<String>,
        pub enrolled_on: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SetStudentActiveCommand {
        pub student_id: String,
        pub active: bool,
    }

    #[derive(Debug, Clone)]
    pub struct CreateStudentResult {
        pub student: Student,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateStudentResult {
        pub student: Student,
    }

    #[derive(Debug, Clone)]
    pub struct ListStudentsResult {
        pub students: Vec<Student>,
    }
}

pub mod reports {
    use shared::Period;

    /// Report for one student over one period.
    #[derive(Debug, Clone)]
    pub struct StudentReportQuery {
        pub student_id: String,
        pub period: Period,
    }

    /// Reports for every student of a class over one period.
    #[derive(Debug, Clone)]
    pub struct ClassReportQuery {
        pub class_name: String,
        pub period: Period,
        /// Include deactivated students
        pub include_inactive: bool,
    }

    /// Monthly spending of one student over an academic year.
    #[derive(Debug, Clone)]
    pub struct FinanceYearQuery {
        pub student_id: String,
        /// Calendar year in which the academic year starts (July)
        pub academic_year: i32,
    }
}
