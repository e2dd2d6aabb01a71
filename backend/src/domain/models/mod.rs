pub mod student;
pub mod records;

pub use student::{Student, StudentKey};
pub use records::{
    ActivityRecord, AttendanceRecord, ExpenseRecord, MemorizationRecord, StudentRecord, StudentRef,
};
