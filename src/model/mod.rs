pub use self::groups::{Group, GroupMapping};
pub use self::program::{DEGREE_SLOTS, ProgramId, SUBJECT_SLOTS, degree_column, subject_column};
pub use self::student::Student;

mod groups;
mod program;
mod student;
