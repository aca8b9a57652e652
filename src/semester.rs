use crate::model::Student;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use tracing::info;

/// Academic half-year, rendered as `<year><half>` like the roster's
/// semester column. Summer terms are half 1, winter terms half 2.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct SemesterKey {
    pub year: i32,
    pub half: u8,
}

impl SemesterKey {
    /// Term running on `date`: April to September is the summer term of
    /// that year, October to March the winter term which started in
    /// October.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            10..=12 => Self {
                year: date.year(),
                half: 2,
            },
            1..=3 => Self {
                year: date.year() - 1,
                half: 2,
            },
            _ => Self {
                year: date.year(),
                half: 1,
            },
        }
    }
}

impl fmt::Display for SemesterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.half)
    }
}

/// Students enrolled in the term running on `date`, in roster order.
pub fn filter_for_semester(students: &[Student], date: NaiveDate) -> Vec<Student> {
    let key = SemesterKey::for_date(date).to_string();
    let eligible = students
        .iter()
        .filter(|s| s.semester == key)
        .cloned()
        .collect::<Vec<_>>();
    info!(
        semester = %key,
        eligible = eligible.len(),
        total = students.len(),
        "filtered roster by semester"
    );
    eligible
}
