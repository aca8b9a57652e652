use crate::collation::collation_key;
use crate::model::{DEGREE_SLOTS, ProgramId, SUBJECT_SLOTS, Student, degree_column, subject_column};
use csv::StringRecord;
use eyre::{Error, OptionExt, WrapErr, bail};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, trace};

pub const FIRST_NAMES_COLUMN: &str = "vorname";
pub const GIVEN_NAMES_COLUMN: &str = "nachname";
pub const MATRICULATION_COLUMN: &str = "mtknr";
pub const SEMESTER_COLUMN: &str = "semester";

/// Column positions of a roster, resolved once from its header row.
/// Program slot columns are optional and read as empty when absent.
#[derive(Debug)]
pub struct RosterSchema {
    first_names: usize,
    given_names: usize,
    matriculation_number: usize,
    semester: usize,
    slots: HashMap<String, usize>,
}

impl RosterSchema {
    pub fn from_headers(headers: &StringRecord) -> Result<Self, Error> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let required = |name: &str| {
            position(name).ok_or_else(|| eyre::eyre!("required column {name:?} not found in roster"))
        };
        let slots = (1..=DEGREE_SLOTS)
            .flat_map(|d| {
                std::iter::once(degree_column(d))
                    .chain((1..=SUBJECT_SLOTS).map(move |s| subject_column(d, s)))
            })
            .filter_map(|name| position(&name).map(|index| (name, index)))
            .collect::<HashMap<_, _>>();
        if slots.is_empty() {
            bail!("roster has no program columns");
        }
        Ok(Self {
            first_names: required(FIRST_NAMES_COLUMN)?,
            given_names: required(GIVEN_NAMES_COLUMN)?,
            matriculation_number: required(MATRICULATION_COLUMN)?,
            semester: required(SEMESTER_COLUMN)?,
            slots,
        })
    }

    pub fn student(&self, record: &StringRecord) -> Result<Student, Error> {
        let field = |index: usize| {
            record
                .get(index)
                .map(str::to_owned)
                .ok_or_eyre("record is shorter than the header row")
        };
        Ok(Student {
            first_names: field(self.first_names)?,
            given_names: field(self.given_names)?,
            matriculation_number: field(self.matriculation_number)?,
            semester: field(self.semester)?,
            programs: ProgramId::from_slots(|name| {
                self.slots.get(name).and_then(|&index| record.get(index))
            }),
        })
    }
}

/// Sort students by given names, then first names, in German dictionary
/// order. Equal names keep their relative order.
pub fn sort_students(students: &mut [Student]) {
    students.sort_by_cached_key(|s| (collation_key(&s.given_names), collation_key(&s.first_names)));
}

/// Read a delimited roster with a header row into sorted students.
pub fn parse_roster<R: Read>(reader: R, delimiter: u8) -> Result<Vec<Student>, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(reader);
    let headers = reader.headers().wrap_err("cannot read roster header row")?;
    let schema = RosterSchema::from_headers(headers)?;
    trace!(?schema, "resolved roster columns");
    let mut students = Vec::new();
    for (number, record) in reader.records().enumerate() {
        let number = number + 1;
        let student = record
            .map_err(Error::from)
            .and_then(|record| schema.student(&record))
            .wrap_err_with(|| format!("cannot read roster record {number}"))?;
        if student.programs.is_empty() {
            debug!(record = number, student = %student, "student has no programs");
        }
        students.push(student);
    }
    sort_students(&mut students);
    info!(students = students.len(), "loaded roster");
    Ok(students)
}

pub fn load_roster(path: &Path, delimiter: u8) -> Result<Vec<Student>, Error> {
    let file = File::open(path).wrap_err_with(|| format!("cannot open roster {}", path.display()))?;
    parse_roster(file, delimiter).wrap_err_with(|| format!("cannot load roster {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "vorname;nachname;mtknr;semester;abschluss1dtxt;fach11dtxt;fach12dtxt;abschluss2dtxt;fach21dtxt";

    fn roster(rows: &[&str]) -> String {
        std::iter::once(HEADER)
            .chain(rows.iter().copied())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_parse_student() {
        let text = roster(&["Erika;Mustermann;0123456789;20242;Bachelor of Arts;Geschichte;Philosophie;;Ignored"]);
        let students = parse_roster(text.as_bytes(), b';').unwrap();
        assert_eq!(
            students,
            vec![Student {
                first_names: "Erika".to_owned(),
                given_names: "Mustermann".to_owned(),
                matriculation_number: "0123456789".to_owned(),
                semester: "20242".to_owned(),
                programs: vec![
                    ProgramId::new("Bachelor of Arts", "Geschichte"),
                    ProgramId::new("Bachelor of Arts", "Philosophie"),
                ],
            }]
        );
    }

    #[test]
    fn test_sorts_by_given_then_first_names() {
        let text = roster(&[
            "Otto;Beispiel;1;20242;;;;;",
            "Ödem;Beispiel;2;20242;;;;;",
            "Abel;Zander;3;20242;;;;;",
            "Ober;Beispiel;4;20242;;;;;",
        ]);
        let students = parse_roster(text.as_bytes(), b';').unwrap();
        let numbers = students
            .iter()
            .map(|s| s.matriculation_number.as_str())
            .collect::<Vec<_>>();
        assert_eq!(numbers, vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let text = roster(&["Anna;Muster;2;20242;;;;;", "Anna;Muster;1;20242;;;;;"]);
        let students = parse_roster(text.as_bytes(), b';').unwrap();
        assert_eq!(students[0].matriculation_number, "2");
        assert_eq!(students[1].matriculation_number, "1");
    }

    #[test]
    fn test_missing_column() {
        let text = "vorname;nachname;semester;abschluss1dtxt;fach11dtxt\nA;B;20242;x;y";
        let err = parse_roster(text.as_bytes(), b';').unwrap_err();
        assert!(err.to_string().contains("\"mtknr\""), "{err}");
    }

    #[test]
    fn test_short_record_names_the_record() {
        let text = roster(&["Anna;Muster;1;20242;;;;;", "Anna;Muster"]);
        let err = parse_roster(text.as_bytes(), b';').unwrap_err();
        assert!(err.to_string().contains("record 2"), "{err}");
    }

    #[test]
    fn test_empty_roster() {
        assert!(parse_roster(HEADER.as_bytes(), b';').unwrap().is_empty());
    }

    #[test]
    fn test_other_delimiter() {
        let text = roster(&["Anna;Muster;1;20242;;;;;"]).replace(';', ",");
        assert_eq!(parse_roster(text.as_bytes(), b',').unwrap().len(), 1);
    }
}
