use eyre::{Error, bail};
use std::fmt;

/// Number of degree slots in a roster record.
pub const DEGREE_SLOTS: usize = 5;

/// Number of subject slots per degree slot.
pub const SUBJECT_SLOTS: usize = 3;

/// A degree/subject combination a student can be enrolled in.
///
/// Two programs are equal iff both texts are equal, without any
/// normalization of case or whitespace.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ProgramId {
    pub degree: String,
    pub subject: String,
}

impl ProgramId {
    pub fn new(degree: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            degree: degree.into(),
            subject: subject.into(),
        }
    }

    /// Parse a `"<subject> (<degree>)"` line. Both parts may contain
    /// balanced parentheses of their own: the degree is the content of
    /// the parenthesized group which closes the line.
    pub fn from_line(line: &str) -> Result<Self, Error> {
        if !line.ends_with(')') {
            bail!("invalid program line {line:?}: missing closing parenthesis");
        }
        let close = line.len() - 1;
        let mut depth = 1usize;
        let mut open = None;
        for (index, c) in line[..close].char_indices().rev() {
            match c {
                '(' => depth -= 1,
                ')' => depth += 1,
                _ => continue,
            }
            if depth == 0 {
                open = Some(index);
                break;
            }
        }
        let Some(open) = open else {
            bail!("invalid program line {line:?}: unbalanced parentheses");
        };
        if open == 0 {
            bail!("invalid program line {line:?}: missing subject");
        }
        Ok(Self::new(line[open + 1..close].trim(), line[..open].trim()))
    }

    /// Collect the programs of a roster record. `field` returns the text
    /// stored under a column name, if any. A slot yields a program only if
    /// both its degree and subject texts are non-empty. Duplicates collapse,
    /// keeping the first occurrence.
    pub fn from_slots<'a, F>(field: F) -> Vec<Self>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mut programs: Vec<Self> = Vec::new();
        for degree_slot in 1..=DEGREE_SLOTS {
            let degree = field(&degree_column(degree_slot)).unwrap_or_default();
            if degree.is_empty() {
                continue;
            }
            for subject_slot in 1..=SUBJECT_SLOTS {
                let subject = field(&subject_column(degree_slot, subject_slot)).unwrap_or_default();
                if subject.is_empty() {
                    continue;
                }
                let program = Self::new(degree, subject);
                if !programs.contains(&program) {
                    programs.push(program);
                }
            }
        }
        programs
    }
}

/// Column holding the degree text of a degree slot (1-based).
pub fn degree_column(degree_slot: usize) -> String {
    format!("abschluss{degree_slot}dtxt")
}

/// Column holding the subject text of a subject slot (1-based).
pub fn subject_column(degree_slot: usize, subject_slot: usize) -> String {
    format!("fach{degree_slot}{subject_slot}dtxt")
}

/// Quote `s` the way existing unmapped-program snapshots do: single quotes
/// unless the text holds a single quote and no double quote.
fn quoted(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FAK(degree={}, subject={})",
            quoted(&self.degree),
            quoted(&self.subject)
        )
    }
}
