//! Electoral registers: which students may vote for which body.

use crate::config::RegistersConfig;
use crate::model::{GroupMapping, ProgramId, Student};
use chrono::{Days, NaiveDate};
use eyre::{Error, OptionExt};
use tracing::info;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterEntry {
    pub name: String,
    pub matriculation_number: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Register {
    pub title: String,
    pub deadline: NaiveDate,
    pub first_election_day: NaiveDate,
    pub entries: Vec<RegisterEntry>,
    /// Programs the register is restricted to, `None` if unrestricted.
    pub programs: Option<Vec<ProgramId>>,
}

impl Register {
    /// Build a register listing the `students` holding one of `programs`
    /// (all of them if `programs` is `None`), keeping their order.
    pub fn new(
        title: String,
        deadline: NaiveDate,
        lead_days: u64,
        students: &[Student],
        programs: Option<Vec<ProgramId>>,
    ) -> Result<Self, Error> {
        let first_election_day = deadline
            .checked_add_days(Days::new(lead_days))
            .ok_or_eyre("first election day is out of range")?;
        let entries = students
            .iter()
            .filter(|s| programs.as_deref().is_none_or(|p| s.has_any_program(p)))
            .map(|s| RegisterEntry {
                name: s.display_name(),
                matriculation_number: s.matriculation_number.clone(),
            })
            .collect();
        Ok(Self {
            title,
            deadline,
            first_election_day,
            entries,
            programs,
        })
    }

    /// File-name stem: every run of characters other than ASCII letters and
    /// digits becomes a single `-`.
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        let mut in_run = false;
        for c in self.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c);
                in_run = false;
            } else if !in_run {
                slug.push('-');
                in_run = true;
            }
        }
        slug
    }
}

/// One register per group in mapping order, then the unrestricted
/// register for the student parliament.
pub fn build_registers(
    mapping: &GroupMapping,
    students: &[Student],
    date: NaiveDate,
    config: &RegistersConfig,
) -> Result<Vec<Register>, Error> {
    let mut registers = mapping
        .groups()
        .iter()
        .map(|group| {
            Register::new(
                format!("{}{}", config.group_title_prefix, group.name),
                date,
                config.group_lead_days,
                students,
                Some(group.programs.clone()),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;
    registers.push(Register::new(
        config.parliament_title.clone(),
        date,
        config.parliament_lead_days,
        students,
        None,
    )?);
    for register in &registers {
        info!(register = %register.title, voters = register.entries.len(), "built register");
    }
    Ok(registers)
}
