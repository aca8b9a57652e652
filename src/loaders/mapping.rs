use crate::model::{GroupMapping, ProgramId};
use eyre::{Error, WrapErr};
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

/// Title lines at the top of a mapping document.
pub const HEADER_LINES: usize = 3;

/// Width of the margin in front of a program entry (`"  - "`).
const ENTRY_MARGIN: usize = 4;

enum Line<'a> {
    Entry(&'a str),
    Ignored,
    Group(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    if line.starts_with("  ") {
        let start = line
            .char_indices()
            .nth(ENTRY_MARGIN)
            .map_or(line.len(), |(index, _)| index);
        Line::Entry(line[start..].trim())
    } else if line.starts_with('-') || line.trim().is_empty() {
        Line::Ignored
    } else {
        Line::Group(line.trim())
    }
}

/// Parse a mapping document: after `header_lines` title lines, every
/// unindented line names a group and the indented lines below it list the
/// programs the group claims. Lines starting with `-` separate groups.
/// A group is only recorded once its first program is listed.
///
/// Any malformed program entry, including an empty one, fails the whole
/// document.
pub fn parse_mapping(text: &str, header_lines: usize) -> Result<GroupMapping, Error> {
    let mut mapping = GroupMapping::new();
    let mut current: Option<&str> = None;
    for (number, raw) in text.lines().enumerate().skip(header_lines) {
        let number = number + 1;
        match classify(raw) {
            Line::Ignored => {}
            Line::Entry(entry) => {
                let program = ProgramId::from_line(entry)
                    .wrap_err_with(|| format!("invalid mapping entry at line {number}: {raw:?}"))?;
                if current.is_none() {
                    warn!(line = number, %program, "program listed before any group");
                }
                let index = current.map(|name| mapping.ensure_group(name));
                if !mapping.add_program(index, program) {
                    trace!(line = number, "duplicate program entry");
                }
            }
            Line::Group(name) => {
                current = Some(name);
            }
        }
    }
    for group in mapping.groups() {
        debug!(group = %group.name, programs = group.programs.len(), "loaded group");
    }
    Ok(mapping)
}

pub fn load_mapping(path: &Path, header_lines: usize) -> Result<GroupMapping, Error> {
    let text = fs::read_to_string(path)
        .wrap_err_with(|| format!("cannot read mapping document {}", path.display()))?;
    parse_mapping(&text, header_lines)
        .wrap_err_with(|| format!("cannot load mapping document {}", path.display()))
}
