use super::ProgramId;
use std::collections::HashSet;

/// A student-body group and the programs it claims.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Group {
    pub name: String,
    pub programs: Vec<ProgramId>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            programs: Vec::new(),
        }
    }

    pub fn claims(&self, program: &ProgramId) -> bool {
        self.programs.contains(program)
    }
}

/// Groups in document order, each claiming at least one program. Programs
/// listed before any group header are kept apart in `stray` and never count
/// as claimed by a group.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupMapping {
    groups: Vec<Group>,
    stray: Vec<ProgramId>,
}

impl GroupMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn stray(&self) -> &[ProgramId] {
        &self.stray
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Position of the group named `name`, creating it if needed. A name
    /// seen twice keeps its first position and its programs merge.
    pub fn ensure_group(&mut self, name: &str) -> usize {
        if let Some(index) = self.groups.iter().position(|g| g.name == name) {
            index
        } else {
            self.groups.push(Group::new(name));
            self.groups.len() - 1
        }
    }

    /// Add `program` to the group at `index`, or to the stray bucket if
    /// `index` is `None`. Returns `false` if it was already there.
    pub fn add_program(&mut self, index: Option<usize>, program: ProgramId) -> bool {
        let programs = match index {
            Some(index) => &mut self.groups[index].programs,
            None => &mut self.stray,
        };
        if programs.contains(&program) {
            false
        } else {
            programs.push(program);
            true
        }
    }

    /// Names of the groups claiming `program`, in mapping order.
    pub fn groups_claiming(&self, program: &ProgramId) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| g.claims(program))
            .map(|g| g.name.as_str())
            .collect()
    }

    /// Every program claimed by at least one group.
    pub fn all_programs(&self) -> HashSet<&ProgramId> {
        self.groups.iter().flat_map(|g| &g.programs).collect()
    }
}

impl FromIterator<(String, Vec<ProgramId>)> for GroupMapping {
    fn from_iter<T: IntoIterator<Item = (String, Vec<ProgramId>)>>(iter: T) -> Self {
        let mut mapping = Self::new();
        for (name, programs) in iter.into_iter().filter(|(_, p)| !p.is_empty()) {
            let index = mapping.ensure_group(&name);
            for program in programs {
                mapping.add_program(Some(index), program);
            }
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(subject: &str) -> ProgramId {
        ProgramId::new("LA BA Gym Ge", subject)
    }

    #[test]
    fn test_groups_claiming() {
        let mapping: GroupMapping = [
            ("Lehramt".to_owned(), vec![p("Deutsch"), p("Englisch")]),
            ("Germanistik".to_owned(), vec![p("Deutsch")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(mapping.groups_claiming(&p("Deutsch")), vec!["Lehramt", "Germanistik"]);
        assert_eq!(mapping.groups_claiming(&p("Englisch")), vec!["Lehramt"]);
        assert!(mapping.groups_claiming(&p("Latein")).is_empty());
        assert_eq!(mapping.all_programs().len(), 2);
    }

    #[test]
    fn test_duplicate_names_merge() {
        let mut mapping = GroupMapping::new();
        let a = mapping.ensure_group("A");
        mapping.ensure_group("B");
        assert_eq!(mapping.ensure_group("A"), a);
        assert!(mapping.add_program(Some(a), p("Deutsch")));
        assert!(!mapping.add_program(Some(a), p("Deutsch")));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.group("A").unwrap().programs, vec![p("Deutsch")]);
    }

    #[test]
    fn test_collect_skips_empty_groups() {
        let mapping: GroupMapping = [
            ("Leer".to_owned(), vec![]),
            ("Lehramt".to_owned(), vec![p("Deutsch")]),
        ]
        .into_iter()
        .collect();
        assert_eq!(mapping.len(), 1);
        assert!(mapping.group("Leer").is_none());
    }

    #[test]
    fn test_stray_is_not_claimed() {
        let mut mapping = GroupMapping::new();
        mapping.add_program(None, p("Deutsch"));
        assert!(mapping.is_empty());
        assert_eq!(mapping.stray(), &[p("Deutsch")]);
        assert!(mapping.all_programs().is_empty());
        assert!(mapping.groups_claiming(&p("Deutsch")).is_empty());
    }
}
