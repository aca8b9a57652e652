//! Proportional split of funds across groups.
//!
//! Every student carries one unit share, split evenly across their
//! programs; a program claimed by several groups splits its part evenly
//! again. Programs no group claims go to [`UNKNOWN_GROUP`]. All sums are
//! exact rationals so the result does not depend on summation order.

use crate::model::{GroupMapping, ProgramId, Student};
use eyre::{Error, WrapErr};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;
use serde::ser::{Error as _, SerializeMap};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashSet};
use std::str::FromStr;
use tracing::{debug, warn};

/// Bucket receiving the shares of programs no group claims.
pub const UNKNOWN_GROUP: &str = "unknown";

pub type Share = BigRational;

/// Accumulated shares per group name.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Distribution(BTreeMap<String, Share>);

impl Distribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, group: &str) -> Option<&Share> {
        self.0.get(group)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Share)> {
        self.0.iter().map(|(name, share)| (name.as_str(), share))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum over all groups.
    pub fn total(&self) -> Share {
        self.0.values().fold(Share::zero(), |acc, share| acc + share)
    }

    pub fn add(&mut self, group: &str, share: Share) {
        match self.0.get_mut(group) {
            Some(total) => *total += share,
            None => {
                self.0.insert(group.to_owned(), share);
            }
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        for (group, share) in other.0 {
            self.add(&group, share);
        }
        self
    }

    /// Pretty-printed `{"group": {"numerator": n, "denominator": d}}`.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).wrap_err("cannot serialize funds distribution")
    }
}

#[derive(Serialize)]
struct Fraction {
    numerator: serde_json::Number,
    denominator: serde_json::Number,
}

fn json_integer(n: &BigInt) -> Result<serde_json::Number, serde_json::Error> {
    serde_json::Number::from_str(&n.to_string())
}

impl Serialize for Distribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (group, share) in &self.0 {
            let fraction = Fraction {
                numerator: json_integer(share.numer()).map_err(S::Error::custom)?,
                denominator: json_integer(share.denom()).map_err(S::Error::custom)?,
            };
            map.serialize_entry(group, &fraction)?;
        }
        map.end()
    }
}

/// Shares a single student contributes. Sums to exactly one unless the
/// student has no programs, in which case it is empty. Programs listed
/// twice count once.
pub fn shares_for(student: &Student, mapping: &GroupMapping) -> Distribution {
    let mut shares = Distribution::new();
    let mut distinct: Vec<&ProgramId> = Vec::with_capacity(student.programs.len());
    for program in &student.programs {
        if !distinct.contains(&program) {
            distinct.push(program);
        }
    }
    let programs = distinct.len();
    for program in distinct {
        let mut groups = mapping.groups_claiming(program);
        if groups.is_empty() {
            groups.push(UNKNOWN_GROUP);
        }
        let share = Share::new(BigInt::from(1), BigInt::from(programs * groups.len()));
        for group in groups {
            shares.add(group, share.clone());
        }
    }
    shares
}

/// Shares of all students, summed per group.
pub fn distribute(mapping: &GroupMapping, students: &[Student]) -> Distribution {
    let distribution = students
        .iter()
        .map(|student| shares_for(student, mapping))
        .fold(Distribution::new(), Distribution::merge);
    for (group, share) in distribution.iter() {
        debug!(group, share = %share, "funds share");
    }
    distribution
}

/// Renderings of the programs held by some student but claimed by no
/// group, sorted and without duplicates.
pub fn unmapped_programs(mapping: &GroupMapping, students: &[Student]) -> Vec<String> {
    let claimed = mapping.all_programs();
    let held = students
        .iter()
        .flat_map(|s| &s.programs)
        .collect::<HashSet<&ProgramId>>();
    let mut unmapped = held
        .difference(&claimed)
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    unmapped.sort();
    if !unmapped.is_empty() {
        warn!(count = unmapped.len(), "programs not claimed by any group");
    }
    unmapped
}
