pub use self::mapping::{HEADER_LINES, load_mapping, parse_mapping};
pub use self::roster::{RosterSchema, load_roster, parse_roster, sort_students};

mod mapping;
mod roster;
