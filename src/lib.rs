//! Electoral registers and funds distribution for student-body groups.
//!
//! A roster of students and a mapping document assigning degree/subject
//! programs to groups are turned into one register of eligible voters per
//! group and an exact proportional split of funds across the groups.

pub mod collation;
pub mod config;
pub mod display;
pub mod funds;
pub mod loaders;
pub mod model;
pub mod registers;
pub mod semester;
