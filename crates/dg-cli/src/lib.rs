//! dg-cli: command-line front end for the dungeon layout generator
//!
//! The binary lives in `bin/dungeon-gen.rs`; this library holds the
//! reporting helpers so they can be tested without running the binary.

pub mod report;

pub use report::{LayoutReport, door_lines, plan_lines, summary};
