//! Test suites for the skill crate.
