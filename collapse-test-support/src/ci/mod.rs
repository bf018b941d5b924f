//! Helpers that interpret CI environment knobs.

pub mod property_test_profile;
