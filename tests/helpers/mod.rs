// Shared test data for unit and integration tests
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]


pub use test_data::*;
