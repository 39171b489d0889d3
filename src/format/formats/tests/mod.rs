//! Unit tests for geodata format implementations.
//!
//! These tests verify parsing of real-world shaped files and that written
//! output can be read back.

mod movebank_csv_tests;
