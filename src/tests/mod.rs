//! Crate-level test modules.
//!
//! Tests for the data structures live next to them; this module covers the
//! configuration and error layers plus shared fixtures.
