//! Integration tests for the vaccine mandate utility model
//!
//! Tests are organized by topic:
//! - `scenarios` - Documented baseline figures and their variations
//! - `properties` - Invariants that hold across the valid parameter space
//! - `tables` - The standard sensitivity and two-way tables

mod properties;
