//! Fuzzy-logic inference control
//!
//! This crate provides:
//! - Conditions and rules binding membership functions to error terms
//! - The fuzzy inference controller with Sugeno-style singleton outputs
//!   and weighted-average defuzzification
//! - The standard eight-rule table with grouped weights
//! - An injectable per-tick diagnostic trace sink

pub mod controller;
pub mod rule;
pub mod rule_table;
pub mod trace;

pub use controller::*;
pub use rule::*;
pub use rule_table::*;
pub use trace::*;
