//! Core building blocks for fuzzy-logic control
//!
//! This crate provides:
//! - Membership functions for fuzzification of normalized error terms
//! - Fuzzy operators for combining membership degrees
//! - Error tracking (P/I/D) with normalization and anti-windup

pub mod error;
pub mod error_track;
pub mod membership;
pub mod operator;

pub use error::*;
pub use error_track::*;
pub use membership::*;
pub use operator::*;
