//! # Repform-Core
//!
//! Core types and geometry for the repform exercise repetition tracker:
//! pose samples as reported by an external pose-estimation service, and the
//! planar joint-angle computations the rep engine consumes.

pub mod error;
pub mod geometry;
pub mod types;

pub use error::{Error, Result};
pub use geometry::*;
pub use types::*;
