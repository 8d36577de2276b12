//! Shared data models for hunter backends

mod operation;
mod outcome;
mod record;

pub use operation::*;
pub use outcome::*;
pub use record::*;
