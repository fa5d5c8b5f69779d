//! Shared vocabulary for the Clout identity core: protocol constants,
//! primitive types, and the error enum every crate returns.

pub mod constants;
pub mod error;
pub mod primitives;
