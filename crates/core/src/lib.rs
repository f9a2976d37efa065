//! Garun survey compliance core.
//!
//! Pure logic with no I/O: survey normalization, the zone regulation table,
//! the violation detector and survey summary computation. The HTTP service
//! and the record store build on top of this crate.

pub mod error;
pub mod regulation;
pub mod survey;
pub mod types;
