//! Survey compliance evaluation.
//!
//! Raw survey payload → [`normalize`] → [`detect`] → ordered violations.
//! [`intake`] and [`summary`] cover the submission flow around the engine.

pub mod detector;
pub mod entity;
pub mod intake;
pub mod normalize;
pub mod numeric;
pub mod rules;
pub mod summary;
pub mod violation;

pub use detector::{detect, detect_violations};
pub use normalize::{normalize, NormalizedSurvey};
pub use violation::{Measure, Severity, Violation, ViolationKind};
