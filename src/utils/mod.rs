//! Pure helpers used by the run stages.
//!
//! - [`path_matcher`] - Target vs. loaded URL path containment
//! - [`label_matcher`] - Purchase-label text matching

pub mod label_matcher;
pub mod path_matcher;
