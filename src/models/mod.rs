//! Data shapes exchanged with the resume backend

pub mod candidate;
pub mod criteria;
pub mod profile;
pub mod user;

pub use candidate::{CandidateResult, FieldValue};
pub use criteria::{Department, FilterCriteria};
pub use profile::ProfileKind;
