//! Resume desk library
//! Client side of the resume screening backend: bulk filtering, single
//! resume and profile analysis, and candidate guidance

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod input;
pub mod models;
pub mod output;
pub mod processing;
pub mod session;

pub use config::Config;
pub use error::{Result, ResumeDeskError};
