//! Input handling
//! Resume file detection, the upload set and local preview handles

pub mod file_detector;
pub mod uploads;
