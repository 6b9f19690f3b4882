//! Input processing module
//! Handles file detection, text extraction, input caching and job catalogs

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
pub mod catalog;

pub use catalog::{JobCatalog, JobListing};
pub use manager::InputManager;
