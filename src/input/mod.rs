//! Input processing module
//! Loads resume and job description text from files or a job posting URL

pub mod file_detector;
pub mod text_extractor;
pub mod manager;
pub mod url_fetcher;

pub use manager::InputManager;
pub use url_fetcher::{FetchOutcome, HttpPageFetcher, PageFetcher};
