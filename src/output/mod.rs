//! Report composition, PDF export and terminal rendering

pub mod report;
pub mod pdf;
pub mod formatter;

pub use pdf::{DocumentExporter, PdfExporter};
pub use report::{compose, CombinedReport};
