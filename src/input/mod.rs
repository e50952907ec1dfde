//! Document text extraction for resumes and job postings.

pub mod extractor;

pub use extractor::{extract_document, extract_resume, file_label};
