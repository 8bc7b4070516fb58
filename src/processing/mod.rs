//! Text processing module
//! Stopword filtering and keyword overlap between job description and resume

pub mod stopwords;
pub mod keywords;
