//! Vacancy parser for the hh.ru API.
//!
//! Pages through search results for a query, fetches every vacancy's full record,
//! cuts the work conditions out of the descriptions and counts the most frequent
//! n-grams in them. Requests go out one at a time.

pub mod config;
mod error;
pub mod log;
mod macros;
pub mod models;
pub mod ngram;
pub mod parse;
pub mod process;
pub mod request;

pub use error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.hh.ru";
/// Region code for Russia.
pub const DEFAULT_AREA: u32 = 113;
pub const DEFAULT_QUERY: &str = "python";
pub const DEFAULT_COUNT: usize = 200;
/// Search results per page. The API doesn't return more than 100.
pub const PER_PAGE: usize = 100;
/// Above this many vacancies a search is split by experience.
pub const BUCKET_THRESHOLD: usize = 2000;
