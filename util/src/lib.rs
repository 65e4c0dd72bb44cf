//! Shared configuration and path helpers for the results fetcher.

pub mod config;
pub mod course_config;
pub mod paths;
