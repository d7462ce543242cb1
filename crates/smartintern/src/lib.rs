//! Explainable matching of student profiles against internship postings.

pub mod catalog;
pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;
