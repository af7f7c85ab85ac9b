// src/services/mod.rs

pub mod grading;
pub mod identity;
pub mod progress;
pub mod submission;
