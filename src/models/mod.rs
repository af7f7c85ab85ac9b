// src/models/mod.rs

pub mod progress;
pub mod question;
pub mod quiz;
pub mod user;
