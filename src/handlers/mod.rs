// src/handlers/mod.rs

pub mod answer;
pub mod question;
pub mod session;
