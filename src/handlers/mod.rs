// src/handlers/mod.rs

pub mod auth;
pub mod course;
pub mod question;
pub mod quiz;
