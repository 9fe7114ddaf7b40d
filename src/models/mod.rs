// src/models/mod.rs

pub mod attempt;
pub mod course;
pub mod question;
pub mod quiz;
pub mod quiz_item;
