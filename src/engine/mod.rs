// src/engine/mod.rs

//! Quiz resolution and scoring.
//!
//! Both halves are synchronous and storage-free: they read a [`catalog::Catalog`]
//! snapshot (or any [`resolver::QuizSource`]) and return fresh values.

pub mod catalog;
pub mod resolver;
pub mod scorer;
