// src/lib.rs

//! skiday: ski resort status fusion and day planner library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod scoring;
pub mod services;
pub mod storage;
pub mod utils;
