// src/domain/mod.rs — Static reference tables

pub mod achievements;
pub mod domains;
pub mod keywords;
pub mod topics;
