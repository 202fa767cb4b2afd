//! Command handlers

pub mod lookup;
pub mod transaction;
