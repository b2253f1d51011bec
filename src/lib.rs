//! Placement engine for cutting rectangular details out of a single board.

pub mod cutter;
pub mod error;
mod grid;
pub mod input;
pub mod order;
pub mod types;
