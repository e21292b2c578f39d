//! Application layer for MUSE.
//!
//! This crate provides use case implementations that coordinate between
//! the board domain model and the analysis backend to implement
//! application-level business logic.

pub mod board_usecase;
pub mod bootstrap;

pub use board_usecase::BoardUseCase;
pub use bootstrap::bootstrap_board;
