pub mod board;
pub mod models;
pub mod setup;
pub mod state;
