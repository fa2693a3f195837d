pub mod auth;
pub mod board;
pub mod output;
