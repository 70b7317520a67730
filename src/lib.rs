pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod scanner;
pub mod session_file;
