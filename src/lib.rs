pub mod ansible;
pub mod cli;
pub mod config;
pub mod errors;
pub mod extract;
pub mod render;
