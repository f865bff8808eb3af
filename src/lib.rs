pub mod cache;
pub mod cli;
pub mod server;

pub use server::{router, AppState};
