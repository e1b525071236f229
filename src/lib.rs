pub mod config;
pub mod engine;
pub mod error;
pub mod finalize;
pub mod grid;
pub mod hash;
pub mod level;
pub mod pool;
pub mod scorer;
pub mod store;
// cmd and reports are binary modules (declared in main.rs).
