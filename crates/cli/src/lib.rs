//! Public library modules for the CLI crate
pub mod configure;
pub mod filter;
