// ABOUTME: Library exports for pokeascii modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests and benchmarks

pub mod ascii;
pub mod cli;
pub mod config;
pub mod constants;
pub mod output;
pub mod server;
