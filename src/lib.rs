pub mod assets;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod services;
pub mod sources;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;
