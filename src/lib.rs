pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod services;
pub mod sources;
pub mod storage;
pub mod telemetry;
