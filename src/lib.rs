pub mod record;
pub mod sink;
pub mod error;
pub mod filter;
pub mod config;
pub mod logger;
pub mod layer;

pub mod console;
pub mod memory;
pub mod noop_sink;

pub mod env;
pub mod init;
