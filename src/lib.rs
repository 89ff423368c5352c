pub mod analyzers;
pub mod config;
pub mod error;
pub mod handler;
pub mod output;
pub mod presenter;
pub mod server;
pub mod validator;
