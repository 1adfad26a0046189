pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod recorder;
pub mod runner;
pub mod shell;
pub mod state;
pub mod store;
pub mod validator;
