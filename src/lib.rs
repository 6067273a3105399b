pub mod blob;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod generator;
pub mod model;
pub mod parser;
pub mod protocol;
pub mod store;
pub mod validator;
// cmd and reports are binary modules, see main.rs.
