pub mod commands;
pub mod discovery;
pub mod error;
pub mod platform;
pub mod resource;
pub mod runtime;
pub mod serialization;
