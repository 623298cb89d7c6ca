#![doc = "The `taskvault` library crate."]
#![doc = ""]
#![doc = "Contains the domain models, authentication mechanisms, request validation,"]
#![doc = "routing configuration, and error handling for the TaskVault API. The main"]
#![doc = "binary (`main.rs`) uses this crate to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod validation;
