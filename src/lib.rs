#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "This crate contains all the core business logic, domain models, authentication"]
#![doc = "mechanisms, routing configuration, and error handling for the TaskDesk application."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;

// lib.rs now primarily declares modules for the library crate.
// The main application setup (app factory) lives in main.rs.
