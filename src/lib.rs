//! QReport core: clients, contacts, facilities and technician intervention
//! reports for a field-service application, backed by a local SQLite store.
//!
//! The crate is layered bottom-up: `domain` holds the aggregates and value
//! objects, `models`/`schema` the Diesel mapping, `repository` the
//! per-aggregate reader/writer traits with their Diesel implementation,
//! `forms` the validated input payloads, `services` the use cases, and
//! `screens` the per-screen state holders consumed by the UI shell.

pub mod db;
pub mod domain;
pub mod forms;
pub mod models;
pub mod repository;
pub mod schema;
pub mod screens;
pub mod services;
pub mod signatures;
