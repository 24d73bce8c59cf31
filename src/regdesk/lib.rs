//! # Regdesk Architecture
//!
//! Regdesk hosts two record-keeping desks on one core: a **registration desk**
//! (students signing up for mountain trips) and a **feast desk** (customers
//! ordering feast menus). The core is a validated record store; the terminal is
//! just one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Menus, prompts with retry, colored output                │
//! │  - The ONLY place that reads stdin or writes stdout         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - RegistrationDesk, FeastDesk: own stores + backends       │
//! │  - Thin dispatch to commands                                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business rules: references, expiry, order ids            │
//! │  - Returns CmdResult (views + messages + removed records)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (store/, validation.rs, views.rs, fee.rs, persist/)   │
//! │  - RecordStore with uniqueness scopes                       │
//! │  - ListBackend: FsBackend (production), MemBackend (tests)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing prompts, prints, or exits. Validation
//! functions are pure; prompt retry loops belong to the client.
//!
//! ## Module Overview
//!
//! - [`api`]: The desks, entry point for all operations
//! - [`commands`]: One function per desk operation
//! - [`store`]: Generic record store and the [`store::Record`] trait
//! - [`model`]: Registrations, customers, orders and reference records
//! - [`validation`]: Field patterns and validators
//! - [`views`]: Tables, cards and statistics rendered to strings
//! - [`fee`]: Registration fee and order cost
//! - [`persist`]: Reference file loaders and list backends
//! - [`config`]: Data file configuration
//! - [`error`]: Error types
//! - `cli`: Menus and prompts for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod fee;
pub mod model;
pub mod persist;
pub mod store;
pub mod validation;
pub mod views;
