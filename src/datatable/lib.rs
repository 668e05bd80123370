//! # Datatable Architecture
//!
//! Datatable is a **UI-agnostic record table library**: rows of `{name, date, value}`
//! that can be added, edited, deleted, searched and sorted. The terminal client in
//! `cli/` is one presentation layer over it; a web front end or a service could be
//! another.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Reads shell lines, renders the table and the form        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Controller: owns store, form session, search/sort state  │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - create / update / delete / list / form                   │
//! │  - Operates on Rust types, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - store/: RecordStore trait, InMemoryStore                 │
//! │  - query.rs: filter, sort, paginate (pure)                  │
//! │  - form.rs: FormSession, Draft, validation                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Execution Model
//!
//! Everything is single-threaded and synchronous. Each user action runs to
//! completion before the next one starts, and the view is a pure function of
//! the store plus the search and sort state, recomputed on demand. There are
//! no locks because there is only ever one actor.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade and controller
//! - [`commands`]: Business logic for each action
//! - [`store`]: Storage abstraction and the in-memory implementation
//! - [`query`]: Search, sort and pagination
//! - [`form`]: Add/edit sessions and draft validation
//! - [`model`]: `Record`, `RecordId`, `RecordFields`, `Field`
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod query;
pub mod store;
