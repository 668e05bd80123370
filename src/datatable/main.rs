//! # Datatable CLI
//!
//! The binary is intentionally thin: the shell lives in `src/datatable/cli/`, and this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/)                                           │
//! │  - clap parsing of flags and shell lines (setup.rs)         │
//! │  - dispatch to the API (commands.rs)                        │
//! │  - table / form rendering (render.rs)                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs): controller over store + form + view    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward is UI agnostic. The CLI owns all user-facing
//! concerns: argument parsing, logging setup, configuration, rendering and exit codes.
//!
//! ## Testing Approach
//!
//! - Library modules carry their own unit tests.
//! - `cli/setup.rs` tests parse shell lines, `cli/render.rs` tests compare rendered
//!   strings, and `cli/commands.rs` drives dispatch against an in-memory API.
//! - `tests/` runs the real binary with scripted stdin.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
