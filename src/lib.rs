//! # Wicket
//!
//! A personal wiki server, usable both as a standalone binary and as a library.
//!
//! Pages are written in markdown, addressed by slugs derived from their titles,
//! and stored in SQLite. Every edit that changes a page's content preserves the
//! previous body as an immutable revision.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! wicket = { version = "0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::path::PathBuf;
//! use wicket::server::{AppState, create_router};
//! use wicket::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new(&PathBuf::from("./data/wicket.db")).unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store)));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Includes the CLI binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod markup;
pub mod server;
pub mod slug;
pub mod store;
pub mod types;
