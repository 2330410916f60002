//! SQLite storage implementation for the Scholaris record store.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `scholaris-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for all domain entities
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies
//! exist. The `core` crate is database-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!    storage-sqlite (this crate)
//!              │
//!              ▼
//!          SQLite DB
//! ```
//!
//! Reads run on pooled connections; every write is funnelled through a
//! single writer actor and executes inside one immediate transaction, so
//! the constraint checks a repository performs and the write they guard
//! are atomic.

pub mod db;
pub mod errors;
pub mod schema;

mod tenancy;

// Repository implementations
pub mod academics;
pub mod attendance;
pub mod enrollment;
pub mod events;
pub mod fees;
pub mod personnel;
pub mod schools;
pub mod users;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer,
    spawn_writer_with_timeout, DbConnection, DbPool, WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from scholaris-core for convenience
pub use scholaris_core::errors::{DatabaseError, Error, Result};
