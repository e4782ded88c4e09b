//! PostgreSQL persistence for complaints using Diesel.
//!
//! The repository is a thin adapter: row structs (`models.rs`) and the table
//! definition (`schema.rs`) stay private, and every database error is mapped
//! onto [`crate::domain::ports::ComplaintRepositoryError`].
//!
//! ```no_run
//! use complaints::outbound::persistence::{DbPool, DieselComplaintRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/complaints")).await?;
//! let _repo = DieselComplaintRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_complaint_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_repository::DieselComplaintRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_SIZE, DbPool, PoolConfig, PoolError};
