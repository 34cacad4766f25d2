//! Lunchly: restaurant customer and reservation manager with server-rendered pages.

pub mod case;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;
pub mod views;

pub use config::{Config, StoreBackend};
pub use error::{AppError, ConfigError};
pub use models::{Customer, CustomerFields, NewReservation, Reservation, TopCustomer};
pub use routes::app;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_schema, LunchlyStore, MemoryStore, PgStore};
