//! Persistence seam for the models. `PgStore` talks to PostgreSQL; `MemoryStore` keeps
//! everything in process for tests and database-less local runs.

mod memory;
mod postgres;

use crate::error::AppError;
use crate::models::{Customer, CustomerFields, NewReservation, Reservation, TopCustomer};
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use postgres::{ensure_database_exists, ensure_schema, PgStore};

#[async_trait]
pub trait LunchlyStore: Send + Sync {
    /// Cheap round trip used by the `/ready` check.
    async fn ping(&self) -> Result<(), AppError>;

    async fn all_customers(&self) -> Result<Vec<Customer>, AppError>;

    async fn customer_by_id(&self, id: i32) -> Result<Option<Customer>, AppError>;

    /// Customers whose first or last name equals one of `names` (exact, case-sensitive).
    async fn customers_named(&self, names: &[String]) -> Result<Vec<Customer>, AppError>;

    /// Returns the generated id.
    async fn insert_customer(&self, fields: &CustomerFields) -> Result<i32, AppError>;

    /// Returns false when no customer has `id`.
    async fn update_customer(&self, id: i32, fields: &CustomerFields) -> Result<bool, AppError>;

    async fn top_customers_by_reservations(&self, limit: i64) -> Result<Vec<TopCustomer>, AppError>;

    async fn reservations_for_customer(&self, customer_id: i32) -> Result<Vec<Reservation>, AppError>;

    /// Fails with NotFound when the owning customer does not exist.
    async fn insert_reservation(&self, reservation: &NewReservation) -> Result<Reservation, AppError>;
}
