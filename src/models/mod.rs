//! Domain models: customers and their reservations.

mod customer;
mod reservation;
pub use customer::{Customer, CustomerFields, TopCustomer};
pub use reservation::{parse_start_at, NewReservation, Reservation};
