//! Parameterized SQL for the customer and reservation tables. Values are always bound, never inlined.

mod builder;
pub mod params;
pub use builder::*;
pub use params::*;
