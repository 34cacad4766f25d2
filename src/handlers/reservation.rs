//! Adding a reservation to a customer.

use super::{non_empty, parse_id};
use crate::error::AppError;
use crate::models::{parse_start_at, Customer, NewReservation};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    #[serde(default)]
    pub start_at: String,
    #[serde(default)]
    pub num_guests: String,
    pub notes: Option<String>,
}

impl ReservationForm {
    fn into_new_reservation(self, customer_id: i32) -> Result<NewReservation, AppError> {
        let start_at = parse_start_at(&self.start_at)?;
        let num_guests = self
            .num_guests
            .trim()
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid number of guests: {}", self.num_guests)))?;
        NewReservation::new(customer_id, start_at, num_guests, non_empty(self.notes))
    }
}

pub async fn add_reservation(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Form(form): Form<ReservationForm>,
) -> Result<Redirect, AppError> {
    let store = state.store.as_ref();
    let customer_id = parse_id(&id_str)?;
    Customer::get(store, customer_id).await?;
    form.into_new_reservation(customer_id)?.save(store).await?;
    Ok(Redirect::to(&format!("/{}/", customer_id)))
}
