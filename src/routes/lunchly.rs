//! Customer and reservation pages.

use crate::handlers::{
    add_reservation, create_customer, edit_customer_form, list_customers, new_customer_form,
    search_customers, show_customer, top_ten, update_customer,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, Router};

pub fn lunchly_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list_customers).post(search_customers))
        .route("/topten", get(top_ten))
        .route("/add/", get(new_customer_form).post(create_customer))
        .route("/:id/", get(show_customer))
        .route("/:id/edit/", get(edit_customer_form).post(update_customer))
        .route("/:id/add-reservation/", post(add_reservation))
        .with_state(state)
}
