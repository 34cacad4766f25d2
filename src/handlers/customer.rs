//! Customer pages: list, search, top ten, add, detail, edit.

use super::{non_empty, parse_id};
use crate::error::AppError;
use crate::models::{Customer, CustomerFields};
use crate::state::AppState;
use crate::views;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form,
};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

impl From<CustomerForm> for CustomerFields {
    fn from(form: CustomerForm) -> Self {
        CustomerFields {
            first_name: form.first_name,
            last_name: form.last_name,
            phone: non_empty(form.phone),
            notes: non_empty(form.notes),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

pub async fn list_customers(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let customers = Customer::all(state.store.as_ref()).await?;
    Ok(views::customer_list(&customers))
}

pub async fn search_customers(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, AppError> {
    let customers = Customer::get_by_search(state.store.as_ref(), &form.search_term).await?;
    Ok(views::customer_list(&customers))
}

pub async fn top_ten(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let top = Customer::get_top_ten_by_reservations(state.store.as_ref()).await?;
    Ok(views::top_ten_list(&top))
}

pub async fn new_customer_form() -> Html<String> {
    views::customer_new_form()
}

pub async fn create_customer(
    State(state): State<AppState>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, AppError> {
    let mut customer = Customer::new(form.into());
    let id = customer.save(state.store.as_ref()).await?;
    Ok(Redirect::to(&format!("/{}/", id)))
}

pub async fn show_customer(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Html<String>, AppError> {
    let store = state.store.as_ref();
    let customer = Customer::get(store, parse_id(&id_str)?).await?;
    let reservations = customer.get_reservations(store).await?;
    Ok(views::customer_detail(&customer, &reservations))
}

pub async fn edit_customer_form(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Html<String>, AppError> {
    let customer = Customer::get(state.store.as_ref(), parse_id(&id_str)?).await?;
    Ok(views::customer_edit_form(&customer))
}

pub async fn update_customer(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, AppError> {
    let store = state.store.as_ref();
    let mut customer = Customer::get(store, parse_id(&id_str)?).await?;
    let edited: CustomerFields = form.into();
    customer.set_notes(edited.notes.as_deref().unwrap_or_default())?;
    let fields = customer.fields_mut();
    fields.first_name = edited.first_name;
    fields.last_name = edited.last_name;
    fields.phone = edited.phone;
    let id = customer.save(store).await?;
    Ok(Redirect::to(&format!("/{}/", id)))
}
