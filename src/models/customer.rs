//! Restaurant customers: lookup, search, persistence and the top-ten aggregate.

use crate::case::search_tokens;
use crate::error::AppError;
use crate::models::Reservation;
use crate::store::LunchlyStore;

const TOP_CUSTOMERS_LIMIT: i64 = 10;

/// Mutable customer attributes, shared by unsaved and saved customers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerFields {
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: Option<String>,
}

/// A customer either not yet written to the store, or persisted under `id`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Customer {
    Unsaved(CustomerFields),
    Saved { id: i32, fields: CustomerFields },
}

/// A customer together with how many reservations they hold.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopCustomer {
    pub customer: Customer,
    pub num_reservations: i64,
}

impl Customer {
    pub fn new(fields: CustomerFields) -> Self {
        Customer::Unsaved(fields)
    }

    pub fn id(&self) -> Option<i32> {
        match self {
            Customer::Unsaved(_) => None,
            Customer::Saved { id, .. } => Some(*id),
        }
    }

    pub fn fields(&self) -> &CustomerFields {
        match self {
            Customer::Unsaved(fields) | Customer::Saved { fields, .. } => fields,
        }
    }

    pub fn fields_mut(&mut self) -> &mut CustomerFields {
        match self {
            Customer::Unsaved(fields) | Customer::Saved { fields, .. } => fields,
        }
    }

    pub fn full_name(&self) -> String {
        let f = self.fields();
        format!("{} {}", f.first_name, f.last_name)
    }

    pub fn notes(&self) -> Option<&str> {
        self.fields().notes.as_deref()
    }

    /// Replace the notes. Blank values are rejected and leave the current notes untouched.
    pub fn set_notes(&mut self, notes: &str) -> Result<(), AppError> {
        if notes.trim().is_empty() {
            return Err(AppError::Validation("notes must not be empty".into()));
        }
        self.fields_mut().notes = Some(notes.to_string());
        Ok(())
    }

    /// All customers, ordered by last name then first name.
    pub async fn all(store: &dyn LunchlyStore) -> Result<Vec<Customer>, AppError> {
        store.all_customers().await
    }

    pub async fn get(store: &dyn LunchlyStore, id: i32) -> Result<Customer, AppError> {
        store
            .customer_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No such customer: {}", id)))
    }

    /// Customers whose first or last name is exactly one of the title-cased search tokens.
    pub async fn get_by_search(store: &dyn LunchlyStore, term: &str) -> Result<Vec<Customer>, AppError> {
        let names = search_tokens(term)?;
        if names.is_empty() {
            return Ok(Vec::new());
        }
        store.customers_named(&names).await
    }

    pub async fn get_reservations(&self, store: &dyn LunchlyStore) -> Result<Vec<Reservation>, AppError> {
        match self.id() {
            Some(id) => Reservation::get_reservations_for_customer(store, id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Insert an unsaved customer (becoming `Saved` with the generated id) or update all
    /// fields of a saved one. Returns the customer id.
    pub async fn save(&mut self, store: &dyn LunchlyStore) -> Result<i32, AppError> {
        match self {
            Customer::Unsaved(fields) => {
                let id = store.insert_customer(fields).await?;
                tracing::info!(customer_id = id, "customer created");
                let fields = std::mem::take(fields);
                *self = Customer::Saved { id, fields };
                Ok(id)
            }
            Customer::Saved { id, fields } => {
                if !store.update_customer(*id, fields).await? {
                    return Err(AppError::NotFound(format!("No such customer: {}", id)));
                }
                tracing::info!(customer_id = *id, "customer updated");
                Ok(*id)
            }
        }
    }

    pub async fn get_top_ten_by_reservations(store: &dyn LunchlyStore) -> Result<Vec<TopCustomer>, AppError> {
        store.top_customers_by_reservations(TOP_CUSTOMERS_LIMIT).await
    }
}
