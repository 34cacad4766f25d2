//! In-process store with the same ordering and matching rules as the SQL queries.

use super::LunchlyStore;
use crate::error::AppError;
use crate::models::{Customer, CustomerFields, NewReservation, Reservation, TopCustomer};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i32, CustomerFields>,
    reservations: Vec<Reservation>,
    next_customer_id: i32,
    next_reservation_id: i32,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn saved(id: i32, fields: &CustomerFields) -> Customer {
    Customer::Saved {
        id,
        fields: fields.clone(),
    }
}

fn by_name(mut customers: Vec<Customer>) -> Vec<Customer> {
    customers.sort_by(|a, b| {
        let (a, b) = (a.fields(), b.fields());
        (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name))
    });
    customers
}

#[async_trait]
impl LunchlyStore for MemoryStore {
    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn all_customers(&self) -> Result<Vec<Customer>, AppError> {
        let t = self.tables.read().await;
        Ok(by_name(t.customers.iter().map(|(id, f)| saved(*id, f)).collect()))
    }

    async fn customer_by_id(&self, id: i32) -> Result<Option<Customer>, AppError> {
        let t = self.tables.read().await;
        Ok(t.customers.get(&id).map(|f| saved(id, f)))
    }

    async fn customers_named(&self, names: &[String]) -> Result<Vec<Customer>, AppError> {
        let t = self.tables.read().await;
        let found = t
            .customers
            .iter()
            .filter(|(_, f)| names.iter().any(|n| *n == f.first_name || *n == f.last_name))
            .map(|(id, f)| saved(*id, f))
            .collect();
        Ok(by_name(found))
    }

    async fn insert_customer(&self, fields: &CustomerFields) -> Result<i32, AppError> {
        let mut t = self.tables.write().await;
        t.next_customer_id += 1;
        let id = t.next_customer_id;
        t.customers.insert(id, fields.clone());
        Ok(id)
    }

    async fn update_customer(&self, id: i32, fields: &CustomerFields) -> Result<bool, AppError> {
        let mut t = self.tables.write().await;
        match t.customers.get_mut(&id) {
            Some(existing) => {
                *existing = fields.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn top_customers_by_reservations(&self, limit: i64) -> Result<Vec<TopCustomer>, AppError> {
        let t = self.tables.read().await;
        let mut counts: HashMap<i32, i64> = HashMap::new();
        for r in &t.reservations {
            *counts.entry(r.customer_id).or_default() += 1;
        }
        let mut ranked: Vec<(i32, i64)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        Ok(ranked
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(0))
            .filter_map(|(id, num_reservations)| {
                t.customers.get(&id).map(|f| TopCustomer {
                    customer: saved(id, f),
                    num_reservations,
                })
            })
            .collect())
    }

    async fn reservations_for_customer(&self, customer_id: i32) -> Result<Vec<Reservation>, AppError> {
        let t = self.tables.read().await;
        let mut found: Vec<Reservation> = t
            .reservations
            .iter()
            .filter(|r| r.customer_id == customer_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.start_at.cmp(&b.start_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn insert_reservation(&self, reservation: &NewReservation) -> Result<Reservation, AppError> {
        let mut t = self.tables.write().await;
        if !t.customers.contains_key(&reservation.customer_id) {
            return Err(AppError::NotFound(format!(
                "No such customer: {}",
                reservation.customer_id
            )));
        }
        t.next_reservation_id += 1;
        let saved = Reservation {
            id: t.next_reservation_id,
            customer_id: reservation.customer_id,
            start_at: reservation.start_at,
            num_guests: reservation.num_guests,
            notes: reservation.notes.clone(),
        };
        t.reservations.push(saved.clone());
        Ok(saved)
    }
}
