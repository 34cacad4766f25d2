//! Builds parameterized SELECT, INSERT and UPDATE statements for customers and reservations.

use crate::models::{CustomerFields, NewReservation};
use crate::sql::SqlParam;

const CUSTOMER_COLUMNS: &str = "id, first_name, last_name, phone, notes";
const RESERVATION_COLUMNS: &str = "id, customer_id, start_at, num_guests, notes";

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: impl Into<SqlParam>) -> usize {
        self.params.push(v.into());
        self.params.len()
    }
}

/// Every customer, ordered by last name then first name.
pub fn select_all_customers() -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM customers ORDER BY last_name, first_name", CUSTOMER_COLUMNS);
    q
}

pub fn select_customer_by_id(id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(id);
    q.sql = format!("SELECT {} FROM customers WHERE id = ${}", CUSTOMER_COLUMNS, n);
    q
}

/// Customers whose first or last name equals any of `names` exactly.
/// One `first_name = $n OR last_name = $n` predicate per name, joined with OR.
pub fn select_customers_by_names(names: &[String]) -> QueryBuf {
    let mut q = QueryBuf::new();
    if names.is_empty() {
        q.sql = format!("SELECT {} FROM customers WHERE 1 = 0", CUSTOMER_COLUMNS);
        return q;
    }
    let predicates: Vec<String> = names
        .iter()
        .map(|name| {
            let n = q.push_param(name.as_str());
            format!("first_name = ${n} OR last_name = ${n}")
        })
        .collect();
    q.sql = format!(
        "SELECT {} FROM customers WHERE {} ORDER BY last_name, first_name",
        CUSTOMER_COLUMNS,
        predicates.join(" OR ")
    );
    q
}

pub fn insert_customer(fields: &CustomerFields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders: Vec<String> = customer_values(fields)
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    q.sql = format!(
        "INSERT INTO customers (first_name, last_name, phone, notes) VALUES ({}) RETURNING id",
        placeholders.join(", ")
    );
    q
}

/// UPDATE by id: all four mutable columns are always written.
pub fn update_customer(id: i32, fields: &CustomerFields) -> QueryBuf {
    let mut q = QueryBuf::new();
    let sets: Vec<String> = ["first_name", "last_name", "phone", "notes"]
        .into_iter()
        .zip(customer_values(fields))
        .map(|(col, v)| format!("{} = ${}", col, q.push_param(v)))
        .collect();
    let id_param = q.push_param(id);
    q.sql = format!("UPDATE customers SET {} WHERE id = ${}", sets.join(", "), id_param);
    q
}

fn customer_values(fields: &CustomerFields) -> [SqlParam; 4] {
    [
        fields.first_name.as_str().into(),
        fields.last_name.as_str().into(),
        fields.phone.as_deref().into(),
        fields.notes.as_deref().into(),
    ]
}

/// Customers with at least one reservation, busiest first. Inner join drops customers without reservations.
pub fn select_top_customers_by_reservations(limit: i64) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::BigInt(limit));
    q.sql = format!(
        "SELECT c.id, c.first_name, c.last_name, c.phone, c.notes, COUNT(r.id) AS num_reservations \
         FROM customers c JOIN reservations r ON r.customer_id = c.id \
         GROUP BY c.id \
         ORDER BY num_reservations DESC, c.id \
         LIMIT ${}",
        n
    );
    q
}

pub fn select_reservations_for_customer(customer_id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(customer_id);
    q.sql = format!(
        "SELECT {} FROM reservations WHERE customer_id = ${} ORDER BY start_at, id",
        RESERVATION_COLUMNS, n
    );
    q
}

pub fn insert_reservation(reservation: &NewReservation) -> QueryBuf {
    let mut q = QueryBuf::new();
    let values: [SqlParam; 4] = [
        reservation.customer_id.into(),
        reservation.start_at.into(),
        reservation.num_guests.into(),
        reservation.notes.as_deref().into(),
    ];
    let placeholders: Vec<String> = values
        .into_iter()
        .map(|v| format!("${}", q.push_param(v)))
        .collect();
    q.sql = format!(
        "INSERT INTO reservations (customer_id, start_at, num_guests, notes) VALUES ({}) RETURNING {}",
        placeholders.join(", "),
        RESERVATION_COLUMNS
    );
    q
}
