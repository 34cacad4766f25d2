//! PostgreSQL-backed store plus database/schema bootstrap.

use super::LunchlyStore;
use crate::error::{AppError, ConfigError};
use crate::models::{Customer, CustomerFields, NewReservation, Reservation, TopCustomer};
use crate::sql::{self, QueryBuf};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{ConnectOptions, FromRow, PgPool};
use std::str::FromStr;

/// Postgres error code for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";

const SCHEMA_DDL: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id SERIAL PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        phone TEXT,
        notes TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reservations (
        id SERIAL PRIMARY KEY,
        customer_id INTEGER NOT NULL REFERENCES customers (id),
        start_at TIMESTAMP NOT NULL,
        num_guests INTEGER NOT NULL CHECK (num_guests > 0),
        notes TEXT
    )
    "#,
    "CREATE INDEX IF NOT EXISTS reservations_customer_id_idx ON reservations (customer_id)",
];

#[derive(FromRow)]
struct CustomerRow {
    id: i32,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    notes: Option<String>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer::Saved {
            id: row.id,
            fields: CustomerFields {
                first_name: row.first_name,
                last_name: row.last_name,
                phone: row.phone,
                notes: row.notes,
            },
        }
    }
}

#[derive(FromRow)]
struct TopCustomerRow {
    #[sqlx(flatten)]
    customer: CustomerRow,
    num_reservations: i64,
}

#[derive(FromRow)]
struct ReservationRow {
    id: i32,
    customer_id: i32,
    start_at: NaiveDateTime,
    num_guests: i32,
    notes: Option<String>,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Reservation {
            id: row.id,
            customer_id: row.customer_id,
            start_at: row.start_at,
            num_guests: row.num_guests,
            notes: row.notes,
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all<T>(&self, q: &QueryBuf) -> Result<Vec<T>, AppError>
    where
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_all(&self.pool).await?)
    }

    async fn fetch_optional<T>(&self, q: &QueryBuf) -> Result<Option<T>, AppError>
    where
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_as::<_, T>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_optional(&self.pool).await?)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.execute(&self.pool).await?.rows_affected())
    }
}

#[async_trait]
impl LunchlyStore for PgStore {
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn all_customers(&self) -> Result<Vec<Customer>, AppError> {
        let rows: Vec<CustomerRow> = self.fetch_all(&sql::select_all_customers()).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn customer_by_id(&self, id: i32) -> Result<Option<Customer>, AppError> {
        let row: Option<CustomerRow> = self.fetch_optional(&sql::select_customer_by_id(id)).await?;
        Ok(row.map(Customer::from))
    }

    async fn customers_named(&self, names: &[String]) -> Result<Vec<Customer>, AppError> {
        let rows: Vec<CustomerRow> = self.fetch_all(&sql::select_customers_by_names(names)).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn insert_customer(&self, fields: &CustomerFields) -> Result<i32, AppError> {
        let q = sql::insert_customer(fields);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query_scalar::<_, i32>(&q.sql);
        for p in &q.params {
            query = query.bind(p.clone());
        }
        Ok(query.fetch_one(&self.pool).await?)
    }

    async fn update_customer(&self, id: i32, fields: &CustomerFields) -> Result<bool, AppError> {
        let affected = self.execute(&sql::update_customer(id, fields)).await?;
        Ok(affected > 0)
    }

    async fn top_customers_by_reservations(&self, limit: i64) -> Result<Vec<TopCustomer>, AppError> {
        let rows: Vec<TopCustomerRow> = self
            .fetch_all(&sql::select_top_customers_by_reservations(limit))
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| TopCustomer {
                customer: r.customer.into(),
                num_reservations: r.num_reservations,
            })
            .collect())
    }

    async fn reservations_for_customer(&self, customer_id: i32) -> Result<Vec<Reservation>, AppError> {
        let rows: Vec<ReservationRow> = self
            .fetch_all(&sql::select_reservations_for_customer(customer_id))
            .await?;
        Ok(rows.into_iter().map(Reservation::from).collect())
    }

    async fn insert_reservation(&self, reservation: &NewReservation) -> Result<Reservation, AppError> {
        let q = sql::insert_reservation(reservation);
        match self.fetch_optional::<ReservationRow>(&q).await {
            Ok(Some(row)) => Ok(row.into()),
            Ok(None) => Err(AppError::Db(sqlx::Error::RowNotFound)),
            Err(AppError::Db(e)) if is_foreign_key_violation(&e) => Err(AppError::NotFound(format!(
                "No such customer: {}",
                reservation.customer_id
            ))),
            Err(e) => Err(e),
        }
    }
}

fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|d| d.code())
        .map(|code| code == FOREIGN_KEY_VIOLATION)
        .unwrap_or(false)
}

/// Create the customers and reservations tables (and index) if they do not exist.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in SCHEMA_DDL {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!("schema ready");
    Ok(())
}

/// Connect to the server's `postgres` database and create the target database when missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_database_url(database_url, e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
        tracing::info!(database = %db_name, "created database");
    }
    Ok(())
}

fn invalid_database_url(url: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        key: "DATABASE_URL",
        value: url.to_string(),
        reason,
    }
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| invalid_database_url(url, "no database path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    Ok((format!("{}postgres", base), db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name_from_url() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@localhost:5432/lunchly?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(name, "lunchly");
    }

    #[test]
    fn url_without_path_is_a_config_error() {
        assert!(matches!(
            parse_db_name_from_url("lunchly"),
            Err(ConfigError::Invalid { key: "DATABASE_URL", .. })
        ));
    }

    #[tokio::test]
    async fn unparseable_url_is_a_config_error() {
        let result = ensure_database_exists("not a url/lunchly").await;
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::Invalid { key: "DATABASE_URL", .. }))
        ));
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("lunch\"ly"), "\"lunch\"\"ly\"");
    }
}
