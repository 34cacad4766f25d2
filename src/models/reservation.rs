//! Reservations: bookings that always belong to one customer.

use crate::error::AppError;
use crate::store::LunchlyStore;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Formats accepted for a reservation start time, most specific first.
const START_AT_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d %I:%M %p",
];

/// A reservation that has not been written yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewReservation {
    pub customer_id: i32,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reservation {
    pub id: i32,
    pub customer_id: i32,
    pub start_at: NaiveDateTime,
    pub num_guests: i32,
    pub notes: Option<String>,
}

impl NewReservation {
    pub fn new(
        customer_id: i32,
        start_at: NaiveDateTime,
        num_guests: i32,
        notes: Option<String>,
    ) -> Result<Self, AppError> {
        if num_guests < 1 {
            return Err(AppError::Validation("a reservation needs at least one guest".into()));
        }
        Ok(NewReservation {
            customer_id,
            start_at,
            num_guests,
            notes,
        })
    }

    /// Insert only; reservations are never updated.
    pub async fn save(self, store: &dyn LunchlyStore) -> Result<Reservation, AppError> {
        let saved = store.insert_reservation(&self).await?;
        tracing::info!(
            reservation_id = saved.id,
            customer_id = saved.customer_id,
            "reservation created"
        );
        Ok(saved)
    }
}

impl Reservation {
    pub async fn get_reservations_for_customer(
        store: &dyn LunchlyStore,
        customer_id: i32,
    ) -> Result<Vec<Reservation>, AppError> {
        store.reservations_for_customer(customer_id).await
    }

    /// e.g. "January 5th 2024, 6:30 pm"
    pub fn formatted_start_at(&self) -> String {
        let day = self.start_at.day();
        format!(
            "{} {}{} {}",
            self.start_at.format("%B"),
            day,
            ordinal_suffix(day),
            self.start_at.format("%Y, %-I:%M %P")
        )
    }
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// Parse a start time from form input: RFC 3339, a `datetime-local` value, or a bare date (midnight).
pub fn parse_start_at(input: &str) -> Result<NaiveDateTime, AppError> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in START_AT_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| AppError::BadRequest(format!("invalid start time: {}", input)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Customer, CustomerFields};
    use crate::store::MemoryStore;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn parses_form_start_times() {
        assert_eq!(parse_start_at("2024-01-05T18:30").unwrap(), at(2024, 1, 5, 18, 30));
        assert_eq!(parse_start_at("2024-01-05 18:30:00").unwrap(), at(2024, 1, 5, 18, 30));
        assert_eq!(parse_start_at("2024-01-05 6:30 PM").unwrap(), at(2024, 1, 5, 18, 30));
        assert_eq!(parse_start_at("2024-01-05").unwrap(), at(2024, 1, 5, 0, 0));
        assert_eq!(parse_start_at("2024-01-05T18:30:00Z").unwrap(), at(2024, 1, 5, 18, 30));
        assert!(matches!(parse_start_at("next tuesday"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn rejects_zero_guests() {
        assert!(matches!(
            NewReservation::new(1, at(2024, 1, 5, 18, 30), 0, None),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn formats_start_time_for_display() {
        let r = Reservation {
            id: 1,
            customer_id: 1,
            start_at: at(2024, 1, 5, 18, 30),
            num_guests: 2,
            notes: None,
        };
        assert_eq!(r.formatted_start_at(), "January 5th 2024, 6:30 pm");
        assert_eq!(ordinal_suffix(1), "st");
        assert_eq!(ordinal_suffix(12), "th");
        assert_eq!(ordinal_suffix(22), "nd");
        assert_eq!(ordinal_suffix(23), "rd");
    }

    #[tokio::test]
    async fn reservations_are_fetched_per_customer_in_start_order() {
        let store = MemoryStore::new();
        let mut ann = Customer::new(CustomerFields {
            first_name: "Ann".into(),
            last_name: "Lee".into(),
            ..Default::default()
        });
        let ann_id = ann.save(&store).await.unwrap();
        let mut bob = Customer::new(CustomerFields {
            first_name: "Bob".into(),
            last_name: "Ray".into(),
            ..Default::default()
        });
        let bob_id = bob.save(&store).await.unwrap();

        NewReservation::new(ann_id, at(2024, 2, 1, 19, 0), 4, None)
            .unwrap()
            .save(&store)
            .await
            .unwrap();
        NewReservation::new(bob_id, at(2024, 1, 1, 12, 0), 2, None)
            .unwrap()
            .save(&store)
            .await
            .unwrap();
        NewReservation::new(ann_id, at(2024, 1, 15, 12, 0), 2, Some("booth".into()))
            .unwrap()
            .save(&store)
            .await
            .unwrap();

        let mine = ann.get_reservations(&store).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.customer_id == ann_id));
        assert_eq!(mine[0].start_at, at(2024, 1, 15, 12, 0));
        assert_eq!(mine[0].notes.as_deref(), Some("booth"));
    }

    #[tokio::test]
    async fn reservation_for_unknown_customer_is_not_found() {
        let store = MemoryStore::new();
        let result = NewReservation::new(99, at(2024, 1, 5, 18, 30), 2, None)
            .unwrap()
            .save(&store)
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
