use chrono::{DateTime, Utc};

use crate::listing::ServiceKind;

/// Number of chargeable days for a stay or rental.
///
/// Same-day and inverted ranges floor to one day. That is the contract the
/// frontend was built against, not an error case.
pub fn stay_days(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> i64 {
    let end = end.unwrap_or(start);
    (end - start).num_days().max(1)
}

/// The per-kind pricing rule. `unit_price` is the rate field the listing
/// carries for its kind (per night, per day, per person, per ticket, or
/// flat for property).
pub fn total_price(kind: ServiceKind, unit_price: f64, days: i64, guests: i32) -> f64 {
    match kind {
        ServiceKind::Hotel => unit_price * days as f64 * guests as f64,
        ServiceKind::Car => unit_price * days as f64,
        ServiceKind::Event => unit_price * guests as f64,
        ServiceKind::Tour => unit_price * guests as f64,
        ServiceKind::RealEstate => unit_price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn hotel_price_is_rate_times_days_times_guests() {
        let days = stay_days(day(2025, 1, 1), Some(day(2025, 1, 3)));
        assert_eq!(days, 2);
        assert_eq!(total_price(ServiceKind::Hotel, 100.0, days, 2), 400.0);
    }

    #[test]
    fn car_price_ignores_guests() {
        let days = stay_days(day(2025, 3, 10), Some(day(2025, 3, 14)));
        assert_eq!(total_price(ServiceKind::Car, 45.0, days, 5), 180.0);
    }

    #[test]
    fn event_and_tour_price_per_guest() {
        assert_eq!(total_price(ServiceKind::Event, 25.0, 1, 4), 100.0);
        assert_eq!(total_price(ServiceKind::Tour, 285.0, 3, 2), 570.0);
    }

    #[test]
    fn real_estate_is_flat_regardless_of_guests_and_dates() {
        assert_eq!(total_price(ServiceKind::RealEstate, 125000.0, 30, 5), 125000.0);
    }

    #[test]
    fn same_day_and_inverted_ranges_floor_to_one_day() {
        assert_eq!(stay_days(day(2025, 1, 1), Some(day(2025, 1, 1))), 1);
        assert_eq!(stay_days(day(2025, 1, 5), Some(day(2025, 1, 2))), 1);
        assert_eq!(stay_days(day(2025, 1, 1), None), 1);
    }
}
