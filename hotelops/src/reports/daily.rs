//! Day-by-day series over a trailing window.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use super::percentage;
use crate::db::models::{
    reservations::{Reservation, ReservationStatus},
    rooms::Room,
};

/// Longest trailing window any series covers
pub const MAX_REPORT_DAYS: u32 = 366;

/// The `days` calendar days ending on `today`, oldest first, capped at [`MAX_REPORT_DAYS`]
pub fn trailing_days(today: NaiveDate, days: u32) -> Vec<NaiveDate> {
    (0..days.min(MAX_REPORT_DAYS))
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(u64::from(offset))))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyOccupancy {
    pub date: NaiveDate,
    pub occupied_rooms: usize,
    pub total_rooms: usize,
    /// Capped at 100; arrival and departure days both count toward a stay
    pub occupancy_rate: u32,
}

/// For each day of the window, count non-cancelled stays covering that day.
///
/// A stay covers both its check-in and its check-out date.
pub fn occupancy_by_day(rooms: &[Room], reservations: &[Reservation], today: NaiveDate, days: u32) -> Vec<DailyOccupancy> {
    trailing_days(today, days)
        .into_iter()
        .map(|day| {
            let occupied_rooms = reservations
                .iter()
                .filter(|r| r.status != ReservationStatus::Cancelled && r.covers(day))
                .count();
            DailyOccupancy {
                date: day,
                occupied_rooms,
                total_rooms: rooms.len(),
                occupancy_rate: percentage(occupied_rooms, rooms.len()).min(100),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: Decimal,
    pub bookings: usize,
}

/// For each day of the window, sum the value of non-cancelled reservations checking in that day
pub fn revenue_by_day(reservations: &[Reservation], today: NaiveDate, days: u32) -> Vec<DailyRevenue> {
    trailing_days(today, days)
        .into_iter()
        .map(|day| {
            let arriving: Vec<&Reservation> = reservations
                .iter()
                .filter(|r| r.status != ReservationStatus::Cancelled && r.check_in == day)
                .collect();
            DailyRevenue {
                date: day,
                revenue: arriving.iter().map(|r| r.total_amount).sum(),
                bookings: arriving.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::rooms::RoomStatus;
    use crate::test_utils::{date, reservation, room};

    #[test]
    fn test_trailing_days() {
        let days = trailing_days(date("2024-03-01"), 3);
        assert_eq!(days, vec![date("2024-02-28"), date("2024-02-29"), date("2024-03-01")]);
        assert!(trailing_days(date("2024-03-01"), 0).is_empty());
    }

    #[test]
    fn test_trailing_days_is_capped() {
        let days = trailing_days(date("2024-12-31"), u32::MAX);
        assert_eq!(days.len(), MAX_REPORT_DAYS as usize);
        assert_eq!(days.first(), Some(&date("2024-01-01")));
        assert_eq!(days.last(), Some(&date("2024-12-31")));
        assert_eq!(revenue_by_day(&[], date("2024-12-31"), u32::MAX).len(), MAX_REPORT_DAYS as usize);
    }

    #[test]
    fn test_occupancy_by_day_counts_inclusive_stays() {
        let rooms = vec![
            room("1", "101", "standard", RoomStatus::Available),
            room("2", "102", "standard", RoomStatus::Available),
            room("3", "103", "standard", RoomStatus::Available),
            room("4", "104", "standard", RoomStatus::Available),
        ];
        let mut cancelled = reservation("c", "2024-01-01", "2024-01-05", 100);
        cancelled.status = ReservationStatus::Cancelled;
        let reservations = vec![
            reservation("a", "2024-01-01", "2024-01-03", 200),
            reservation("b", "2024-01-03", "2024-01-04", 100),
            cancelled,
        ];

        let series = occupancy_by_day(&rooms, &reservations, date("2024-01-04"), 4);
        let counts: Vec<_> = series.iter().map(|d| (d.date, d.occupied_rooms, d.occupancy_rate)).collect();
        assert_eq!(
            counts,
            vec![
                (date("2024-01-01"), 1, 25),
                (date("2024-01-02"), 1, 25),
                (date("2024-01-03"), 2, 50),
                (date("2024-01-04"), 1, 25),
            ]
        );
        assert!(series.iter().all(|d| d.total_rooms == 4));
    }

    #[test]
    fn test_occupancy_by_day_caps_rate_and_handles_no_rooms() {
        let rooms = vec![room("1", "101", "standard", RoomStatus::Available)];
        let reservations = vec![
            reservation("a", "2024-01-01", "2024-01-02", 100),
            reservation("b", "2024-01-02", "2024-01-03", 100),
        ];
        let series = occupancy_by_day(&rooms, &reservations, date("2024-01-02"), 1);
        assert_eq!(series[0].occupied_rooms, 2);
        assert_eq!(series[0].occupancy_rate, 100);

        let series = occupancy_by_day(&[], &reservations, date("2024-01-02"), 1);
        assert_eq!(series[0].occupancy_rate, 0);
    }

    #[test]
    fn test_revenue_by_day() {
        let mut cancelled = reservation("c", "2024-01-02", "2024-01-05", 999);
        cancelled.status = ReservationStatus::Cancelled;
        let reservations = vec![
            reservation("a", "2024-01-02", "2024-01-04", 200),
            reservation("b", "2024-01-02", "2024-01-03", 150),
            reservation("d", "2024-01-03", "2024-01-04", 80),
            cancelled,
        ];

        let series = revenue_by_day(&reservations, date("2024-01-03"), 3);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].revenue, Decimal::ZERO);
        assert_eq!(series[0].bookings, 0);
        assert_eq!(series[1].revenue, Decimal::from(350));
        assert_eq!(series[1].bookings, 2);
        assert_eq!(series[2].revenue, Decimal::from(80));
    }
}
