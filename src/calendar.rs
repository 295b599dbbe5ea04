//! Day-of-year ↔ slug conversions over a fixed leap-year calendar.
//!
//! Readings are keyed by day-of-year 1–366. February always has 29 days in
//! this table, so day 60 is `february-29` and day 61 is `march-1` every year.
//! Real dates are mapped onto the same table by [`today_day_of_year`], which
//! means a non-leap year simply never lands on day 60.
//!
//! ```text
//!   1 → january-1      60 → february-29     366 → december-31
//!  32 → february-1     61 → march-1
//! ```

use chrono::{Datelike, NaiveDate};
use std::ops::RangeInclusive;

/// Month lengths with February fixed at 29.
pub const MONTH_DAYS: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MONTH_SLUGS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DAYS_IN_YEAR: u16 = 366;

/// Walk the month table. Returns `(month_index, day_within_month)`.
///
/// Out-of-range input fails closed: `0` is treated as January 1 and anything
/// past 366 as December 31.
fn locate(day: u16) -> (usize, u8) {
    if day > DAYS_IN_YEAR {
        return (11, 31);
    }
    let mut remaining = day.max(1);
    for (idx, &len) in MONTH_DAYS.iter().enumerate() {
        if remaining <= u16::from(len) {
            return (idx, remaining as u8);
        }
        remaining -= u16::from(len);
    }
    (11, 31)
}

/// `60` → `"february-29"`.
pub fn day_to_slug(day: u16) -> String {
    let (month, dom) = locate(day);
    format!("{}-{}", MONTH_SLUGS[month], dom)
}

/// 0-based month index of a day-of-year.
pub fn day_to_month_index(day: u16) -> usize {
    locate(day).0
}

/// Day number within its month (1–31).
pub fn day_within_month(day: u16) -> u8 {
    locate(day).1
}

/// `60` → `"February 29"`.
pub fn display_date(day: u16) -> String {
    let (month, dom) = locate(day);
    format!("{} {}", MONTH_NAMES[month], dom)
}

/// Day-of-year for a 0-based month and 1-based day, or `None` if the pair
/// does not exist in the fixed table.
pub fn day_of_year(month: usize, day: u8) -> Option<u16> {
    let len = *MONTH_DAYS.get(month)?;
    if day == 0 || day > len {
        return None;
    }
    let before: u16 = MONTH_DAYS[..month].iter().map(|&d| u16::from(d)).sum();
    Some(before + u16::from(day))
}

/// Inverse of [`day_to_slug`].
pub fn slug_to_day(slug: &str) -> Option<u16> {
    let (month, day) = slug.rsplit_once('-')?;
    let month = MONTH_SLUGS.iter().position(|m| *m == month)?;
    // Reject "january-01" and friends so the mapping stays one-to-one.
    if day.starts_with('0') {
        return None;
    }
    day_of_year(month, day.parse().ok()?)
}

/// Position of a real calendar date on the fixed table.
pub fn today_day_of_year(date: NaiveDate) -> u16 {
    // Every real (month, day) pair exists in the leap-year table.
    day_of_year(date.month0() as usize, date.day() as u8).unwrap_or(1)
}

pub fn month_slug(month: usize) -> &'static str {
    MONTH_SLUGS[month.min(11)]
}

pub fn month_name(month: usize) -> &'static str {
    MONTH_NAMES[month.min(11)]
}

pub fn month_len(month: usize) -> u8 {
    MONTH_DAYS[month.min(11)]
}

/// Index of a month by slug or display name, case-insensitive.
pub fn month_index(name: &str) -> Option<usize> {
    let name = name.trim();
    MONTH_SLUGS.iter().position(|m| m.eq_ignore_ascii_case(name))
}

/// The four week windows of a month archive: 1–7, 8–14, 15–21, 22–end.
pub fn week_windows(month_len: u8) -> [RangeInclusive<u8>; 4] {
    [1..=7, 8..=14, 15..=21, 22..=month_len]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_slugs() {
        assert_eq!(day_to_slug(1), "january-1");
        assert_eq!(day_to_slug(31), "january-31");
        assert_eq!(day_to_slug(32), "february-1");
        assert_eq!(day_to_slug(60), "february-29");
        assert_eq!(day_to_slug(61), "march-1");
        assert_eq!(day_to_slug(366), "december-31");
    }

    #[test]
    fn out_of_range_fails_closed() {
        assert_eq!(day_to_slug(367), "december-31");
        assert_eq!(day_to_slug(u16::MAX), "december-31");
        assert_eq!(day_to_slug(0), "january-1");
        assert_eq!(day_to_month_index(400), 11);
    }

    #[test]
    fn slugs_are_a_bijection_over_the_year() {
        let mut seen = HashSet::new();
        for day in 1..=DAYS_IN_YEAR {
            let slug = day_to_slug(day);
            let (month, dom) = slug.rsplit_once('-').unwrap();
            let idx = month_index(month).expect("valid month name");
            let dom: u8 = dom.parse().unwrap();
            assert!(dom >= 1 && dom <= month_len(idx), "{slug} out of month");
            assert!(seen.insert(slug.clone()), "duplicate slug {slug}");
            assert_eq!(slug_to_day(&slug), Some(day));
        }
        assert_eq!(seen.len(), 366);
    }

    #[test]
    fn slug_to_day_rejects_invalid() {
        assert_eq!(slug_to_day("february-30"), None);
        assert_eq!(slug_to_day("january-0"), None);
        assert_eq!(slug_to_day("january-01"), None);
        assert_eq!(slug_to_day("smarch-1"), None);
        assert_eq!(slug_to_day("january"), None);
    }

    #[test]
    fn today_agrees_with_slug_walk() {
        // A leap year covers all 366 positions, Feb 29 included.
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for day in 1..=DAYS_IN_YEAR {
            assert_eq!(today_day_of_year(date), day);
            assert_eq!(
                day_to_slug(day),
                format!("{}-{}", month_slug(date.month0() as usize), date.day())
            );
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn march_first_is_fixed_in_common_years() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        assert_eq!(today_day_of_year(date), 61);
    }

    #[test]
    fn month_index_and_position_agree() {
        assert_eq!(day_to_month_index(1), 0);
        assert_eq!(day_to_month_index(60), 1);
        assert_eq!(day_to_month_index(61), 2);
        assert_eq!(day_within_month(61), 1);
        assert_eq!(month_index("March"), Some(2));
    }

    #[test]
    fn week_windows_cover_month_exactly() {
        for len in [29u8, 30, 31] {
            let windows = week_windows(len);
            let mut days: Vec<u8> = windows.iter().flat_map(|w| w.clone()).collect();
            let total = days.len();
            days.dedup();
            assert_eq!(total, days.len(), "windows overlap");
            assert_eq!(days, (1..=len).collect::<Vec<_>>());
        }
        let sizes: Vec<usize> = week_windows(31).iter().map(|w| w.clone().count()).collect();
        assert_eq!(sizes, vec![7, 7, 7, 10]);
        assert_eq!(week_windows(29)[3].clone().count(), 8);
    }
}
