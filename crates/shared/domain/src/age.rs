//! Age derivation from a date of birth.

use chrono::{Datelike, NaiveDate, Utc};

/// Source of "today" for age computation.
pub trait Clock: Send + Sync {
    /// Current calendar date
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Whole years between `dob` and `today`.
///
/// The anniversary is the literal `(month, day)` of the birth date and is
/// compared lexicographically, so a February 29 birthday only counts as
/// reached on March 1 in non-leap years. Birth dates after `today` yield 0.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();

    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }

    age.max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn birthday_already_passed_this_year() {
        assert_eq!(age_on(date(2000, 1, 1), date(2024, 6, 15)), 24);
    }

    #[test]
    fn birthday_not_reached_this_year() {
        assert_eq!(age_on(date(2000, 12, 31), date(2024, 6, 15)), 23);
    }

    #[test]
    fn birthday_today_counts_as_reached() {
        assert_eq!(age_on(date(1990, 6, 15), date(2024, 6, 15)), 34);
    }

    #[test]
    fn day_before_birthday() {
        assert_eq!(age_on(date(1990, 6, 16), date(2024, 6, 15)), 33);
    }

    #[test]
    fn same_month_earlier_day() {
        assert_eq!(age_on(date(1990, 6, 14), date(2024, 6, 15)), 34);
    }

    #[test]
    fn leap_day_birthday_in_non_leap_year() {
        let dob = date(2000, 2, 29);
        assert_eq!(age_on(dob, date(2023, 2, 28)), 22);
        assert_eq!(age_on(dob, date(2023, 3, 1)), 23);
    }

    #[test]
    fn leap_day_birthday_in_leap_year() {
        let dob = date(2000, 2, 29);
        assert_eq!(age_on(dob, date(2024, 2, 28)), 23);
        assert_eq!(age_on(dob, date(2024, 2, 29)), 24);
    }

    #[test]
    fn born_today_is_zero() {
        assert_eq!(age_on(date(2024, 6, 15), date(2024, 6, 15)), 0);
    }

    #[test]
    fn future_birth_date_is_clamped_to_zero() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 6, 15)), 0);
    }

    #[test]
    fn anniversary_rule_holds_across_calendar() {
        let today = date(2024, 6, 15);
        let mut dob = date(1980, 1, 1);
        while dob.year() == 1980 {
            let expected = if (today.month(), today.day()) >= (dob.month(), dob.day()) {
                44
            } else {
                43
            };
            assert_eq!(age_on(dob, today), expected, "dob {}", dob);
            assert_eq!(age_on(dob, today), age_on(dob, today));
            dob = dob.succ_opt().unwrap();
        }
    }

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let clock = FixedClock(date(2024, 6, 15));
        assert_eq!(clock.today(), date(2024, 6, 15));
    }
}
