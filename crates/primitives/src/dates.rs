//! Month-end date arithmetic.

use chrono::{Datelike, Months};

use crate::Date;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Last calendar day of the month containing `date`.
#[must_use]
pub fn month_end(date: Date) -> Date {
    let first = date.with_day(1).unwrap_or(date);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Shift `date` by `months` calendar months and normalize to month end.
///
/// Shifting the first of the month avoids the day-of-month saturation that
/// would otherwise turn 2020-02-29 + 1 month into 2020-03-29.
///
/// Returns `None` if the result falls outside the representable date range.
#[must_use]
pub fn shift_month_end(date: Date, months: i32) -> Option<Date> {
    let first = date.with_day(1)?;
    let shifted = if months >= 0 {
        first.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(months.unsigned_abs()))
    }?;
    Some(month_end(shifted))
}

/// Convert a physical polars `Date` value (days since the Unix epoch).
#[must_use]
pub fn days_to_date(days: i32) -> Option<Date> {
    Date::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Physical polars `Date` value of `date` (days since the Unix epoch).
#[must_use]
pub fn date_to_days(date: Date) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(ymd(2020, 1, 15), ymd(2020, 1, 31))]
    #[case(ymd(2020, 2, 1), ymd(2020, 2, 29))]
    #[case(ymd(2021, 2, 28), ymd(2021, 2, 28))]
    #[case(ymd(2023, 12, 31), ymd(2023, 12, 31))]
    fn month_end_cases(#[case] input: Date, #[case] expected: Date) {
        assert_eq!(month_end(input), expected);
    }

    #[rstest]
    #[case(ymd(2020, 1, 31), 1, ymd(2020, 2, 29))]
    #[case(ymd(2020, 2, 29), 1, ymd(2020, 3, 31))]
    #[case(ymd(2020, 12, 31), 1, ymd(2021, 1, 31))]
    #[case(ymd(2020, 3, 31), -1, ymd(2020, 2, 29))]
    fn shift_lands_on_month_end(#[case] input: Date, #[case] months: i32, #[case] expected: Date) {
        assert_eq!(shift_month_end(input, months), Some(expected));
    }

    #[test]
    fn epoch_days_round_trip_anchor() {
        assert_eq!(days_to_date(0), Some(ymd(1970, 1, 1)));
        assert_eq!(date_to_days(ymd(1970, 1, 2)), 1);
        assert_eq!(date_to_days(ymd(1969, 12, 31)), -1);
    }
}
