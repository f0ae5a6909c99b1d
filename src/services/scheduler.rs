use crate::models::company::Company;
use chrono::{DateTime, Datelike, Days, Duration, TimeZone};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Company {0} has no fixed deactivation window; custom days are required")]
    UnresolvedDays(String),
    #[error("Custom days must be positive, got {0}")]
    InvalidCustomDays(i64),
    #[error("Next send date is out of range")]
    OutOfRange,
}

/// Latest year a stored timestamp may carry. Timestamps are kept as RFC 3339
/// text and compared as strings, which only orders four-digit years.
pub const MAX_SCHEDULE_YEAR: i32 = 9999;

/// The day offset a reminder actually uses: the company's fixed window, or
/// the caller's override when the company is "custom" (0 days).
pub fn effective_days(company: &Company, custom_days: Option<i64>) -> Result<u64, ScheduleError> {
    if !company.is_custom() {
        return Ok(u64::from(company.days_before_deactivation));
    }

    match custom_days {
        Some(days) if days >= 1 => Ok(days as u64),
        Some(days) => Err(ScheduleError::InvalidCustomDays(days)),
        None => Err(ScheduleError::UnresolvedDays(company.id.clone())),
    }
}

/// `last_entry_date` plus the effective number of calendar days.
///
/// Days are added to the local wall-clock date, so the time of day is kept
/// across DST transitions. A result falling into a DST gap falls back to
/// elapsed-time addition; an ambiguous one resolves to the earlier instant.
pub fn compute_next_send<Tz: TimeZone>(
    last_entry_date: &DateTime<Tz>,
    company: &Company,
    custom_days: Option<i64>,
) -> Result<DateTime<Tz>, ScheduleError> {
    let next = add_calendar_days(last_entry_date, effective_days(company, custom_days)?)?;
    if !(0..=MAX_SCHEDULE_YEAR).contains(&next.naive_utc().year()) {
        return Err(ScheduleError::OutOfRange);
    }
    Ok(next)
}

fn add_calendar_days<Tz: TimeZone>(
    last_entry_date: &DateTime<Tz>,
    days: u64,
) -> Result<DateTime<Tz>, ScheduleError> {
    let local = last_entry_date
        .naive_local()
        .checked_add_days(Days::new(days))
        .ok_or(ScheduleError::OutOfRange)?;

    if let Some(next) = last_entry_date
        .timezone()
        .from_local_datetime(&local)
        .earliest()
    {
        return Ok(next);
    }

    let elapsed = i64::try_from(days)
        .ok()
        .and_then(Duration::try_days)
        .ok_or(ScheduleError::OutOfRange)?;
    last_entry_date
        .clone()
        .checked_add_signed(elapsed)
        .ok_or(ScheduleError::OutOfRange)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn company(days: u32) -> Company {
        Company {
            id: "acme".into(),
            name: "Acme".into(),
            days_before_deactivation: days,
            policy_link: None,
            activities_to_avoid_deactivation: None,
        }
    }

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_fixed_company_days() {
        let next = compute_next_send(&utc(2024, 1, 1), &company(30), None).unwrap();
        assert_eq!(next, utc(2024, 1, 31));
    }

    #[test]
    fn test_fixed_company_ignores_override() {
        let next = compute_next_send(&utc(2024, 1, 1), &company(30), Some(5)).unwrap();
        assert_eq!(next, utc(2024, 1, 31));
    }

    #[test]
    fn test_custom_company_requires_override() {
        assert_eq!(
            compute_next_send(&utc(2024, 1, 1), &company(0), None),
            Err(ScheduleError::UnresolvedDays("acme".into()))
        );
    }

    #[test]
    fn test_custom_company_uses_override() {
        let next = compute_next_send(&utc(2024, 1, 1), &company(0), Some(45)).unwrap();
        assert_eq!(next, utc(2024, 2, 15));
    }

    #[test]
    fn test_custom_override_must_be_positive() {
        assert_eq!(
            compute_next_send(&utc(2024, 1, 1), &company(0), Some(0)),
            Err(ScheduleError::InvalidCustomDays(0))
        );
    }

    #[test]
    fn test_leap_year() {
        let next = compute_next_send(&utc(2024, 2, 1), &company(29), None).unwrap();
        assert_eq!(next, utc(2024, 3, 1));
    }

    #[test]
    fn test_preserves_time_of_day() {
        let last = utc(2024, 1, 1) + Duration::hours(13) + Duration::minutes(45);
        let next = compute_next_send(&last, &company(1), None).unwrap();
        assert_eq!(next, utc(2024, 1, 2) + Duration::hours(13) + Duration::minutes(45));
    }

    #[test]
    fn test_calendar_days_across_spring_forward() {
        use chrono_tz::America::New_York;

        // 2024-03-10 is the US spring-forward date
        let last = New_York.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap();
        let next = compute_next_send(&last, &company(1), None).unwrap();

        assert_eq!(
            next,
            New_York.with_ymd_and_hms(2024, 3, 10, 10, 0, 0).unwrap()
        );
        assert_eq!(next - last, Duration::hours(23));
    }

    #[test]
    fn test_calendar_days_across_fall_back() {
        use chrono_tz::Europe::Berlin;

        let last = Berlin.with_ymd_and_hms(2024, 10, 26, 9, 0, 0).unwrap();
        let next = compute_next_send(&last, &company(1), None).unwrap();

        assert_eq!(next, Berlin.with_ymd_and_hms(2024, 10, 27, 9, 0, 0).unwrap());
        assert_eq!(next - last, Duration::hours(25));
    }

    #[test]
    fn test_rejects_send_date_past_four_digit_years() {
        assert_eq!(
            compute_next_send(&utc(9999, 6, 1), &company(730), None),
            Err(ScheduleError::OutOfRange)
        );
        let next = compute_next_send(&utc(9999, 1, 1), &company(30), None).unwrap();
        assert_eq!(next, utc(9999, 1, 31));
    }

    #[test]
    fn test_out_of_range() {
        let last = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        assert_eq!(
            compute_next_send(&last, &company(30), None),
            Err(ScheduleError::OutOfRange)
        );
    }
}
