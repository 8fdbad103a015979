//! Date ordering and window checks.
//!
//! All comparisons are date-only; callers normalize date-times with
//! `NaiveDateTime::date` first. A check with a missing date passes, since
//! presence is the business of the field rules.

use chrono::{Days, NaiveDate};

use crf_model::{FieldError, ViolationKind};

/// `date` must not fall before `earliest`.
pub fn not_before(
    field: &str,
    date: Option<NaiveDate>,
    earliest: Option<NaiveDate>,
    message: impl FnOnce() -> String,
) -> Result<(), FieldError> {
    if let (Some(date), Some(earliest)) = (date, earliest)
        && date < earliest
    {
        return Err(FieldError::new(field, ViolationKind::TemporalOrder, message()));
    }
    Ok(())
}

/// `date` must fall strictly after `anchor`.
pub fn after(
    field: &str,
    date: Option<NaiveDate>,
    anchor: Option<NaiveDate>,
    message: impl FnOnce() -> String,
) -> Result<(), FieldError> {
    if let (Some(date), Some(anchor)) = (date, anchor)
        && date <= anchor
    {
        return Err(FieldError::new(field, ViolationKind::TemporalOrder, message()));
    }
    Ok(())
}

/// `date` must be at least `days` days after `anchor`.
pub fn at_least_days_after(
    field: &str,
    date: Option<NaiveDate>,
    anchor: Option<NaiveDate>,
    days: u32,
    message: impl FnOnce(NaiveDate) -> String,
) -> Result<(), FieldError> {
    let (Some(date), Some(anchor)) = (date, anchor) else {
        return Ok(());
    };
    let Some(window_opens) = anchor.checked_add_days(Days::new(u64::from(days))) else {
        return Ok(());
    };
    if date < window_opens {
        return Err(FieldError::new(
            field,
            ViolationKind::TemporalWindow,
            message(window_opens),
        ));
    }
    Ok(())
}

/// Two dates that must not fall on the same calendar day.
pub fn distinct_days(
    field: &str,
    date: Option<NaiveDate>,
    other: Option<NaiveDate>,
    message: impl FnOnce() -> String,
) -> Result<(), FieldError> {
    if let (Some(date), Some(other)) = (date, other)
        && date == other
    {
        return Err(FieldError::new(field, ViolationKind::TemporalOrder, message()));
    }
    Ok(())
}
