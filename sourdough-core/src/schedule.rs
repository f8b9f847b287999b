//! Starter health state machine and feeding scheduler.
//!
//! Health rules, first match wins:
//! 1. inactive → `Inactive` (only the caller toggling `is_active` leaves it)
//! 2. more than 24 h past the due time → `Poor`
//! 3. past the due time at all → `Fair`
//! 4. average activity: ≥4.5 `Excellent`, ≥3.5 `Good`, ≥2.5 `Fair`, else `Poor`
//! 5. `Good`

use crate::error::{Error, Result};
use crate::types::{FeedingLog, HealthStatus, Starter};
use chrono::{DateTime, Duration, Utc};

const POOR_AFTER_HOURS: i64 = 24;

/// Fails when the due time falls outside the representable date range.
pub fn next_feeding_due(
    last_fed_at: DateTime<Utc>,
    frequency_hours: u32,
) -> Result<DateTime<Utc>> {
    last_fed_at
        .checked_add_signed(Duration::hours(i64::from(frequency_hours)))
        .ok_or_else(|| {
            Error::invalid(format!(
                "next feeding {frequency_hours} hours after {last_fed_at} is out of range"
            ))
        })
}

pub fn is_overdue(now: DateTime<Utc>, next_feeding_due: DateTime<Utc>) -> bool {
    now > next_feeding_due
}

pub fn classify(
    is_active: bool,
    now: DateTime<Utc>,
    next_feeding_due: Option<DateTime<Utc>>,
    avg_activity_level: Option<f64>,
) -> HealthStatus {
    if !is_active {
        return HealthStatus::Inactive;
    }
    if let Some(due) = next_feeding_due {
        if now - due > Duration::hours(POOR_AFTER_HOURS) {
            return HealthStatus::Poor;
        }
        if is_overdue(now, due) {
            return HealthStatus::Fair;
        }
    }
    match avg_activity_level {
        Some(a) if a >= 4.5 => HealthStatus::Excellent,
        Some(a) if a >= 3.5 => HealthStatus::Good,
        Some(a) if a >= 2.5 => HealthStatus::Fair,
        Some(_) => HealthStatus::Poor,
        None => HealthStatus::Good,
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

/// "Overdue by 2 hours" / "Due in 45 minutes".
///
/// The difference is rounded to whole minutes first. Under an hour is shown
/// in minutes, under a day in hours, otherwise in days, each rounded to the
/// nearest whole unit and carried into the next unit when it rounds up to it.
pub fn human_feeding_text(now: DateTime<Utc>, next_feeding_due: DateTime<Utc>) -> String {
    let overdue = is_overdue(now, next_feeding_due);
    let secs = (now - next_feeding_due).num_seconds().unsigned_abs() as f64;
    let minutes = (secs / 60.0).round();
    let hours = (minutes / 60.0).round();

    let amount = if minutes < 60.0 {
        plural(minutes as i64, "minute")
    } else if hours < 24.0 {
        plural(hours as i64, "hour")
    } else {
        plural((minutes / 1440.0).round() as i64, "day")
    };

    if overdue {
        format!("Overdue by {amount}")
    } else {
        format!("Due in {amount}")
    }
}

/// Mean activity level of the logs belonging to `starter_id` that carry one.
pub fn average_activity(starter_id: &str, logs: &[FeedingLog]) -> Option<f64> {
    let levels: Vec<f64> = logs
        .iter()
        .filter(|l| l.starter_id() == starter_id)
        .filter_map(|l| l.activity_level())
        .map(f64::from)
        .collect();
    if levels.is_empty() {
        None
    } else {
        Some(levels.iter().sum::<f64>() / levels.len() as f64)
    }
}

/// Snapshot of where a starter stands right now.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedingStatus {
    /// Firing time for a feeding reminder.
    pub due_at: Option<DateTime<Utc>>,
    pub overdue: bool,
    pub text: Option<String>,
    pub health: HealthStatus,
}

pub fn feeding_status(starter: &Starter, now: DateTime<Utc>) -> FeedingStatus {
    let due_at = starter.next_feeding_due_at;
    FeedingStatus {
        due_at,
        overdue: due_at.is_some_and(|d| is_overdue(now, d)),
        text: due_at.map(|d| human_feeding_text(now, d)),
        health: classify(starter.is_active, now, due_at, starter.avg_activity_level),
    }
}

impl Starter {
    /// Record a feeding at `at`; the next due time follows from the frequency.
    pub fn fed_at(&self, at: DateTime<Utc>) -> Result<Starter> {
        Ok(Starter {
            last_fed_at: Some(at),
            next_feeding_due_at: Some(next_feeding_due(at, self.feeding_frequency_hours)?),
            ..self.clone()
        })
    }

    pub fn with_feeding_frequency(&self, hours: u32) -> Result<Starter> {
        if hours == 0 {
            return Err(Error::invalid("feeding frequency must be > 0 hours"));
        }
        Ok(Starter {
            feeding_frequency_hours: hours,
            next_feeding_due_at: self
                .last_fed_at
                .map(|at| next_feeding_due(at, hours))
                .transpose()?,
            ..self.clone()
        })
    }

    /// Deactivating marks the starter `Inactive`; reactivating resets it to
    /// `Good` until the next [`Starter::refreshed`].
    pub fn with_active(&self, is_active: bool) -> Starter {
        Starter {
            is_active,
            health_status: if is_active {
                HealthStatus::Good
            } else {
                HealthStatus::Inactive
            },
            ..self.clone()
        }
    }

    pub fn with_activity_from_logs(&self, logs: &[FeedingLog]) -> Starter {
        Starter {
            avg_activity_level: average_activity(&self.id, logs),
            ..self.clone()
        }
    }

    /// Reclassify health as of `now`.
    pub fn refreshed(&self, now: DateTime<Utc>) -> Starter {
        let health_status = classify(
            self.is_active,
            now,
            self.next_feeding_due_at,
            self.avg_activity_level,
        );
        if health_status != self.health_status {
            tracing::debug!(
                starter = %self.id,
                from = %self.health_status,
                to = %health_status,
                "starter health changed"
            );
        }
        Starter {
            health_status,
            ..self.clone()
        }
    }
}
