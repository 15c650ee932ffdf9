use chrono::{DateTime, Months, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use forno_core::DomainError;

/// Reporting window, anchored at "now".
///
/// Wire values keep the published Portuguese names (`hoje`, `semana`,
/// `mes`); an absent query parameter defaults to `hoje`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportPeriod {
    #[default]
    #[serde(rename = "hoje")]
    Today,
    #[serde(rename = "semana")]
    Week,
    #[serde(rename = "mes")]
    Month,
}

impl ReportPeriod {
    /// Inclusive lower bound of the window.
    pub fn start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            ReportPeriod::Today => {
                let midnight = now.date_naive().and_hms_opt(0, 0, 0).expect("midnight exists");
                Utc.from_utc_datetime(&midnight)
            }
            ReportPeriod::Week => now - chrono::Duration::days(7),
            ReportPeriod::Month => now
                .checked_sub_months(Months::new(1))
                .unwrap_or(now - chrono::Duration::days(30)),
        }
    }
}

impl core::str::FromStr for ReportPeriod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hoje" => Ok(ReportPeriod::Today),
            "semana" => Ok(ReportPeriod::Week),
            "mes" => Ok(ReportPeriod::Month),
            other => Err(DomainError::validation(format!(
                "unknown report period '{other}' (expected hoje, semana or mes)"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn today_starts_at_utc_midnight() {
        let now = at("2025-03-10T15:30:00Z");
        assert_eq!(ReportPeriod::Today.start(now), at("2025-03-10T00:00:00Z"));
    }

    #[test]
    fn week_reaches_back_seven_days() {
        let now = at("2025-03-10T15:30:00Z");
        assert_eq!(ReportPeriod::Week.start(now), at("2025-03-03T15:30:00Z"));
    }

    #[test]
    fn month_reaches_back_one_calendar_month() {
        let now = at("2025-03-31T12:00:00Z");
        // February has no 31st; chrono clamps to the 28th.
        assert_eq!(ReportPeriod::Month.start(now), at("2025-02-28T12:00:00Z"));
    }

    #[test]
    fn parses_wire_values() {
        assert_eq!("hoje".parse::<ReportPeriod>().unwrap(), ReportPeriod::Today);
        assert_eq!("semana".parse::<ReportPeriod>().unwrap(), ReportPeriod::Week);
        assert_eq!("mes".parse::<ReportPeriod>().unwrap(), ReportPeriod::Month);
        assert!("ano".parse::<ReportPeriod>().is_err());
    }
}
