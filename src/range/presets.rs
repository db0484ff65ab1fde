//! Preset date ranges
//!
//! Computed from an explicit "now" so callers (and tests) control the clock.
//! Day boundaries are taken in `now`'s time zone; the resulting ranges are UTC.

use std::str::FromStr;

use chrono::{DateTime, Duration, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::DateRange;

/// Named ranges offered by the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetRange {
    Today,
    Yesterday,
    #[serde(rename = "week")]
    LastWeek,
    #[serde(rename = "month")]
    LastMonth,
    #[serde(rename = "year")]
    LastYear,
    All,
}

impl FromStr for PresetRange {
    type Err = crate::HistoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "today" => Ok(PresetRange::Today),
            "yesterday" => Ok(PresetRange::Yesterday),
            "week" | "lastweek" | "last_week" => Ok(PresetRange::LastWeek),
            "month" | "lastmonth" | "last_month" => Ok(PresetRange::LastMonth),
            "year" | "lastyear" | "last_year" => Ok(PresetRange::LastYear),
            "all" => Ok(PresetRange::All),
            _ => Err(crate::HistoryError::InvalidOption(format!(
                "Unknown range preset: {}",
                s
            ))),
        }
    }
}

/// All preset ranges for one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRanges {
    pub today: DateRange,
    pub yesterday: DateRange,
    pub last_week: DateRange,
    pub last_month: DateRange,
    pub last_year: DateRange,
    pub all: DateRange,
}

impl PresetRanges {
    pub fn get(&self, preset: PresetRange) -> DateRange {
        match preset {
            PresetRange::Today => self.today,
            PresetRange::Yesterday => self.yesterday,
            PresetRange::LastWeek => self.last_week,
            PresetRange::LastMonth => self.last_month,
            PresetRange::LastYear => self.last_year,
            PresetRange::All => self.all,
        }
    }
}

/// Fixed start of the all-time range
pub fn all_time_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// First instant of `date` in `tz`
///
/// Usually local midnight; when a clock change skips midnight, the first
/// hour that exists.
fn start_of_day<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    (0..24)
        .find_map(|hour| {
            tz.from_local_datetime(&date.and_hms_opt(hour, 0, 0)?)
                .earliest()
        })
        .map(|start| start.with_timezone(&Utc))
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN).and_utc())
}

/// Compute every preset range relative to `now`
pub fn preset_ranges<Tz: TimeZone>(now: &DateTime<Tz>) -> PresetRanges {
    let day = Duration::days(1);
    let last_ms = Duration::milliseconds(1);

    let tz = now.timezone();
    let today = now.date_naive();
    let start_of_today = start_of_day(&tz, today);
    let start_of_yesterday = today
        .pred_opt()
        .map(|date| start_of_day(&tz, date))
        .unwrap_or(start_of_today - day);
    let start_of_tomorrow = today
        .succ_opt()
        .map(|date| start_of_day(&tz, date))
        .unwrap_or(start_of_today + day);
    let now_utc = now.with_timezone(&Utc);

    let month_back = now
        .clone()
        .checked_sub_months(Months::new(1))
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(now_utc);
    let year_back = now
        .clone()
        .checked_sub_months(Months::new(12))
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or(now_utc);

    PresetRanges {
        today: DateRange::new(start_of_today, start_of_tomorrow - last_ms),
        yesterday: DateRange::new(start_of_yesterday, start_of_today - last_ms),
        last_week: DateRange::new(now_utc - Duration::days(7), now_utc),
        last_month: DateRange::new(month_back, now_utc),
        last_year: DateRange::new(year_back, now_utc),
        all: DateRange::new(all_time_start(), now_utc),
    }
}
