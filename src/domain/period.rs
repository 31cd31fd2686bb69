use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Reporting window for the cash-flow summary: start of the calendar bucket
/// through "now". Buckets are computed in UTC, matching the stored
/// timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryPeriod {
    Today,
    Week,
    Month,
    Year,
}

impl SummaryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryPeriod::Today => "today",
            SummaryPeriod::Week => "week",
            SummaryPeriod::Month => "month",
            SummaryPeriod::Year => "year",
        }
    }

    /// Parse a period name. Unknown values fall back to `Today`, mirroring
    /// the query-string contract of the summary endpoint.
    pub fn parse_or_today(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "week" => SummaryPeriod::Week,
            "month" => SummaryPeriod::Month,
            "year" => SummaryPeriod::Year,
            _ => SummaryPeriod::Today,
        }
    }

    /// Half-open window `[start, now)` for this period at instant `now`.
    /// Weeks start on Monday; months on the 1st; years on January 1st.
    pub fn range(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let midnight = now.date_naive().and_hms_opt(0, 0, 0).unwrap();
        let start = match self {
            SummaryPeriod::Today => midnight,
            SummaryPeriod::Week => {
                let weekday = now.weekday().num_days_from_monday();
                midnight - Duration::days(weekday as i64)
            }
            SummaryPeriod::Month => now
                .date_naive()
                .with_day(1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            SummaryPeriod::Year => now
                .date_naive()
                .with_month(1)
                .unwrap()
                .with_day(1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        };
        (DateTime::from_naive_utc_and_offset(start, Utc), now)
    }
}

impl std::fmt::Display for SummaryPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_today_starts_at_midnight() {
        let now = at("2024-03-15T14:30:00Z");
        let (start, end) = SummaryPeriod::Today.range(now);
        assert_eq!(start, at("2024-03-15T00:00:00Z"));
        assert_eq!(end, now);
    }

    #[test]
    fn test_week_starts_on_monday() {
        // 2024-03-15 is a Friday
        let now = at("2024-03-15T14:30:00Z");
        let (start, _) = SummaryPeriod::Week.range(now);
        assert_eq!(start, at("2024-03-11T00:00:00Z"));
    }

    #[test]
    fn test_month_starts_on_first() {
        let now = at("2024-03-15T14:30:00Z");
        let (start, _) = SummaryPeriod::Month.range(now);
        assert_eq!(start, at("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn test_year_starts_on_january_first() {
        let now = at("2024-06-15T12:00:00Z");
        let (start, _) = SummaryPeriod::Year.range(now);
        assert_eq!(start, at("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_parse_defaults_to_today() {
        assert_eq!(SummaryPeriod::parse_or_today("month"), SummaryPeriod::Month);
        assert_eq!(SummaryPeriod::parse_or_today("WEEK"), SummaryPeriod::Week);
        assert_eq!(SummaryPeriod::parse_or_today("fortnight"), SummaryPeriod::Today);
        assert_eq!(SummaryPeriod::parse_or_today(""), SummaryPeriod::Today);
    }
}
