use crate::models::response::TripResponse;

pub const MONTH_NAMES: [&str; 12] = [
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyRow {
    pub label: String,
    pub count: u32,
}

/// Counts labels in first-encounter order. `rows()` sorts by count
/// descending; the sort is stable so equal counts keep encounter order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Tally {
    counts: Vec<(String, u32)>,
}

impl Tally {
    fn bump(&mut self, label: &str) {
        if let Some(entry) = self.counts.iter_mut().find(|(l, _)| l == label) {
            entry.1 += 1;
        } else {
            self.counts.push((label.to_string(), 1));
        }
    }

    fn rows(&self) -> Vec<TallyRow> {
        let mut rows: Vec<TallyRow> = self
            .counts
            .iter()
            .map(|(label, count)| TallyRow {
                label: label.clone(),
                count: *count,
            })
            .collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    fn total(&self) -> u32 {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    pub locations: u32,
    pub durations: u32,
    pub seasons: u32,
    pub months: u32,
    pub dates: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseSummary {
    pub locations: Vec<TallyRow>,
    pub durations: Vec<TallyRow>,
    pub seasons: Vec<TallyRow>,
    pub months: Vec<TallyRow>,
    pub dates: Vec<TallyRow>,
    pub totals: CategoryTotals,
}

impl ResponseSummary {
    pub fn top_dates(&self, n: usize) -> Vec<TallyRow> {
        self.dates.iter().take(n).cloned().collect()
    }
}

/// Aggregates one trip's responses into frequency tables. Pure: no I/O, no
/// mutation of the input, identical output for identical input.
pub fn summarize(responses: &[TripResponse]) -> ResponseSummary {
    let mut locations = Tally::default();
    let mut durations = Tally::default();
    let mut seasons = Tally::default();
    let mut months = Tally::default();
    let mut dates = Tally::default();

    for resp in responses {
        locations.bump(&resp.location);
        durations.bump(&resp.duration);
        for season in &resp.seasons {
            seasons.bump(season);
        }

        if resp.months.is_empty() {
            // A date only counts when its month can be derived; malformed
            // entries drop out of both tables.
            for date in &resp.dates {
                if let Some(month) = derive_month(date) {
                    months.bump(month);
                    dates.bump(date);
                }
            }
        } else {
            for month in &resp.months {
                months.bump(month);
            }
            for date in &resp.dates {
                dates.bump(date);
            }
        }
    }

    let totals = CategoryTotals {
        locations: locations.total(),
        durations: durations.total(),
        seasons: seasons.total(),
        months: months.total(),
        dates: dates.total(),
    };

    ResponseSummary {
        locations: locations.rows(),
        durations: durations.rows(),
        seasons: seasons.rows(),
        months: months.rows(),
        dates: dates.rows(),
        totals,
    }
}

/// Month name from the second `-`-separated field of a `YYYY-MM-DD` string.
/// Returns None on any malformation.
pub fn derive_month(date: &str) -> Option<&'static str> {
    let mut fields = date.split('-');
    fields.next()?;
    let month: usize = fields.next()?.trim().parse().ok()?;
    if (1..=12).contains(&month) {
        Some(MONTH_NAMES[month - 1])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn response(location: &str, duration: &str, seasons: &[&str], dates: &[&str]) -> TripResponse {
        TripResponse {
            id: 0,
            trip_id: "t".into(),
            participant_name: None,
            location: location.into(),
            duration: duration.into(),
            seasons: seasons.iter().map(|s| s.to_string()).collect(),
            dates: dates.iter().map(|d| d.to_string()).collect(),
            months: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn months_derived_from_dates() {
        let responses = vec![
            response("paris", "Weekend", &[], &["2025-03-01"]),
            response("paris", "Weekend", &[], &["2025-03-15"]),
            response("rome", "Weekend", &[], &["2025-06-01"]),
        ];
        let summary = summarize(&responses);
        assert_eq!(summary.months[0].label, "March");
        assert_eq!(summary.months[0].count, 2);
        assert_eq!(summary.months[1].label, "June");
        assert_eq!(summary.months[1].count, 1);
        assert_eq!(summary.totals.months, 3);
    }

    #[test]
    fn malformed_date_counts_nowhere() {
        let responses = vec![response("paris", "Weekend", &[], &["not-a-date", "2025"])];
        let summary = summarize(&responses);
        assert!(summary.dates.is_empty());
        assert!(summary.months.is_empty());
    }

    #[test]
    fn out_of_range_month_is_skipped() {
        let responses = vec![response("paris", "Weekend", &[], &["2025-13-01", "2025-00-01"])];
        let summary = summarize(&responses);
        assert!(summary.months.is_empty());
        assert!(summary.dates.is_empty());
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let responses = vec![
            response("rome", "Weekend", &["Fall"], &["2025-09-01"]),
            response("paris", "Day trip", &["Spring"], &["2025-04-01"]),
        ];
        let summary = summarize(&responses);
        let labels: Vec<&str> = summary.locations.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["rome", "paris"]);
        let seasons: Vec<&str> = summary.seasons.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(seasons, vec!["Fall", "Spring"]);
    }

    #[test]
    fn explicit_months_take_precedence() {
        let mut resp = response("paris", "Weekend", &[], &["2025-03-01"]);
        resp.months = vec!["July".into()];
        let summary = summarize(&[resp]);
        assert_eq!(summary.months[0].label, "July");
        assert_eq!(summary.dates[0].label, "2025-03-01");
    }

    #[test]
    fn summarize_is_pure() {
        let responses = vec![
            response("paris", "Weekend", &["Summer"], &["2025-07-04", "bogus"]),
            response("berlin", "Day trip", &["Summer", "Fall"], &["2025-07-04"]),
        ];
        assert_eq!(summarize(&responses), summarize(&responses));
    }

    #[test]
    fn top_dates_caps_the_table() {
        let responses: Vec<TripResponse> = (1..=7)
            .map(|day| {
                let date = format!("2025-05-{day:02}");
                response("paris", "Weekend", &[], &[date.as_str()])
            })
            .collect();
        let summary = summarize(&responses);
        assert_eq!(summary.dates.len(), 7);
        assert_eq!(summary.top_dates(5).len(), 5);
    }
}
