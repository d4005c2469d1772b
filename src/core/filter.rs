//! Filtering and sorting for list views.
//!
//! A [`RecordFilter`] combines a case-insensitive text search with a
//! calendar-day match; a record is kept only if it passes both. Kept records
//! are sorted by their primary date, newest first.

use crate::entities::{product, sale, stock_entry};
use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Records that can be matched by a text search.
pub trait Searchable {
    /// Fields the search term is matched against.
    fn search_fields(&self) -> [&str; 3];
}

/// Records that have a primary date used for day filtering and sorting.
pub trait Dated {
    /// The date shown in list views.
    fn primary_date(&self) -> DateTime<Utc>;
}

impl Searchable for product::Model {
    fn search_fields(&self) -> [&str; 3] {
        [self.name.as_str(), self.formula.as_str(), self.company.as_str()]
    }
}

impl Dated for product::Model {
    fn primary_date(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Searchable for sale::Model {
    fn search_fields(&self) -> [&str; 3] {
        [self.product_name.as_str(), self.company.as_str(), ""]
    }
}

impl Dated for sale::Model {
    fn primary_date(&self) -> DateTime<Utc> {
        self.sale_date
    }
}

impl Searchable for stock_entry::Model {
    fn search_fields(&self) -> [&str; 3] {
        [
            self.product_name.as_str(),
            self.company.as_str(),
            self.formula.as_str(),
        ]
    }
}

impl Dated for stock_entry::Model {
    fn primary_date(&self) -> DateTime<Utc> {
        self.entry_date
    }
}

/// Text and calendar-day filter for list views.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    search: Option<String>,
    day: Option<NaiveDate>,
}

impl RecordFilter {
    /// Builds a filter. A blank search term is treated as no search.
    #[must_use]
    pub fn new(search: Option<&str>, day: Option<NaiveDate>) -> Self {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self { search, day }
    }

    /// True when the record contains the search term in any searchable field.
    pub fn matches_search<T: Searchable>(&self, record: &T) -> bool {
        self.search.as_deref().is_none_or(|term| {
            record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(term))
        })
    }

    /// True when the record's date falls on the filter day in `tz`.
    pub fn matches_day_in<T, Tz>(&self, record: &T, tz: &Tz) -> bool
    where
        T: Dated,
        Tz: TimeZone,
    {
        self.day
            .is_none_or(|day| record.primary_date().with_timezone(tz).date_naive() == day)
    }

    /// Text AND day match, with the day evaluated in `tz`.
    pub fn matches_in<T, Tz>(&self, record: &T, tz: &Tz) -> bool
    where
        T: Searchable + Dated,
        Tz: TimeZone,
    {
        self.matches_search(record) && self.matches_day_in(record, tz)
    }

    /// Keeps matching records and sorts them newest first, with calendar days
    /// evaluated in `tz`.
    pub fn apply_in<T, Tz>(&self, records: Vec<T>, tz: &Tz) -> Vec<T>
    where
        T: Searchable + Dated,
        Tz: TimeZone,
    {
        let mut kept: Vec<T> = records
            .into_iter()
            .filter(|r| self.matches_in(r, tz))
            .collect();
        sort_newest_first(&mut kept);
        kept
    }

    /// [`RecordFilter::apply_in`] using the local timezone.
    pub fn apply<T>(&self, records: Vec<T>) -> Vec<T>
    where
        T: Searchable + Dated,
    {
        self.apply_in(records, &Local)
    }
}

/// Sorts records by primary date, most recent first. Ties keep no particular order.
pub fn sort_newest_first<T: Dated>(records: &mut [T]) {
    records.sort_unstable_by_key(|r| std::cmp::Reverse(r.primary_date()));
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::EntryType;

    fn entry(id: i64, name: &str, formula: &str, date: DateTime<Utc>) -> stock_entry::Model {
        stock_entry::Model {
            id,
            product_id: Some(id),
            product_name: name.to_string(),
            company: "Getz Pharma".to_string(),
            formula: formula.to_string(),
            quantity: 5,
            entry_type: EntryType::Existing,
            owner_id: "o".to_string(),
            entry_date: date,
            created_at: date,
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_day_filter_matches_calendar_day() {
        let entries = vec![
            entry(1, "A", "x", utc(2024, 1, 1, 9)),
            entry(2, "B", "x", utc(2024, 1, 1, 23)),
            entry(3, "C", "x", utc(2024, 1, 2, 1)),
        ];
        let filter = RecordFilter::new(None, NaiveDate::from_ymd_opt(2024, 1, 1));

        let kept = filter.apply_in(entries, &Utc);
        let ids: Vec<i64> = kept.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_all_fields() {
        let entries = vec![
            entry(1, "Augmentin", "Amoxicillin", utc(2024, 1, 1, 9)),
            entry(2, "Brufen", "Ibuprofen", utc(2024, 1, 2, 9)),
        ];

        let by_formula = RecordFilter::new(Some("IBUPRO"), None).apply_in(entries.clone(), &Utc);
        assert_eq!(by_formula.len(), 1);
        assert_eq!(by_formula[0].id, 2);

        let by_company = RecordFilter::new(Some("getz"), None).apply_in(entries.clone(), &Utc);
        assert_eq!(by_company.len(), 2);

        let blank = RecordFilter::new(Some("   "), None).apply_in(entries, &Utc);
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn test_search_and_day_are_combined_with_and() {
        let entries = vec![
            entry(1, "Augmentin", "Amoxicillin", utc(2024, 1, 1, 9)),
            entry(2, "Augmentin", "Amoxicillin", utc(2024, 1, 2, 9)),
            entry(3, "Brufen", "Ibuprofen", utc(2024, 1, 1, 10)),
        ];
        let filter = RecordFilter::new(Some("augmentin"), NaiveDate::from_ymd_opt(2024, 1, 1));

        let kept = filter.apply_in(entries, &Utc);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 1);
    }

    #[test]
    fn test_day_is_evaluated_in_given_timezone() {
        let tz = chrono::FixedOffset::east_opt(5 * 3600).unwrap();
        let record = entry(1, "A", "x", utc(2024, 1, 1, 20));
        let filter = RecordFilter::new(None, NaiveDate::from_ymd_opt(2024, 1, 2));

        assert!(filter.matches_day_in(&record, &tz));
        assert!(!filter.matches_day_in(&record, &Utc));
    }

    #[test]
    fn test_sale_search_ignores_customer() {
        let at = utc(2024, 5, 5, 5);
        let sale = sale::Model {
            id: 1,
            product_id: None,
            product_name: "Panadol".to_string(),
            company: "GSK".to_string(),
            customer_name: Some("Bilal".to_string()),
            phone_number: None,
            quantity: 1,
            price: 1.0,
            total: 1.0,
            owner_id: "o".to_string(),
            sale_date: at,
            created_at: at,
        };

        assert!(RecordFilter::new(Some("gsk"), None).matches_search(&sale));
        assert!(!RecordFilter::new(Some("bilal"), None).matches_search(&sale));
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![
            entry(1, "A", "x", utc(2023, 1, 1, 0)),
            entry(2, "B", "x", utc(2025, 1, 1, 0)),
            entry(3, "C", "x", utc(2024, 1, 1, 0)),
        ];
        sort_newest_first(&mut entries);
        let ids: Vec<i64> = entries.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
