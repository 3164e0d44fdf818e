//! In-memory filtering and pagination over enquiry and rating lists.
//!
//! The admin console fetches whole collections and narrows them here. Each
//! call receives its filter and page explicitly through a [`ListQuery`];
//! nothing is remembered between calls.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Enquiry, EnquiryStatus, Rating, RatingStatus};

/// Records that can be ordered newest-first
pub trait Timestamped {
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

impl Timestamped for Enquiry {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }
}

impl Timestamped for Rating {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Sort newest first. Records without a timestamp go last and keep their
/// relative order (the sort is stable).
pub fn sort_newest_first<T: Timestamped>(items: &mut [T]) {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}

pub trait ListFilter<T> {
    fn matches(&self, item: &T) -> bool;
}

/// Enquiry filter. Absent or empty fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnquiryFilter {
    /// Case-insensitive substring of the phone number
    pub phone: Option<String>,
    pub status: Option<EnquiryStatus>,
    /// Inclusive lower bound on check-in
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound on check-in
    pub to_date: Option<NaiveDate>,
}

impl ListFilter<Enquiry> for EnquiryFilter {
    fn matches(&self, enquiry: &Enquiry) -> bool {
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.is_empty()) {
            if !enquiry.phone.to_lowercase().contains(&phone.to_lowercase()) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if enquiry.status != status {
                return false;
            }
        }

        if self.from_date.is_none() && self.to_date.is_none() {
            return true;
        }

        // Any date bound excludes enquiries without a check-in
        let Some(check_in) = enquiry.check_in else {
            return false;
        };
        if self.from_date.is_some_and(|from| check_in < from) {
            return false;
        }
        if self.to_date.is_some_and(|to| check_in > to) {
            return false;
        }

        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingFilter {
    pub status: Option<RatingStatus>,
}

impl ListFilter<Rating> for RatingFilter {
    fn matches(&self, rating: &Rating) -> bool {
        self.status.map_or(true, |status| rating.status == status)
    }
}

/// Filter plus 1-indexed page requested by one listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<F> {
    pub filter: F,
    pub page: usize,
}

impl<F: PartialEq> ListQuery<F> {
    pub fn new(filter: F) -> Self {
        Self { filter, page: 1 }
    }

    /// Select a page; page 0 is treated as page 1
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Replace the filter. A different filter starts again at page 1.
    pub fn with_filter(self, filter: F) -> Self {
        if filter == self.filter {
            self
        } else {
            Self::new(filter)
        }
    }
}

impl<F: Default + PartialEq> Default for ListQuery<F> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

/// One page of a filtered list
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Number of records matching the filter
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
    pub total_pages: usize,
}

/// Filter `items` (keeping their order) and cut out the requested page
pub fn apply<T, F>(items: &[T], query: &ListQuery<F>, per_page: usize) -> Page<T>
where
    T: Clone,
    F: ListFilter<T>,
{
    let matching: Vec<T> = items
        .iter()
        .filter(|item| query.filter.matches(item))
        .cloned()
        .collect();

    paginate(matching, query.page, per_page)
}

pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let page = page.max(1);
    let total = items.len();

    let items = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        items,
        total,
        page,
        per_page,
        total_pages: total.div_ceil(per_page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn enquiry(phone: &str, status: EnquiryStatus, check_in: Option<NaiveDate>) -> Enquiry {
        Enquiry {
            id: Uuid::new_v4(),
            name: "Guest".to_string(),
            email: "guest@example.com".to_string(),
            phone: phone.to_string(),
            message: String::new(),
            accommodation: "1 BHK".to_string(),
            check_in,
            check_out: check_in,
            adults: 2,
            children: 0,
            guests: 2,
            status,
            timestamp: None,
        }
    }

    fn sample() -> Vec<Enquiry> {
        vec![
            enquiry("98470 11111", EnquiryStatus::New, Some(date(6, 1))),
            enquiry("98470 22222", EnquiryStatus::Booked, Some(date(6, 10))),
            enquiry("ABC-555", EnquiryStatus::Contacted, None),
            enquiry("77777 22222", EnquiryStatus::Booked, Some(date(7, 2))),
            enquiry("12345", EnquiryStatus::Cancelled, Some(date(5, 20))),
        ]
    }

    fn filters() -> Vec<EnquiryFilter> {
        let mut out = vec![EnquiryFilter::default()];
        for phone in [None, Some("2222"), Some("abc"), Some("")] {
            for status in [None, Some(EnquiryStatus::Booked), Some(EnquiryStatus::New)] {
                for (from, to) in [
                    (None, None),
                    (Some(date(6, 1)), None),
                    (None, Some(date(6, 10))),
                    (Some(date(6, 2)), Some(date(7, 31))),
                ] {
                    out.push(EnquiryFilter {
                        phone: phone.map(str::to_string),
                        status,
                        from_date: from,
                        to_date: to,
                    });
                }
            }
        }
        out
    }

    #[test]
    fn filtered_result_is_ordered_subsequence_satisfying_predicates() {
        let all = sample();
        for filter in filters() {
            let page = apply(&all, &ListQuery::new(filter.clone()), 100);

            // Subsequence preserving order
            let mut cursor = all.iter();
            for item in &page.items {
                assert!(cursor.any(|candidate| candidate.id == item.id));
            }

            for item in &page.items {
                if let Some(phone) = filter.phone.as_deref().filter(|p| !p.is_empty()) {
                    assert!(item.phone.to_lowercase().contains(&phone.to_lowercase()));
                }
                if let Some(status) = filter.status {
                    assert_eq!(item.status, status);
                }
                if let Some(from) = filter.from_date {
                    assert!(item.check_in.is_some_and(|c| c >= from));
                }
                if let Some(to) = filter.to_date {
                    assert!(item.check_in.is_some_and(|c| c <= to));
                }
            }
        }
    }

    #[test]
    fn empty_filter_passes_everything() {
        let all = sample();
        let page = apply(&all, &ListQuery::<EnquiryFilter>::default(), 100);
        assert_eq!(page.total, all.len());
    }

    #[test]
    fn phone_match_is_case_insensitive() {
        let filter = EnquiryFilter {
            phone: Some("abc".to_string()),
            ..Default::default()
        };
        let page = apply(&sample(), &ListQuery::new(filter), 10);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].phone, "ABC-555");
    }

    #[test]
    fn date_bounds_are_inclusive_and_exclude_missing_check_in() {
        let filter = EnquiryFilter {
            from_date: Some(date(6, 1)),
            to_date: Some(date(6, 10)),
            ..Default::default()
        };
        let page = apply(&sample(), &ListQuery::new(filter), 10);
        let check_ins: Vec<_> = page.items.iter().map(|e| e.check_in).collect();
        assert_eq!(check_ins, vec![Some(date(6, 1)), Some(date(6, 10))]);
    }

    #[test]
    fn booked_after_every_check_in_is_empty() {
        let filter = EnquiryFilter {
            status: Some(EnquiryStatus::Booked),
            from_date: Some(date(12, 31)),
            ..Default::default()
        };
        let page = apply(&sample(), &ListQuery::new(filter), 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn pagination_is_one_indexed() {
        let items: Vec<u32> = (1..=23).collect();
        let first = paginate(items.clone(), 1, 10);
        assert_eq!(first.items, (1..=10).collect::<Vec<_>>());
        assert_eq!(first.total_pages, 3);

        let last = paginate(items.clone(), 3, 10);
        assert_eq!(last.items, vec![21, 22, 23]);

        assert!(paginate(items.clone(), 4, 10).items.is_empty());
        assert_eq!(paginate(items, 0, 10).page, 1);
    }

    #[test]
    fn changing_filter_resets_page() {
        let query = ListQuery::new(EnquiryFilter::default()).with_page(3);
        assert_eq!(query.page, 3);

        let same = query.clone().with_filter(EnquiryFilter::default());
        assert_eq!(same.page, 3);

        let changed = query.with_filter(EnquiryFilter {
            status: Some(EnquiryStatus::New),
            ..Default::default()
        });
        assert_eq!(changed.page, 1);
    }

    #[test]
    fn newest_first_with_untimestamped_last() {
        let mut items = sample();
        items[1].timestamp = Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
        items[3].timestamp = Some(Utc.with_ymd_and_hms(2024, 5, 3, 9, 0, 0).unwrap());
        let untimestamped: Vec<Uuid> = [0, 2, 4].iter().map(|&i| items[i].id).collect();
        let newest = items[3].id;
        let older = items[1].id;

        sort_newest_first(&mut items);

        assert_eq!(items[0].id, newest);
        assert_eq!(items[1].id, older);
        let tail: Vec<Uuid> = items[2..].iter().map(|e| e.id).collect();
        assert_eq!(tail, untimestamped);
    }

    #[test]
    fn rating_filter_by_status() {
        let rating = |status| Rating {
            id: Uuid::new_v4(),
            name: "R".to_string(),
            place: String::new(),
            state: String::new(),
            rating: 5.0,
            description: String::new(),
            status,
            created_at: None,
        };
        let all = vec![
            rating(RatingStatus::New),
            rating(RatingStatus::Approved),
            rating(RatingStatus::Rejected),
        ];

        let approved = apply(
            &all,
            &ListQuery::new(RatingFilter {
                status: Some(RatingStatus::Approved),
            }),
            10,
        );
        assert_eq!(approved.total, 1);
        assert_eq!(apply(&all, &ListQuery::<RatingFilter>::default(), 10).total, 3);
    }
}
