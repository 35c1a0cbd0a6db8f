//! Contact-presence heuristic
//!
//! Best-effort filter deciding whether a place record carries usable contact
//! information. Values are only checked for being non-placeholder text; they
//! are never validated against anything external.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::models::{PlaceRecord, PlaceReview};

/// Shortest value accepted as real contact data.
pub const MIN_CONTACT_LEN: usize = 5;

/// Placeholder phrases providers and users put in empty contact fields.
const PLACEHOLDERS: &[&str] = &[
    "unknown",
    "not informed",
    "not available",
    "n/a",
    "na",
    "none",
    "null",
    "undefined",
    "-",
    "não informado",
    "nao informado",
    "sem informação",
    "sem informacao",
    "sem telefone",
    "sem site",
];

/// Email-shaped token anywhere in free text
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
        .expect("EMAIL_REGEX pattern is valid and well-formed")
});

/// Returns true if `value` looks like real data rather than a placeholder.
pub fn is_meaningful(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.chars().count() < MIN_CONTACT_LEN {
        return false;
    }
    let lowered = trimmed.to_lowercase();
    !PLACEHOLDERS.contains(&lowered.as_str())
}

fn meaningful(value: Option<&str>) -> bool {
    value.map(is_meaningful).unwrap_or(false)
}

/// First email-shaped token found in review text.
pub fn find_email(reviews: &[PlaceReview]) -> Option<String> {
    reviews
        .iter()
        .filter_map(|review| review.text.as_deref())
        .find_map(|text| EMAIL_REGEX.find(text))
        .map(|m| m.as_str().to_string())
}

// == Contact Summary ==
/// Which contact channels a record has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContactSummary {
    pub phone: bool,
    pub website: bool,
    pub email: bool,
}

impl ContactSummary {
    pub fn of(place: &PlaceRecord) -> Self {
        Self {
            phone: meaningful(place.formatted_phone_number.as_deref())
                || meaningful(place.international_phone_number.as_deref()),
            website: meaningful(place.website.as_deref()),
            email: find_email(&place.reviews).is_some(),
        }
    }

    pub fn any(&self) -> bool {
        self.phone || self.website || self.email
    }
}

/// True when at least one contact channel passes the placeholder check.
pub fn has_contact_info(place: &PlaceRecord) -> bool {
    ContactSummary::of(place).any()
}

// == Filter Stats ==
/// Contact coverage of a batch of search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    pub total: usize,
    pub with_phone: usize,
    pub with_website: usize,
    pub with_email: usize,
    pub with_any_contact: usize,
    /// Percentage of records with any contact, rounded
    pub filter_efficiency: u32,
}

impl FilterStats {
    pub fn from_places(places: &[PlaceRecord]) -> Self {
        let mut stats = Self {
            total: places.len(),
            ..Self::default()
        };

        for summary in places.iter().map(ContactSummary::of) {
            stats.with_phone += usize::from(summary.phone);
            stats.with_website += usize::from(summary.website);
            stats.with_email += usize::from(summary.email);
            stats.with_any_contact += usize::from(summary.any());
        }

        if stats.total > 0 {
            let ratio = stats.with_any_contact as f64 / stats.total as f64;
            stats.filter_efficiency = (ratio * 100.0).round() as u32;
        }
        stats
    }
}

/// Drops records whose place id was already seen. First occurrence wins.
pub fn dedup_by_place_id(places: Vec<PlaceRecord>) -> Vec<PlaceRecord> {
    let mut seen = HashSet::new();
    places
        .into_iter()
        .filter(|place| seen.insert(place.place_id.clone()))
        .collect()
}

/// Keeps records with contact info, without duplicates, up to `max_results`.
pub fn filter_with_contact(places: Vec<PlaceRecord>, max_results: usize) -> Vec<PlaceRecord> {
    dedup_by_place_id(places)
        .into_iter()
        .filter(has_contact_info)
        .take(max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_phone(id: &str, phone: &str) -> PlaceRecord {
        PlaceRecord {
            formatted_phone_number: Some(phone.to_string()),
            ..PlaceRecord::new(id, "Place")
        }
    }

    fn with_review(id: &str, text: &str) -> PlaceRecord {
        PlaceRecord {
            reviews: vec![PlaceReview {
                author_name: Some("Ana".to_string()),
                text: Some(text.to_string()),
            }],
            ..PlaceRecord::new(id, "Place")
        }
    }

    #[test]
    fn test_placeholders_rejected() {
        for value in ["", "   ", "Unknown", "N/A", "não informado", "NOT INFORMED", "-"] {
            assert!(!is_meaningful(value), "{:?} should be rejected", value);
        }
    }

    #[test]
    fn test_short_values_rejected() {
        assert!(!is_meaningful("1234"));
        assert!(is_meaningful("12345"));
    }

    #[test]
    fn test_real_values_accepted() {
        assert!(is_meaningful("(11) 5555-0000"));
        assert!(is_meaningful("https://example.com"));
    }

    #[test]
    fn test_phone_counts_as_contact() {
        assert!(has_contact_info(&with_phone("a", "+55 11 5555-0000")));
        assert!(!has_contact_info(&with_phone("a", "unknown")));
    }

    #[test]
    fn test_international_phone_fallback() {
        let place = PlaceRecord {
            formatted_phone_number: Some("n/a".to_string()),
            international_phone_number: Some("+55 11 5555-0000".to_string()),
            ..PlaceRecord::new("a", "Place")
        };
        assert!(ContactSummary::of(&place).phone);
    }

    #[test]
    fn test_email_found_in_reviews() {
        let place = with_review("a", "Ask the owner at owner.shop@example.com.br anytime");
        assert_eq!(
            find_email(&place.reviews).as_deref(),
            Some("owner.shop@example.com.br")
        );
        assert!(has_contact_info(&place));
        assert!(!has_contact_info(&with_review("b", "Lovely place, no contact")));
    }

    #[test]
    fn test_bare_record_has_no_contact() {
        assert!(!has_contact_info(&PlaceRecord::new("a", "Place")));
    }

    #[test]
    fn test_filter_stats() {
        let places = vec![
            with_phone("a", "(11) 5555-0000"),
            PlaceRecord {
                website: Some("https://shop.example".to_string()),
                ..with_phone("b", "(11) 5555-0001")
            },
            with_review("c", "mail me: x@y.io"),
            PlaceRecord::new("d", "Nothing"),
        ];

        let stats = FilterStats::from_places(&places);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.with_phone, 2);
        assert_eq!(stats.with_website, 1);
        assert_eq!(stats.with_email, 1);
        assert_eq!(stats.with_any_contact, 3);
        assert_eq!(stats.filter_efficiency, 75);
    }

    #[test]
    fn test_filter_stats_empty() {
        assert_eq!(FilterStats::from_places(&[]), FilterStats::default());
    }

    #[test]
    fn test_dedup_keeps_first() {
        let places = vec![
            with_phone("a", "first-phone"),
            with_phone("b", "other-phone"),
            with_phone("a", "second-phone"),
        ];
        let unique = dedup_by_place_id(places);

        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].best_phone(), Some("first-phone"));
    }

    #[test]
    fn test_filter_with_contact_limits_results() {
        let places = vec![
            PlaceRecord::new("none", "No contact"),
            with_phone("a", "(11) 5555-0000"),
            with_phone("a", "(11) 5555-0000"),
            with_phone("b", "(11) 5555-0001"),
            with_phone("c", "(11) 5555-0002"),
        ];

        let filtered = filter_with_contact(places, 2);
        let ids: Vec<_> = filtered.iter().map(|p| p.place_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
