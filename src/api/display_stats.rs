//! Placeholder reader stats.
//!
//! The catalog exposes no ratings or view counts, so cards show numbers derived
//! from the title id. They are stable per title and carry no meaning.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayStats {
    pub rating: f64,
    pub views: u64,
    pub views_label: String,
}

impl DisplayStats {
    pub fn for_id(id: &str) -> Self {
        let views = display_views(id);
        Self {
            rating: display_rating(id),
            views,
            views_label: format_views(views),
        }
    }
}

/// Rating between 4.0 and 4.9 taken from the first eight hex digits
pub fn display_rating(id: &str) -> f64 {
    let seed = hex_window(id, 0..8);
    4.0 + (seed % 10) as f64 / 10.0
}

/// View count between 1,000,000 and 9,999,000 taken from hex digits 8..16
pub fn display_views(id: &str) -> u64 {
    let seed = hex_window(id, 8..16);
    ((seed % 9000) + 1000) * 1000
}

pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        format!("{:.1}M", views as f64 / 1_000_000.0)
    } else if views >= 1_000 {
        format!("{:.0}K", views as f64 / 1_000.0)
    } else {
        views.to_string()
    }
}

/// Leading hex digits of `id[range]`; non-hex text yields 0
fn hex_window(id: &str, range: std::ops::Range<usize>) -> u64 {
    let window = id.get(range).unwrap_or_default();
    let digits: String = window.chars().take_while(char::is_ascii_hexdigit).collect();
    u64::from_str_radix(&digits, 16).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "32d76d19-8a05-4db0-9fc2-e0b0648fe9d0";

    #[test]
    fn test_stats_are_stable_and_bounded() {
        let stats = DisplayStats::for_id(ID);
        assert_eq!(stats, DisplayStats::for_id(ID));
        assert!((4.0..5.0).contains(&stats.rating));
        assert!((1_000_000..10_000_000).contains(&stats.views));
    }

    #[test]
    fn test_rating_from_prefix() {
        // 0x32d76d19 % 10 == 9
        assert_eq!(display_rating(ID), 4.9);
    }

    #[test]
    fn test_views_stop_at_first_non_hex_digit() {
        // id[8..16] is "-8a05-4d", which parses as nothing
        assert_eq!(display_views(ID), 1_000_000);
        assert_eq!(display_views("short"), 1_000_000);
    }

    #[test]
    fn test_format_views() {
        assert_eq!(format_views(2_500_000), "2.5M");
        assert_eq!(format_views(345_000), "345K");
        assert_eq!(format_views(999), "999");
    }
}
