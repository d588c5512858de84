//! Lotte Arai Resort: English weather panel plus the slope conditions page.
//!
//! Lift states are drawn as icons next to a legend
//! ("● Running | △ Preparing | × Service suspended"), so the status comes
//! from which legend entries appear rather than from counts.

use crate::models::{ResortStatus, ScrapedStatus};
use crate::utils::text::{capture_int, leading_float, leading_int, value_after};

use super::SiteAdapter;

pub struct LotteArai;

impl SiteAdapter for LotteArai {
    fn resort_id(&self) -> &'static str {
        "lotte-arai"
    }

    fn urls(&self) -> &'static [&'static str] {
        &[
            "https://www.lottehotel.com/arai-resort/en",
            "https://www.lottehotel.com/arai-resort/en/snow-season",
        ]
    }

    fn produce(&self, page_text: &str) -> ScrapedStatus {
        let base_depth_cm = value_after(page_text, "Total Snowfall")
            .and_then(leading_int)
            .and_then(|n| u32::try_from(n).ok());
        let temperature = value_after(page_text, "current weather").and_then(leading_float);
        let lifts_open = capture_int(page_text, r"(?i)(\d+)\s*/\s*\d+\s*lift");
        let slopes_open = capture_int(page_text, r"(?i)(\d+)\s*/\s*\d+\s*course");

        let running = page_text.contains("Running");
        let suspended = page_text.contains("Service suspended") || page_text.contains('×');
        let status = match (running, suspended) {
            (true, true) => ResortStatus::Partial,
            (true, false) => ResortStatus::Open,
            (false, true) => ResortStatus::Closed,
            (false, false) => ResortStatus::Unknown,
        };

        ScrapedStatus {
            status,
            base_depth_cm,
            lifts_open,
            slopes_open,
            temperature,
            weather: None,
            ..ScrapedStatus::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_panel_and_counts() {
        let page = "LOTTE ARAI RESORT\ncurrent weather\n-2.5℃\nTotal Snowfall\n209 ㎝\nNew snow\n0 ㎝\n\
                    Slope conditions\n3 / 5 lifts\n8/14 courses\n● Running\n△ Preparing";
        let status = LotteArai.produce(page);
        assert_eq!(status.status, ResortStatus::Open);
        assert_eq!(status.base_depth_cm, Some(209));
        assert_eq!(status.temperature, Some(-2.5));
        assert_eq!(status.lifts_open, Some(3));
        assert_eq!(status.slopes_open, Some(8));
        assert!(status.weather.is_none());
    }

    #[test]
    fn test_legend_combinations() {
        assert_eq!(
            LotteArai.produce("● Running | × Service suspended").status,
            ResortStatus::Partial
        );
        assert_eq!(
            LotteArai.produce("Service suspended").status,
            ResortStatus::Closed
        );
        assert_eq!(LotteArai.produce("Welcome").status, ResortStatus::Unknown);
    }
}
