//! Madarao Mountain Resort: Japanese status board.
//!
//! ```text
//! 積雪
//! 120 cm
//! 気温
//! -3 ℃
//! 天候
//! 雪
//! 本日の営業 リフト7基、18コース
//! ```

use crate::models::ScrapedStatus;
use crate::utils::text::{capture_int, leading_float, leading_int, value_after};

use super::{SiteAdapter, status_from_lifts};

const LIFTS_TOTAL: u32 = 10;

pub struct Madarao;

impl SiteAdapter for Madarao {
    fn resort_id(&self) -> &'static str {
        "madarao"
    }

    fn urls(&self) -> &'static [&'static str] {
        &["https://www.madarao.jp/ski"]
    }

    fn produce(&self, page_text: &str) -> ScrapedStatus {
        let base_depth_cm = value_after(page_text, "積雪")
            .and_then(leading_int)
            .and_then(|n| u32::try_from(n).ok());
        let temperature = value_after(page_text, "気温").and_then(leading_float);
        let weather = value_after(page_text, "天候").map(str::to_string);
        let lifts_open = capture_int(page_text, r"リフト\s*(\d+)");
        let slopes_open = capture_int(page_text, r"基、\s*(\d+)");

        ScrapedStatus {
            status: status_from_lifts(lifts_open, LIFTS_TOTAL),
            base_depth_cm,
            lifts_open,
            slopes_open,
            temperature,
            weather,
            ..ScrapedStatus::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResortStatus;

    const PAGE: &str = "斑尾高原スキー場\n積雪\n120 cm\n気温\n-3 ℃\n天候\n雪\n本日の営業 リフト7基、18コース";

    #[test]
    fn test_full_board() {
        let status = Madarao.produce(PAGE);
        assert_eq!(status.status, ResortStatus::Partial);
        assert_eq!(status.base_depth_cm, Some(120));
        assert_eq!(status.temperature, Some(-3.0));
        assert_eq!(status.weather.as_deref(), Some("雪"));
        assert_eq!(status.lifts_open, Some(7));
        assert_eq!(status.slopes_open, Some(18));
        assert!(status.error.is_none());
    }

    #[test]
    fn test_all_lifts_running() {
        let status = Madarao.produce("リフト10基、30コース");
        assert_eq!(status.status, ResortStatus::Open);
    }

    #[test]
    fn test_zero_lifts_is_closed_not_unset() {
        let status = Madarao.produce("リフト0基、0コース");
        assert_eq!(status.status, ResortStatus::Closed);
        assert_eq!(status.lifts_open, Some(0));
    }

    #[test]
    fn test_zero_depth_is_kept() {
        let status = Madarao.produce("積雪\n0 cm\n気温\n4 ℃");
        assert_eq!(status.base_depth_cm, Some(0));
    }

    #[test]
    fn test_unrecognized_page() {
        let status = Madarao.produce("メンテナンス中");
        assert_eq!(status, ScrapedStatus::default());
    }
}
