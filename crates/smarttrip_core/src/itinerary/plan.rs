//! Itinerary travel estimate and plain-text plan export.
//!
//! The estimate assumes a fixed average leg distance; it is a planning hint,
//! not routing.

use crate::itinerary::set::Itinerary;
use crate::model::transport::TransportMode;
use std::fmt::Write as _;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Assumed average distance between consecutive stops.
pub const AVERAGE_LEG_KM: f64 = 8.0;

const PLAN_TITLE: &str = "SmartTrip AI 旅程規劃表";
const TITLE_RULE: &str = "==========================";
const STOP_RULE: &str = "--------------------------";

/// Estimated total travel time between stops, in whole minutes.
///
/// Fewer than two stops means no travel.
pub fn estimated_travel_minutes(stop_count: usize, mode: TransportMode) -> u32 {
    if stop_count < 2 {
        return 0;
    }
    let total_km = (stop_count - 1) as f64 * AVERAGE_LEG_KM;
    (total_km / mode.speed_kmh() * 60.0).round() as u32
}

/// Renders the downloadable plan text; `None` for an empty itinerary.
pub fn render_plan_text(itinerary: &Itinerary, mode: TransportMode) -> Option<String> {
    if itinerary.is_empty() {
        return None;
    }

    let minutes = estimated_travel_minutes(itinerary.len(), mode);
    let mut content = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(content, "{PLAN_TITLE}");
    let _ = writeln!(content, "{TITLE_RULE}");
    let _ = writeln!(content, "交通方式：{}", mode.label());
    let _ = writeln!(content, "預估總車程：{minutes} 分鐘");
    let _ = writeln!(content, "景點數量：{}", itinerary.len());
    content.push('\n');

    for (index, item) in itinerary.entries().iter().enumerate() {
        let _ = writeln!(content, "第 {} 站：{}", index + 1, item.name);
        let _ = writeln!(content, "地址：{}", item.address);
        let _ = writeln!(content, "建議停留：{}", item.suggested_duration);
        let _ = writeln!(content, "景點介紹：{}", item.description);
        let _ = writeln!(content, "{STOP_RULE}");
    }

    Some(content)
}

/// Suggested download file name for a plan exported on `date`.
pub fn plan_file_name(date: Date) -> String {
    let format = format_description!("[year]-[month]-[day]");
    let stamp = date
        .format(&format)
        .unwrap_or_else(|_| date.to_string());
    format!("我的旅程規劃_{stamp}.txt")
}

/// Download file name for a plan exported now (UTC date).
pub fn plan_file_name_today() -> String {
    plan_file_name(OffsetDateTime::now_utc().date())
}
