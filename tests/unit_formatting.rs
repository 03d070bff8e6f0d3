use chrono::{Duration, TimeZone, Utc};
use faculty::modules::formatting::{
    Direction, PALETTE, TimeMagnitude, TimeUnit, highlight, relative, relative_or_passthrough,
};

#[test]
fn test_highlight_passthrough_on_empty_input() {
    assert_eq!(highlight("", &["x"]).render(), "");
    assert_eq!(highlight::<&str>("hello world", &[]).render(), "hello world");
}

#[test]
fn test_highlight_counts_every_casing() {
    let result = highlight("cat Cat CAT", &["cat"]);
    let stats = result.stats.as_ref().unwrap();

    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0].keyword, "cat");
    assert_eq!(stats[0].count, 3);
    assert_eq!(result.body.matches(PALETTE[0]).count(), 3);
    assert!(result.render().contains("ظهرت 3 مرات"));
}

#[test]
fn test_eleventh_keyword_reuses_first_color() {
    let keywords = ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"];
    let result = highlight("k and a", &keywords);
    let stats = result.stats.unwrap();

    assert_eq!(stats[0].keyword, "k");
    assert_eq!(stats[1].keyword, "a");
    assert_eq!(stats[0].color, stats[1].color);
}

#[test]
fn test_highlight_keeps_spacing() {
    let result = highlight("The  quick\tfox.", &["fox"]);
    assert_eq!(
        result.body,
        "The  quick\t<mark style=\"background-color: #FF5733\">fox</mark>."
    );
}

#[test]
fn test_relative_examples() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 0).unwrap();

    assert_eq!(relative(now - Duration::seconds(1), now), "منذ 1 ثانية");
    assert_eq!(relative(now - Duration::seconds(90), now), "منذ 1 دقيقة");
    assert_eq!(relative(now - Duration::days(2), now), "منذ 2 يومان");
    assert_eq!(relative(now + Duration::days(5), now), "بعد 5 يومات");
    assert_eq!(relative(now - Duration::days(400), now), "منذ 1 سنة");
}

#[test]
fn test_magnitude_fields() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 0).unwrap();
    let magnitude = TimeMagnitude::between(now + Duration::days(5), now);

    assert_eq!(magnitude.direction, Direction::Future);
    assert_eq!(magnitude.unit, TimeUnit::Day);
    assert_eq!(magnitude.count, 5);
}

#[test]
fn test_relative_or_passthrough() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 8, 30, 0).unwrap();

    assert_eq!(relative_or_passthrough("2025-06-13T08:30:00Z", now), "منذ 2 يومان");
    assert_eq!(relative_or_passthrough("not a date", now), "not a date");
}
