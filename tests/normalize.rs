use chrono::{Duration, TimeZone, Utc};
use serde_json::json;

use engagement_audit::normalize::{normalize_profile, normalize_tweet, user_id};
use engagement_audit::TweetTier;

fn observed_at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap()
}

#[test]
fn legacy_and_primary_field_names_normalize_identically() {
    let now = observed_at();
    let created = (now - Duration::hours(3)).to_rfc3339();

    let primary = json!({
        "id": "42",
        "text": "hello world",
        "favorite_count": 10,
        "retweet_count": 5,
        "reply_count": 2,
        "views": 900,
        "created_at": created,
    });
    let legacy = json!({
        "id_str": "42",
        "full_text": "hello world",
        "likes": 10,
        "retweets": 5,
        "replies": 2,
        "impression_count": 900,
        "created_at": created,
    });

    assert_eq!(normalize_tweet(&primary, now), normalize_tweet(&legacy, now));
}

#[test]
fn missing_fields_degrade_to_defaults() {
    let t = normalize_tweet(&json!({}), observed_at());
    assert_eq!(t.id, "");
    assert_eq!(t.content, "");
    assert_eq!(t.likes, 0);
    assert_eq!(t.retweets, 0);
    assert_eq!(t.replies, 0);
    assert_eq!(t.impressions, 0);
    assert_eq!(t.age_hours, None);
}

#[test]
fn absent_views_fall_back_to_likes_heuristic() {
    // likes 5 with no view count: impressions 100, ratio 0.05, Hero.
    let t = normalize_tweet(&json!({"favorite_count": 5}), observed_at());
    assert_eq!(t.impressions, 100);
    assert_eq!(t.engagements(), 5);
    assert_eq!(t.tier, TweetTier::Hero);
}

#[test]
fn zero_views_also_fall_back() {
    let t = normalize_tweet(&json!({"favorite_count": 3, "views": 0}), observed_at());
    assert_eq!(t.impressions, 60);
}

#[test]
fn positive_views_win_over_fallback() {
    let t = normalize_tweet(
        &json!({"favorite_count": 100, "views": 1000}),
        observed_at(),
    );
    assert_eq!(t.impressions, 1000);
}

#[test]
fn stringified_counts_parse() {
    let t = normalize_tweet(&json!({"favorite_count": "42"}), observed_at());
    assert_eq!(t.likes, 42);
}

#[test]
fn age_is_whole_hours() {
    let now = observed_at();
    let created = (now - Duration::minutes(90)).to_rfc3339();
    let t = normalize_tweet(&json!({"created_at": created}), now);
    assert_eq!(t.age_hours, Some(1));
}

#[test]
fn future_timestamps_clamp_to_zero_age() {
    let now = observed_at();
    let created = (now + Duration::hours(5)).to_rfc3339();
    let t = normalize_tweet(&json!({"created_at": created}), now);
    assert_eq!(t.age_hours, Some(0));
}

#[test]
fn unparseable_timestamp_leaves_age_unknown() {
    let t = normalize_tweet(&json!({"created_at": "not a date"}), observed_at());
    assert_eq!(t.age_hours, None);
}

#[test]
fn legacy_twitter_timestamp_format_parses() {
    let now = Utc.with_ymd_and_hms(2018, 10, 10, 22, 19, 24).unwrap();
    let t = normalize_tweet(
        &json!({"created_at": "Wed Oct 10 20:19:24 +0000 2018"}),
        now,
    );
    assert_eq!(t.age_hours, Some(2));
}

#[test]
fn profile_aliases_resolve_in_priority_order() {
    let raw = json!({
        "rest_id": 12345,
        "screen_name": "someone",
        "name": "Someone",
        "description": "bio text",
        "followers_count": 1000,
        "following_count": 250,
        "tweet_count": 4200,
    });
    let profile = normalize_profile(&raw);
    assert_eq!(profile.id, "12345");
    assert_eq!(profile.username, "someone");
    assert_eq!(profile.bio, "bio text");
    assert_eq!(profile.followers, 1000);
    assert_eq!(profile.following, 250);
    assert_eq!(profile.tweets_count, 4200);
    assert_eq!(user_id(&raw), "12345");
}

#[test]
fn primary_profile_names_take_priority() {
    let raw = json!({
        "id": "1",
        "rest_id": "2",
        "friends_count": 10,
        "following_count": 99,
    });
    let profile = normalize_profile(&raw);
    assert_eq!(profile.id, "1");
    assert_eq!(profile.following, 10);
}
