use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::{tier_for, NormalizedTweet, IMPRESSIONS_PER_LIKE};

// Candidate field names in resolution order: the provider's primary naming
// first, its legacy naming second. The provider's schema varies between
// endpoint variants, so resolution is table-driven rather than conditional.
const TWEET_ID_FIELDS: &[&str] = &["id", "id_str"];
const TEXT_FIELDS: &[&str] = &["text", "full_text"];
const LIKE_FIELDS: &[&str] = &["favorite_count", "likes"];
const RETWEET_FIELDS: &[&str] = &["retweet_count", "retweets"];
const REPLY_FIELDS: &[&str] = &["reply_count", "replies"];
const VIEW_FIELDS: &[&str] = &["views", "impression_count"];

const USER_ID_FIELDS: &[&str] = &["id", "rest_id"];
const USERNAME_FIELDS: &[&str] = &["username", "screen_name"];
const FOLLOWER_FIELDS: &[&str] = &["followers_count", "followers"];
const FOLLOWING_FIELDS: &[&str] = &["friends_count", "following_count"];
const POST_COUNT_FIELDS: &[&str] = &["statuses_count", "tweet_count"];

/// Normalized profile fields for one account.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub id: String,
    pub username: String,
    pub name: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub tweets_count: u64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Maps one raw tweet of unknown exact shape onto the canonical record.
/// Never fails: absent or malformed fields degrade to zero/empty defaults,
/// and an unparseable timestamp leaves the age unknown.
pub fn normalize_tweet(raw: &Value, now: DateTime<Utc>) -> NormalizedTweet {
    let likes = resolve_count(raw, LIKE_FIELDS);
    let retweets = resolve_count(raw, RETWEET_FIELDS);
    let replies = resolve_count(raw, REPLY_FIELDS);

    let views = resolve_count(raw, VIEW_FIELDS);
    let impressions = if views > 0 {
        views
    } else {
        likes * IMPRESSIONS_PER_LIKE
    };

    let created_at = resolve_timestamp(raw, "created_at");
    let tier = tier_for(likes + retweets + replies, impressions);

    NormalizedTweet {
        id: resolve_id(raw, TWEET_ID_FIELDS),
        content: resolve_text(raw, TEXT_FIELDS),
        likes,
        retweets,
        replies,
        impressions,
        age_hours: age_hours(created_at, now),
        tier,
    }
}

pub fn normalize_profile(raw: &Value) -> ProfileSummary {
    ProfileSummary {
        id: resolve_id(raw, USER_ID_FIELDS),
        username: resolve_text(raw, USERNAME_FIELDS),
        name: resolve_text(raw, &["name"]),
        bio: resolve_text(raw, &["description"]),
        followers: resolve_count(raw, FOLLOWER_FIELDS),
        following: resolve_count(raw, FOLLOWING_FIELDS),
        tweets_count: resolve_count(raw, POST_COUNT_FIELDS),
        created_at: resolve_timestamp(raw, "created_at"),
    }
}

/// Identifier of the raw user object, used for the follow-up tweet lookup.
/// Empty when the provider returned no usable id.
pub fn user_id(raw: &Value) -> String {
    resolve_id(raw, USER_ID_FIELDS)
}

pub fn resolve_count(raw: &Value, candidates: &[&str]) -> u64 {
    for name in candidates {
        if let Some(value) = raw.get(name) {
            if let Some(count) = value_as_count(value) {
                return count;
            }
        }
    }
    0
}

fn resolve_text(raw: &Value, candidates: &[&str]) -> String {
    for name in candidates {
        if let Some(text) = raw.get(name).and_then(Value::as_str) {
            return text.to_string();
        }
    }
    String::new()
}

fn resolve_id(raw: &Value, candidates: &[&str]) -> String {
    for name in candidates {
        match raw.get(name) {
            Some(Value::String(id)) => return id.clone(),
            Some(Value::Number(id)) => return id.to_string(),
            _ => {}
        }
    }
    String::new()
}

// Counts arrive as JSON numbers on most endpoints and as decimal strings on
// some scraped variants. Negative or non-numeric values resolve to nothing
// so the next candidate (or the zero default) wins.
fn value_as_count(value: &Value) -> Option<u64> {
    if let Some(count) = value.as_u64() {
        return Some(count);
    }
    if let Some(count) = value.as_f64() {
        if count.is_finite() && count >= 0.0 {
            return Some(count as u64);
        }
        return None;
    }
    value.as_str().and_then(|text| text.trim().parse::<u64>().ok())
}

fn resolve_timestamp(raw: &Value, field: &str) -> Option<DateTime<Utc>> {
    let value = raw.get(field)?;
    let parsed = parse_timestamp(value);
    if parsed.is_none() {
        tracing::warn!(field, value = %value, "unparseable timestamp in provider payload");
    }
    parsed
}

/// Accepts RFC 3339 and the provider's legacy `Wed Oct 10 20:19:24 +0000
/// 2018` format.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%a %b %d %H:%M:%S %z %Y"))
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Whole hours between the observation time and the creation timestamp.
/// Timestamps in the future clamp to zero rather than going negative.
pub fn age_hours(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<u64> {
    let created = created_at?;
    Some(now.signed_duration_since(created).num_hours().max(0) as u64)
}
