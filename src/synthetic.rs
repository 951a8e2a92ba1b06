use chrono::{Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::{json, Value};

/// Demo fixture: raw provider-shaped records for a handle, deterministic per
/// handle. The fixture feeds the same normalize/classify/aggregate pipeline
/// as live provider data; nothing downstream knows it is synthetic.
#[derive(Debug, Clone)]
pub struct SyntheticAccount {
    pub profile: Value,
    pub tweets: Vec<Value>,
}

const TWEET_TEMPLATES: &[&str] = &[
    "Just launched a new feature! Check it out. #building",
    "Analysis of current market trends shows interesting patterns. #analysis",
    "Working on something big. Stay tuned. #building",
    "Can't believe it's already Friday! #weekendvibes",
    "Why is coffee so good?",
    "Big news coming soon...",
    "Learning Rust is fun but challenging. #rustlang",
    "Consistency beats intensity. #growth",
];

pub fn generate(handle: &str, tweet_count: usize) -> SyntheticAccount {
    let mut rng = StdRng::seed_from_u64(stable_hash64(handle));
    let now = Utc::now();

    let base_followers = rng.gen_range(500..50_500u64);
    let multiplier = if rng.gen::<f64>() > 0.8 { 100 } else { 1 };
    let followers = base_followers * multiplier;

    let joined = now - Duration::days(rng.gen_range(365..5_000));
    let profile = json!({
        "id": format!("synthetic-user-{:x}", stable_hash64(handle)),
        "username": handle,
        "name": capitalize(handle),
        "description": "Sharing thoughts on the internet.",
        "followers_count": followers,
        "friends_count": rng.gen_range(0..2_000u64),
        "statuses_count": rng.gen_range(100..15_000u64),
        "created_at": joined.to_rfc3339(),
    });

    let mut tweets = Vec::with_capacity(tweet_count);
    for idx in 0..tweet_count {
        let impressions = rng.gen_range(500..5_500u64) * multiplier;
        let ratio = rng.gen::<f64>() * 0.05 + 0.001;
        let engagements = (impressions as f64 * ratio) as u64;
        let likes = engagements * 7 / 10;
        let retweets = engagements * 2 / 10;
        let replies = engagements - likes - retweets;
        let content = TWEET_TEMPLATES[rng.gen_range(0..TWEET_TEMPLATES.len())];
        let created_at = (now - Duration::hours(rng.gen_range(1..72))).to_rfc3339();

        // Alternate between the provider's primary and legacy field names so
        // the fixture exercises the normalizer's alias tables.
        let tweet = if idx % 2 == 0 {
            json!({
                "id": format!("synthetic-{}", idx),
                "text": content,
                "favorite_count": likes,
                "retweet_count": retweets,
                "reply_count": replies,
                "views": impressions,
                "created_at": created_at,
            })
        } else {
            json!({
                "id_str": format!("synthetic-{}", idx),
                "full_text": content,
                "likes": likes,
                "retweets": retweets,
                "replies": replies,
                "impression_count": impressions,
                "created_at": created_at,
            })
        };
        tweets.push(tweet);
    }

    SyntheticAccount { profile, tweets }
}

pub fn stable_hash64(value: &str) -> u64 {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
