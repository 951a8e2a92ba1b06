pub mod config;
pub mod normalize;
pub mod report;
pub mod synthetic;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Engagement ratio above which a tweet counts as a Hero post (strict).
pub const HERO_RATIO: f64 = 0.04;
/// Engagement ratio below which a tweet counts as a Zombie post (strict).
pub const ZOMBIE_RATIO: f64 = 0.005;
/// Estimated impressions per like when the provider reports no view count.
/// A proxy for unmeasured reach, not a measurement.
pub const IMPRESSIONS_PER_LIKE: u64 = 20;
/// Assumed advertising value per thousand impressions, in USD.
pub const MEDIA_VALUE_PER_MILLE: f64 = 5.50;
/// Share of followers assumed inactive. A fixed placeholder, not measured.
pub const GHOST_FOLLOWERS_PERCENT: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TweetTier {
    Hero,
    Regular,
    Zombie,
}

impl TweetTier {
    pub fn label(self) -> &'static str {
        match self {
            TweetTier::Hero => "Hero",
            TweetTier::Regular => "Regular",
            TweetTier::Zombie => "Zombie",
        }
    }
}

/// Canonical per-tweet record. The normalizer is the only producer; every
/// downstream consumer works from this shape regardless of which provider
/// field aliases the raw payload used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedTweet {
    pub id: String,
    pub content: String,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub impressions: u64,
    /// Whole hours since the tweet was posted. `None` when the source
    /// timestamp was missing or unparseable.
    pub age_hours: Option<u64>,
    pub tier: TweetTier,
}

impl NormalizedTweet {
    pub fn engagements(&self) -> u64 {
        self.likes + self.retweets + self.replies
    }
}

pub fn engagement_ratio(engagements: u64, impressions: u64) -> f64 {
    if impressions == 0 {
        return 0.0;
    }
    engagements as f64 / impressions as f64
}

/// Pure classification rule. Boundary ratios of exactly `HERO_RATIO` and
/// exactly `ZOMBIE_RATIO` both land in Regular.
pub fn tier_for(engagements: u64, impressions: u64) -> TweetTier {
    let ratio = engagement_ratio(engagements, impressions);
    if ratio > HERO_RATIO {
        TweetTier::Hero
    } else if ratio < ZOMBIE_RATIO {
        TweetTier::Zombie
    } else {
        TweetTier::Regular
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContentRoi {
    pub hero: u32,
    pub zombie: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccountMetrics {
    pub total_impressions: u64,
    pub total_engagements: u64,
    pub engagement_rate_percent: f64,
    pub average_likes: u64,
    pub average_retweets: u64,
    pub hero_count: usize,
    pub regular_count: usize,
    pub zombie_count: usize,
    pub content_roi: ContentRoi,
    pub wasted_potential_percent: u32,
    pub estimated_media_value: u64,
}

/// Account-level rollup over one profile's normalized tweets. Single pass,
/// pure arithmetic; an empty set yields all-zero metrics rather than an
/// error. `average_likes` averages likes and `average_retweets` averages
/// retweets; neither mixes in other engagement counts.
pub fn account_metrics(tweets: &[NormalizedTweet]) -> AccountMetrics {
    let mut total_impressions = 0u64;
    let mut total_engagements = 0u64;
    let mut total_likes = 0u64;
    let mut total_retweets = 0u64;
    let mut hero_count = 0usize;
    let mut regular_count = 0usize;
    let mut zombie_count = 0usize;

    for tweet in tweets {
        total_impressions += tweet.impressions;
        total_engagements += tweet.engagements();
        total_likes += tweet.likes;
        total_retweets += tweet.retweets;
        match tweet.tier {
            TweetTier::Hero => hero_count += 1,
            TweetTier::Regular => regular_count += 1,
            TweetTier::Zombie => zombie_count += 1,
        }
    }

    let divisor = tweets.len().max(1) as f64;

    let engagement_rate_percent = if total_impressions > 0 {
        (total_engagements as f64 / total_impressions as f64) * 100.0
    } else {
        0.0
    };

    let content_roi = ContentRoi {
        hero: ((hero_count as f64 / divisor) * 100.0).round() as u32,
        zombie: ((zombie_count as f64 / divisor) * 100.0).round() as u32,
    };

    AccountMetrics {
        total_impressions,
        total_engagements,
        engagement_rate_percent,
        average_likes: (total_likes as f64 / divisor).round() as u64,
        average_retweets: (total_retweets as f64 / divisor).round() as u64,
        hero_count,
        regular_count,
        zombie_count,
        // The zombie share of content and the wasted-potential metric are
        // the same number in the current design.
        wasted_potential_percent: content_roi.zombie,
        estimated_media_value: ((total_impressions as f64 / 1000.0) * MEDIA_VALUE_PER_MILLE)
            .round() as u64,
        content_roi,
    }
}

/// Most frequent `#hashtags` across the tweet texts, case-insensitive,
/// ties broken alphabetically for a stable ordering.
pub fn top_hashtags(tweets: &[NormalizedTweet], limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for tweet in tweets {
        for token in tweet.content.split_whitespace() {
            if !token.starts_with('#') {
                continue;
            }
            let tag: String = token
                .chars()
                .take_while(|c| *c == '#' || c.is_alphanumeric() || *c == '_')
                .collect();
            if tag.len() > 1 {
                *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(tag, _)| tag).collect()
}

pub fn format_number(value: u64) -> String {
    let mut chars: Vec<char> = value.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}
