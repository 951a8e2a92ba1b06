use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::normalize::ProfileSummary;
use crate::{top_hashtags, AccountMetrics, ContentRoi, NormalizedTweet, GHOST_FOLLOWERS_PERCENT};

const GROWTH_HISTORY_DAYS: i64 = 30;
const TOP_HASHTAG_LIMIT: usize = 5;

/// Final analytics payload consumed by the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub profile: ProfileCard,
    pub growth_history: Vec<GrowthPoint>,
    pub recent_tweets: Vec<TweetCard>,
    pub engagement_rate: f64,
    pub average_likes: u64,
    pub average_retweets: u64,
    pub top_hashtags: Vec<String>,
    pub insights: Vec<Insight>,
    pub estimated_media_value: u64,
    pub wasted_potential: u32,
    pub ghost_followers: u32,
    pub content_roi: ContentRoi,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCard {
    pub handle: String,
    pub name: String,
    pub followers: u64,
    pub following: u64,
    pub tweets_count: u64,
    pub joined_date: String,
    pub bio: String,
    pub avatar_color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GrowthPoint {
    pub date: String,
    pub followers: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TweetCard {
    pub id: String,
    pub content: String,
    pub likes: u64,
    pub retweets: u64,
    pub replies: u64,
    pub impressions: u64,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub category: String,
    pub score: u32,
    pub status: String,
    pub tips: Vec<String>,
    pub icon: String,
}

/// Packages the engine output with the display fields the dashboard needs.
/// Everything here is either a formatting concern or an explicitly labeled
/// placeholder; no classification or aggregation happens at this layer.
pub fn assemble(
    profile: &ProfileSummary,
    tweets: &[NormalizedTweet],
    metrics: &AccountMetrics,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    AnalyticsReport {
        profile: profile_card(profile),
        growth_history: growth_placeholder(profile.followers, now),
        recent_tweets: tweets.iter().map(tweet_card).collect(),
        engagement_rate: metrics.engagement_rate_percent,
        average_likes: metrics.average_likes,
        average_retweets: metrics.average_retweets,
        top_hashtags: top_hashtags(tweets, TOP_HASHTAG_LIMIT),
        insights: build_insights(metrics),
        estimated_media_value: metrics.estimated_media_value,
        wasted_potential: metrics.wasted_potential_percent,
        ghost_followers: GHOST_FOLLOWERS_PERCENT,
        content_roi: metrics.content_roi,
    }
}

fn profile_card(profile: &ProfileSummary) -> ProfileCard {
    ProfileCard {
        handle: format!("@{}", profile.username),
        name: profile.name.clone(),
        followers: profile.followers,
        following: profile.following,
        tweets_count: profile.tweets_count,
        joined_date: profile
            .created_at
            .map(|created| created.format("%B %Y").to_string())
            .unwrap_or_else(|| "unknown".to_string()),
        bio: profile.bio.clone(),
        avatar_color: "bg-blue-500".to_string(),
    }
}

fn tweet_card(tweet: &NormalizedTweet) -> TweetCard {
    TweetCard {
        id: tweet.id.clone(),
        content: tweet.content.clone(),
        likes: tweet.likes,
        retweets: tweet.retweets,
        replies: tweet.replies,
        impressions: tweet.impressions,
        date: match tweet.age_hours {
            Some(hours) => format!("{}h ago", hours),
            None => "recently".to_string(),
        },
        kind: tweet.tier.label().to_string(),
    }
}

// Placeholder pending a real follower time series: one flat point per day at
// the current count, so the chart renders without fabricated growth.
fn growth_placeholder(followers: u64, now: DateTime<Utc>) -> Vec<GrowthPoint> {
    (0..GROWTH_HISTORY_DAYS)
        .rev()
        .map(|days_back| GrowthPoint {
            date: (now - Duration::days(days_back)).format("%b %-d").to_string(),
            followers,
        })
        .collect()
}

fn build_insights(metrics: &AccountMetrics) -> Vec<Insight> {
    // 5% engagement maps to a full content-quality score.
    let quality_score = ((metrics.engagement_rate_percent / 5.0) * 100.0)
        .clamp(0.0, 100.0)
        .round() as u32;
    let reach_score = 100u32.saturating_sub(metrics.wasted_potential_percent);
    let audience_score = 100u32.saturating_sub(GHOST_FOLLOWERS_PERCENT);

    vec![
        Insight {
            category: "Content Quality".to_string(),
            score: quality_score,
            status: status_label(quality_score).to_string(),
            tips: vec![
                "Include more visual media.".to_string(),
                "Thread your longer thoughts.".to_string(),
                "Use 2-3 hashtags max.".to_string(),
            ],
            icon: "MessageCircle".to_string(),
        },
        Insight {
            category: "Reach Efficiency".to_string(),
            score: reach_score,
            status: status_label(reach_score).to_string(),
            tips: vec![
                "Try consistent morning slots.".to_string(),
                "Engage with 5 large accounts daily.".to_string(),
                "Reply faster.".to_string(),
            ],
            icon: "Zap".to_string(),
        },
        Insight {
            category: "Audience Health".to_string(),
            score: audience_score,
            status: status_label(audience_score).to_string(),
            tips: vec![
                "Prune inactive accounts.".to_string(),
                "Interact with Verified users.".to_string(),
                "Welcome new followers.".to_string(),
            ],
            icon: "Target".to_string(),
        },
    ]
}

fn status_label(score: u32) -> &'static str {
    if score >= 80 {
        "Excellent"
    } else if score >= 60 {
        "Good"
    } else {
        "Needs Improvement"
    }
}
