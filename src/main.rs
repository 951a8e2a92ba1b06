mod provider;
mod server;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::Path;

use engagement_audit::config::ProviderConfig;
use engagement_audit::{account_metrics, format_number, format_percent, normalize, report, synthetic};

#[derive(Parser)]
#[command(name = "engagement-audit", about = "X profile engagement analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Analyze(AnalyzeArgs),
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// Handle to analyze, with or without the leading @.
    handle: String,
    /// Use the seeded synthetic fixture instead of the live provider.
    #[arg(long)]
    synthetic: bool,
    /// Print the full dashboard payload as JSON.
    #[arg(long)]
    json: bool,
    /// Override the configured number of recent tweets to fetch.
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8788)]
    port: u16,
    #[arg(long, default_value = "webapp/dist")]
    web_root: String,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    match cli.command {
        Command::Analyze(args) => run_analyze(args).await,
        Command::Serve(args) => server::serve(args).await,
    }
}

async fn run_analyze(args: AnalyzeArgs) -> Result<(), String> {
    let handle = args
        .handle
        .trim()
        .trim_start_matches('@')
        .trim()
        .to_string();
    if handle.is_empty() {
        return Err("missing handle".to_string());
    }

    let config = ProviderConfig::load(None)?;
    let limit = args.limit.unwrap_or(config.tweet_limit);

    let (raw_profile, raw_tweets) = if args.synthetic {
        let account = synthetic::generate(&handle, limit.min(20));
        (account.profile, account.tweets)
    } else {
        let client = provider::ProviderClient::from_env(&config)
            .ok_or_else(|| "TWITTERAPI_KEY is not set".to_string())?;
        let user = client.fetch_user(&handle).await.map_err(|err| err.to_string())?;
        let user_id = normalize::user_id(&user);
        if user_id.is_empty() {
            return Err(format!("user not found: {}", handle));
        }
        let tweets = client
            .fetch_last_tweets(&user_id, limit)
            .await
            .map_err(|err| err.to_string())?;
        (user, tweets)
    };

    let now = Utc::now();
    let profile = normalize::normalize_profile(&raw_profile);
    let tweets: Vec<_> = raw_tweets
        .iter()
        .map(|raw| normalize::normalize_tweet(raw, now))
        .collect();
    let metrics = account_metrics(&tweets);
    let payload = report::assemble(&profile, &tweets, &metrics, now);

    if args.json {
        let rendered = serde_json::to_string_pretty(&payload)
            .map_err(|err| format!("failed to serialize report: {}", err))?;
        println!("{}", rendered);
        return Ok(());
    }

    println!(
        "Profile: {} ({} followers, {} following)",
        payload.profile.handle,
        format_number(profile.followers),
        format_number(profile.following)
    );
    println!(
        "Engagement rate: {} over {} tweets",
        format_percent(metrics.engagement_rate_percent),
        tweets.len()
    );
    println!(
        "Tiers: hero {} | regular {} | zombie {}",
        metrics.hero_count, metrics.regular_count, metrics.zombie_count
    );
    println!(
        "Averages: {} likes | {} retweets per tweet",
        format_number(metrics.average_likes),
        format_number(metrics.average_retweets)
    );
    println!(
        "Estimated media value: ${}",
        format_number(metrics.estimated_media_value)
    );
    println!(
        "Content ROI: hero {}% | zombie {}% (wasted potential {}%)",
        metrics.content_roi.hero, metrics.content_roi.zombie, metrics.wasted_potential_percent
    );
    if !payload.top_hashtags.is_empty() {
        println!("Top hashtags: {}", payload.top_hashtags.join(", "));
    }

    println!("\nRecent tweets:");
    for tweet in &payload.recent_tweets {
        println!(
            "- [{}] {} ({} likes, {} impressions, {})",
            tweet.kind,
            truncate(&tweet.content, 60),
            format_number(tweet.likes),
            format_number(tweet.impressions),
            tweet.date
        );
    }

    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
