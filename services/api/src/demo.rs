use chrono::{Local, NaiveDate};
use clap::Args;
use rent_scoring::config::AppConfig;
use rent_scoring::error::AppError;
use rent_scoring::scoring::{
    shared_engine_from, DealScoreResult, LeverageScoreResult, ScoreFactor, ScoringEngine,
};
use rent_scoring::snapshot::{
    score_snapshot, MarketSnapshot, PropertyConcession, PropertyId, PropertyMarketSnapshot,
    PropertyOccupancy, PropertyRent, PropertyScores, PropertySnapshot, SnapshotCsvImporter,
};
use rent_scoring::telemetry::{self, LogSink};
use rent_scoring::{calculate_deal_score, calculate_leverage_score};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
pub(crate) enum ScoreKind {
    Deal,
    Leverage,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreInputArgs {
    /// Path to a JSON file holding the score input
    #[arg(long)]
    pub(crate) input: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Snapshot CSV export with one row per property
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Date used for seasonality and building age (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

/// Results go to stdout, so CLI logs are sent to stderr. Also brings up the
/// shared engine from the configured tables.
async fn init_cli() -> Result<Arc<ScoringEngine>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;
    Ok(shared_engine_from(config.scoring.config_path).await?)
}

pub(crate) async fn run_score(kind: ScoreKind, args: ScoreInputArgs) -> Result<(), AppError> {
    init_cli().await?;
    let raw = std::fs::read_to_string(&args.input)?;

    let rendered = match kind {
        ScoreKind::Deal => {
            let result = calculate_deal_score(serde_json::from_str(&raw)?).await?;
            serde_json::to_string_pretty(&result)?
        }
        ScoreKind::Leverage => {
            let result = calculate_leverage_score(serde_json::from_str(&raw)?).await?;
            serde_json::to_string_pretty(&result)?
        }
    };

    println!("{rendered}");
    Ok(())
}

pub(crate) async fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let engine = init_cli().await?;
    let BatchArgs { csv, today } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let snapshots = SnapshotCsvImporter::from_path(&csv)?;

    println!(
        "Scored {} properties from {} (as of {})",
        snapshots.len(),
        csv.display(),
        today
    );
    for snapshot in &snapshots {
        let scores = score_snapshot(&engine, snapshot, today);
        println!("{}", batch_line(&scores));
    }

    Ok(())
}

fn batch_line(scores: &PropertyScores) -> String {
    let deal = match &scores.deal {
        Some(deal) => format!("deal {:.1} ({})", deal.score, deal.rating.label()),
        None => "deal n/a".to_string(),
    };
    let leverage = match &scores.leverage {
        Some(leverage) => format!(
            "leverage {:.1} ({})",
            leverage.score,
            leverage.level.label()
        ),
        None => "leverage n/a".to_string(),
    };
    format!("- {} | {} | {}", scores.property_id, deal, leverage)
}

pub(crate) async fn run_demo() -> Result<(), AppError> {
    let engine = init_cli().await?;
    let today = Local::now().date_naive();

    println!("Rent scoring demo (as of {today})");
    for snapshot in demo_snapshots() {
        let scores = score_snapshot(&engine, &snapshot, today);
        println!("\n{}", scores.property_id);
        match &scores.deal {
            Some(deal) => render_deal(deal),
            None => println!("  Deal score: not enough rent data"),
        }
        match &scores.leverage {
            Some(leverage) => render_leverage(leverage),
            None => println!("  Leverage score: not enough occupancy data"),
        }
    }

    Ok(())
}

fn render_deal(result: &DealScoreResult) {
    println!(
        "  Deal score: {:.1} ({})",
        result.score,
        result.rating.label()
    );
    println!("  {}", result.summary);
    println!("  {}", result.recommendation);
    render_factors(&result.factors);
}

fn render_leverage(result: &LeverageScoreResult) {
    println!(
        "  Leverage score: {:.1} ({})",
        result.score,
        result.level.label()
    );
    println!("  {}", result.best_timing);
    render_factors(&result.factors);
    println!("  Negotiation tips");
    for tip in &result.negotiation_tips {
        println!("    - {tip}");
    }
}

fn render_factors(factors: &[ScoreFactor]) {
    for factor in factors {
        println!(
            "    - {}: {:.1} x {:.2} ({})",
            factor.name, factor.value, factor.weight, factor.description
        );
    }
}

fn demo_snapshots() -> Vec<PropertyMarketSnapshot> {
    let market = MarketSnapshot {
        avg_rent: 1950.0,
        avg_rent_per_sq_ft: 2.15,
        avg_occupancy: 94.0,
        avg_concession_value: 150.0,
        rent_trend_3mo: -0.8,
        rent_trend_12mo: 1.2,
        concession_prevalence: 0.35,
        property_count: 28,
    };

    vec![
        PropertyMarketSnapshot {
            property_id: PropertyId("harbor-view".to_string()),
            property: PropertySnapshot {
                average_unit_size: 920.0,
                occupancy_rate: 88.0,
                google_rating: Some(4.5),
                year_built: 2017,
                amenity_count: 12,
                total_units: 260,
            },
            rent: Some(PropertyRent {
                current_rent: 1725.0,
            }),
            occupancy: Some(PropertyOccupancy {
                occupancy_rate: 86.5,
            }),
            concession: Some(PropertyConcession {
                concession_value: 450.0,
            }),
            market: market.clone(),
        },
        PropertyMarketSnapshot {
            property_id: PropertyId("summit-place".to_string()),
            property: PropertySnapshot {
                average_unit_size: 780.0,
                occupancy_rate: 98.0,
                google_rating: Some(3.1),
                year_built: 1979,
                amenity_count: 2,
                total_units: 36,
            },
            rent: Some(PropertyRent {
                current_rent: 2240.0,
            }),
            occupancy: None,
            concession: None,
            market: market.clone(),
        },
        PropertyMarketSnapshot {
            property_id: PropertyId("new-listing".to_string()),
            property: PropertySnapshot {
                average_unit_size: 0.0,
                occupancy_rate: 0.0,
                google_rating: None,
                year_built: 0,
                amenity_count: 0,
                total_units: 0,
            },
            rent: None,
            occupancy: None,
            concession: None,
            market: MarketSnapshot {
                avg_rent: 0.0,
                avg_occupancy: 0.0,
                ..market
            },
        },
    ]
}
