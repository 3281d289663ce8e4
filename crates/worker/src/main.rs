use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod seed;

#[derive(Debug, Parser)]
#[command(name = "desk_worker")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upsert the built-in company rows into org_basic_info.
    SeedBasicInfo {
        /// Do everything except writing to the database.
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the text of every shape on every slide of a deck to stdout.
    ExtractDeck {
        /// Path to the .pptx file.
        #[arg(long, default_value = "ui_v1.pptx")]
        path: std::path::PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = desk_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    match args.command {
        Command::SeedBasicInfo { dry_run } => seed_basic_info(&settings, dry_run).await,
        Command::ExtractDeck { path } => extract_deck(&path),
    }
}

async fn seed_basic_info(
    settings: &desk_core::config::Settings,
    dry_run: bool,
) -> anyhow::Result<()> {
    let records = seed::seed_records();

    if dry_run {
        for record in &records {
            tracing::info!(
                symbol = %record.symbol,
                company = %record.company_name,
                dry_run = true,
                "would upsert"
            );
        }
        return Ok(());
    }

    let db_url = settings.require_database_url()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await
        .context("connect DATABASE_URL failed")?;

    desk_core::storage::migrate(&pool).await?;

    let acquired = desk_core::storage::lock::try_acquire_seed_lock(&pool).await?;
    if !acquired {
        tracing::warn!("seed lock not acquired; another run in progress");
        return Ok(());
    }

    let result = run_seed(&pool, &records).await;
    let _ = desk_core::storage::lock::release_seed_lock(&pool).await;

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %err, "seed run failed; batch rolled back");
    }
    result
}

async fn run_seed(
    pool: &sqlx::PgPool,
    records: &[desk_core::storage::basic_info::BasicInfoRecord],
) -> anyhow::Result<()> {
    let (inserted, updated) =
        desk_core::storage::basic_info::upsert_basic_info(pool, records).await?;
    tracing::info!(inserted, updated, "org_basic_info seed committed");

    // Read the table back so the run log doubles as a verification listing.
    let rows = desk_core::storage::basic_info::fetch_basic_info(pool).await?;
    for row in &rows {
        tracing::info!(
            symbol = %row.symbol,
            company = %row.company_name,
            currency = %row.currency,
            annual_revenue = row.annual_revenue,
            annual_profit = row.annual_profit,
            updated_at = %row.updated_at,
            "org_basic_info row"
        );
    }

    Ok(())
}

fn extract_deck(path: &std::path::Path) -> anyhow::Result<()> {
    let slides = desk_core::deck::extract_deck_file(path)?;
    for slide in &slides {
        println!("\n=== Slide {} ===", slide.index);
        for text in &slide.texts {
            println!("{text}");
        }
    }
    Ok(())
}

fn init_sentry(settings: &desk_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
