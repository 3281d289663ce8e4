use anyhow::Context;
use chrono::NaiveDateTime;

/// One row to write into org_basic_info. Figures are whole currency units,
/// not the display strings shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicInfoRecord {
    pub symbol: String,
    pub company_name: String,
    pub currency: String,
    pub annual_revenue: i64,
    pub annual_profit: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicInfoRow {
    pub symbol: String,
    pub company_name: String,
    pub currency: String,
    pub annual_revenue: i64,
    pub annual_profit: i64,
    pub updated_at: NaiveDateTime,
}

/// Upsert a batch of rows in one transaction. Returns (inserted, updated).
/// Any failure rolls the whole batch back; there is no partial commit.
pub async fn upsert_basic_info(
    pool: &sqlx::PgPool,
    records: &[BasicInfoRecord],
) -> anyhow::Result<(u64, u64)> {
    anyhow::ensure!(!records.is_empty(), "records must be non-empty");

    let mut tx = pool.begin().await.context("begin transaction failed")?;

    let mut inserted: u64 = 0;
    let mut updated: u64 = 0;

    for record in records {
        match upsert_one(&mut tx, record).await {
            Ok(existed) => {
                if existed {
                    updated += 1;
                } else {
                    inserted += 1;
                }
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback after failed upsert also failed");
                }
                return Err(err);
            }
        }
    }

    tx.commit().await.context("commit transaction failed")?;
    Ok((inserted, updated))
}

async fn upsert_one(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    record: &BasicInfoRecord,
) -> anyhow::Result<bool> {
    // Pre-check so the caller can report insert vs update counts; the write
    // itself stays a single ON CONFLICT statement.
    let existing: Option<(String,)> =
        sqlx::query_as("SELECT symbol FROM org_basic_info WHERE symbol = $1")
            .bind(&record.symbol)
            .fetch_optional(&mut **tx)
            .await
            .with_context(|| format!("existence check failed for {}", record.symbol))?;

    sqlx::query(
        "INSERT INTO org_basic_info (symbol, company_name, currency, annual_revenue, annual_profit) \
         VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (symbol) DO UPDATE SET \
             company_name = EXCLUDED.company_name, \
             currency = EXCLUDED.currency, \
             annual_revenue = EXCLUDED.annual_revenue, \
             annual_profit = EXCLUDED.annual_profit, \
             updated_at = CURRENT_TIMESTAMP",
    )
    .bind(&record.symbol)
    .bind(&record.company_name)
    .bind(&record.currency)
    .bind(record.annual_revenue)
    .bind(record.annual_profit)
    .execute(&mut **tx)
    .await
    .with_context(|| format!("upsert org_basic_info failed for {}", record.symbol))?;

    Ok(existing.is_some())
}

pub async fn fetch_basic_info(pool: &sqlx::PgPool) -> anyhow::Result<Vec<BasicInfoRow>> {
    let rows = sqlx::query_as::<_, (String, String, String, i64, i64, NaiveDateTime)>(
        "SELECT symbol, company_name, currency, annual_revenue, annual_profit, updated_at \
         FROM org_basic_info \
         ORDER BY symbol ASC",
    )
    .fetch_all(pool)
    .await
    .context("fetch org_basic_info failed")?;

    Ok(rows
        .into_iter()
        .map(
            |(symbol, company_name, currency, annual_revenue, annual_profit, updated_at)| {
                BasicInfoRow {
                    symbol,
                    company_name,
                    currency,
                    annual_revenue,
                    annual_profit,
                    updated_at,
                }
            },
        )
        .collect())
}
