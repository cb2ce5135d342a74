use crate::entities::BetState;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct BetRecord {
    pub bet_id: i64,
    pub event_id: i64,
    pub amount: Decimal,
    pub state: BetState,
}

#[derive(Debug, Clone)]
/// Insert a new bet. The state column falls back to its `NEW` default.
pub struct InsertBet {
    pub event_id: i64,
    pub amount: Decimal,
}

impl Processor<InsertBet> for DatabaseProcessor {
    type Output = BetRecord;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertBet")]
    async fn process(&self, insert: InsertBet) -> Result<BetRecord, sqlx::Error> {
        let record = sqlx::query_as::<_, BetRecord>(
            r#"
            INSERT INTO bets (event_id, amount)
            VALUES ($1, $2)
            RETURNING bet_id, event_id, amount, state
            "#,
        )
        .bind(insert.event_id)
        .bind(insert.amount)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }
}

#[derive(Debug, Clone)]
/// List every stored bet.
pub struct ListBets;

impl Processor<ListBets> for DatabaseProcessor {
    type Output = Vec<BetRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListBets")]
    async fn process(&self, _query: ListBets) -> Result<Vec<BetRecord>, sqlx::Error> {
        let records = sqlx::query_as::<_, BetRecord>(
            r#"
            SELECT bet_id, event_id, amount, state
            FROM bets
            ORDER BY bet_id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }
}

#[derive(Debug, Clone)]
/// Set one state on every bet that references any of the given events.
///
/// Runs in a single transaction and returns the number of rows updated.
pub struct UpdateBetStateByEventIds {
    pub event_ids: Vec<i64>,
    pub state: BetState,
}

impl Processor<UpdateBetStateByEventIds> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateBetStateByEventIds")]
    async fn process(&self, cmd: UpdateBetStateByEventIds) -> Result<u64, sqlx::Error> {
        if cmd.event_ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            r#"
            UPDATE bets
            SET state = $1
            WHERE event_id = ANY($2)
            "#,
        )
        .bind(cmd.state)
        .bind(cmd.event_ids)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
