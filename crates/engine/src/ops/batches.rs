use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Actor, BatchLedgerSums, EngineError, GeneralLedgerSource, ResultEngine, TransactionBatch,
    cursor::{self, PageCursor},
    general_ledgers, remittances, transaction_batches,
};

use super::{Engine, with_tx};

fn scoped(
    actor: &Actor,
    model: Option<transaction_batches::Model>,
) -> ResultEngine<TransactionBatch> {
    let branch_id = actor.branch()?;
    model
        .map(TransactionBatch::try_from)
        .transpose()?
        .filter(|batch| {
            batch.organization_id == actor.organization_id && batch.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("transaction batch".to_owned()))
}

/// The caller's open batch, required before money moves through the till.
pub(crate) async fn open_batch(
    db_tx: &DatabaseTransaction,
    actor: &Actor,
) -> ResultEngine<TransactionBatch> {
    let branch_id = actor.branch()?;
    let model = transaction_batches::Entity::find()
        .filter(transaction_batches::Column::OrganizationId.eq(actor.organization_id.to_string()))
        .filter(transaction_batches::Column::BranchId.eq(branch_id.to_string()))
        .filter(transaction_batches::Column::EmployeeUserId.eq(actor.user_id.to_string()))
        .filter(transaction_batches::Column::IsClosed.eq(false))
        .one(db_tx)
        .await?;
    model
        .map(TransactionBatch::try_from)
        .transpose()?
        .ok_or_else(|| EngineError::NotFound("open transaction batch".to_owned()))
}

/// Sums the batch's ledger activity by source plus its remittance rows.
async fn ledger_sums(db_tx: &DatabaseTransaction, batch_id: Uuid) -> ResultEngine<BatchLedgerSums> {
    let mut sums = BatchLedgerSums::default();

    let rows = general_ledgers::Entity::find()
        .filter(general_ledgers::Column::TransactionBatchId.eq(batch_id.to_string()))
        .all(db_tx)
        .await?;
    for row in rows {
        let net = row.debit - row.credit;
        match GeneralLedgerSource::try_from(row.source.as_str())? {
            GeneralLedgerSource::Payment => sums.cash_collection += net,
            GeneralLedgerSource::Deposit => sums.deposit_entry += net,
            GeneralLedgerSource::Withdraw => sums.withdraw += net,
            _ => {}
        }
    }

    let checks = remittances::check::Entity::find()
        .filter(remittances::check::Column::TransactionBatchId.eq(batch_id.to_string()))
        .all(db_tx)
        .await?;
    sums.check_remittance = checks.iter().map(|row| row.amount).sum();

    let onlines = remittances::online::Entity::find()
        .filter(remittances::online::Column::TransactionBatchId.eq(batch_id.to_string()))
        .all(db_tx)
        .await?;
    sums.online_remittance = onlines.iter().map(|row| row.amount).sum();

    Ok(sums)
}

/// Recomputes and persists the batch's derived totals from current data.
pub(crate) async fn rebalance(
    db_tx: &DatabaseTransaction,
    actor: &Actor,
    batch_id: Uuid,
) -> ResultEngine<TransactionBatch> {
    let model = transaction_batches::Entity::find_by_id(batch_id.to_string())
        .one(db_tx)
        .await?;
    let mut batch = scoped(actor, model)?;
    batch.rebalance(ledger_sums(db_tx, batch.id).await?);
    batch.updated_at = Utc::now();
    batch.updated_by = actor.user_id;
    transaction_batches::ActiveModel::from(&batch)
        .update(db_tx)
        .await?;
    Ok(batch)
}

impl Engine {
    pub async fn start_transaction_batch(
        &self,
        actor: &Actor,
        batch_name: &str,
        beginning_balance: i64,
        deposit_in_bank: i64,
    ) -> ResultEngine<TransactionBatch> {
        actor.require_staff()?;
        let branch_id = actor.branch()?;
        let batch = TransactionBatch::start(actor, batch_name, beginning_balance, deposit_in_bank)?;
        with_tx!(self, |db_tx| {
            let open = transaction_batches::Entity::find()
                .filter(
                    transaction_batches::Column::OrganizationId
                        .eq(actor.organization_id.to_string()),
                )
                .filter(transaction_batches::Column::BranchId.eq(branch_id.to_string()))
                .filter(transaction_batches::Column::EmployeeUserId.eq(actor.user_id.to_string()))
                .filter(transaction_batches::Column::IsClosed.eq(false))
                .count(&db_tx)
                .await?;
            if open > 0 {
                return Err(EngineError::AlreadyExists("open transaction batch".to_owned()));
            }
            transaction_batches::ActiveModel::from(&batch)
                .insert(&db_tx)
                .await?;
            Ok(batch)
        })
    }

    /// The caller's open batch, 404 when none is open.
    pub async fn current_transaction_batch(&self, actor: &Actor) -> ResultEngine<TransactionBatch> {
        with_tx!(self, |db_tx| {
            let batch = open_batch(&db_tx, actor).await?;
            Ok(batch)
        })
    }

    pub async fn transaction_batch(&self, actor: &Actor, id: Uuid) -> ResultEngine<TransactionBatch> {
        let model = transaction_batches::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?;
        scoped(actor, model)
    }

    pub async fn list_transaction_batches(
        &self,
        actor: &Actor,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<TransactionBatch>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut query = transaction_batches::Entity::find()
            .filter(
                transaction_batches::Column::OrganizationId.eq(actor.organization_id.to_string()),
            )
            .filter(transaction_batches::Column::BranchId.eq(branch_id.to_string()))
            .order_by_desc(transaction_batches::Column::CreatedAt)
            .order_by_desc(transaction_batches::Column::Id)
            .limit(limit + 1);
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                transaction_batches::Column::CreatedAt,
                transaction_batches::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(TransactionBatch::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|batch| {
                    PageCursor {
                        created_at: batch.created_at,
                        id: batch.id.to_string(),
                    }
                    .encode()
                })
                .transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }

    /// Closes the batch after a final balancing over its postings.
    pub async fn end_transaction_batch(
        &self,
        actor: &Actor,
        id: Uuid,
        cash_count_total: i64,
    ) -> ResultEngine<TransactionBatch> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = transaction_batches::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut batch = scoped(actor, model)?;
            let sums = ledger_sums(&db_tx, batch.id).await?;
            batch.end(actor, cash_count_total, sums)?;
            transaction_batches::ActiveModel::from(&batch)
                .update(&db_tx)
                .await?;
            Ok(batch)
        })
    }
}
