use sea_orm::{ActiveModelTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, AdjustmentEntry, BalanceSummary, EngineError, GeneralLedgerSource, Posting,
    ResultEngine, adjustment_entries, balance,
    cursor::{self, PageCursor},
};

use super::{Engine, batches, ledger, with_tx};

#[derive(Clone, Debug)]
pub struct AdjustmentEntryInput {
    pub account_id: Uuid,
    pub member_profile_id: Option<Uuid>,
    pub payment_type_id: Option<Uuid>,
    pub reference_number: String,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
}

fn scoped(
    actor: &Actor,
    model: Option<adjustment_entries::Model>,
) -> ResultEngine<AdjustmentEntry> {
    let branch_id = actor.branch()?;
    model
        .map(AdjustmentEntry::try_from)
        .transpose()?
        .filter(|entry| {
            entry.organization_id == actor.organization_id && entry.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("adjustment entry".to_owned()))
}

impl Engine {
    /// Records a manual correction and mirrors it into the general ledger
    /// under the caller's open batch.
    pub async fn create_adjustment_entry(
        &self,
        actor: &Actor,
        input: &AdjustmentEntryInput,
    ) -> ResultEngine<AdjustmentEntry> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let open = batches::open_batch(&db_tx, actor).await?;
            let entry = AdjustmentEntry::new(
                actor,
                input.account_id,
                input.member_profile_id,
                input.payment_type_id,
                &input.reference_number,
                input.description.as_deref(),
                input.debit,
                input.credit,
            )?;
            adjustment_entries::ActiveModel::from(&entry)
                .insert(&db_tx)
                .await?;
            ledger::record_transaction(
                &db_tx,
                actor,
                &Posting {
                    account_id: entry.account_id,
                    member_profile_id: entry.member_profile_id,
                    transaction_batch_id: Some(open.id),
                    payment_type_id: entry.payment_type_id,
                    source: GeneralLedgerSource::Adjustment,
                    reference_number: entry.reference_number.clone(),
                    description: entry.description.clone(),
                    debit: entry.debit,
                    credit: entry.credit,
                },
            )
            .await?;
            batches::rebalance(&db_tx, actor, open.id).await?;
            Ok(entry)
        })
    }

    pub async fn adjustment_entry(&self, actor: &Actor, id: Uuid) -> ResultEngine<AdjustmentEntry> {
        let model = adjustment_entries::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?;
        scoped(actor, model)
    }

    pub async fn update_adjustment_entry(
        &self,
        actor: &Actor,
        id: Uuid,
        reference_number: &str,
        description: Option<&str>,
    ) -> ResultEngine<AdjustmentEntry> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = adjustment_entries::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut entry = scoped(actor, model)?;
            entry.revise(actor, reference_number, description)?;
            adjustment_entries::ActiveModel::from(&entry)
                .update(&db_tx)
                .await?;
            Ok(entry)
        })
    }

    pub async fn delete_adjustment_entry(&self, actor: &Actor, id: Uuid) -> ResultEngine<()> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = adjustment_entries::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let entry = scoped(actor, model)?;
            adjustment_entries::Entity::delete_by_id(entry.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    pub async fn delete_adjustment_entries(&self, actor: &Actor, ids: &[Uuid]) -> ResultEngine<()> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            for id in ids {
                let model = adjustment_entries::Entity::find_by_id(id.to_string())
                    .one(&db_tx)
                    .await?;
                scoped(actor, model)?;
            }
            adjustment_entries::Entity::delete_many()
                .filter(adjustment_entries::Column::Id.is_in(ids.iter().map(Uuid::to_string)))
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Debit and credit totals over every adjustment in the branch.
    pub async fn adjustment_totals(&self, actor: &Actor) -> ResultEngine<BalanceSummary> {
        let branch_id = actor.branch()?;
        let rows = adjustment_entries::Entity::find()
            .filter(
                adjustment_entries::Column::OrganizationId.eq(actor.organization_id.to_string()),
            )
            .filter(adjustment_entries::Column::BranchId.eq(branch_id.to_string()))
            .all(&self.database)
            .await?;
        Ok(balance::summarize(
            rows.iter().map(|row| (row.debit, row.credit)),
        ))
    }

    pub async fn list_adjustment_entries(
        &self,
        actor: &Actor,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<AdjustmentEntry>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut query = adjustment_entries::Entity::find()
            .filter(
                adjustment_entries::Column::OrganizationId.eq(actor.organization_id.to_string()),
            )
            .filter(adjustment_entries::Column::BranchId.eq(branch_id.to_string()))
            .order_by_desc(adjustment_entries::Column::CreatedAt)
            .order_by_desc(adjustment_entries::Column::Id)
            .limit(limit + 1);
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                adjustment_entries::Column::CreatedAt,
                adjustment_entries::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(AdjustmentEntry::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|entry| {
                    PageCursor {
                        created_at: entry.created_at,
                        id: entry.id.to_string(),
                    }
                    .encode()
                })
                .transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }
}
