use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, prelude::*,
};
use uuid::Uuid;

use crate::{
    Account, Actor, EngineError, GeneralLedger, GeneralLedgerSource, Posting, ResultEngine,
    accounts,
    cursor::{self, PageCursor},
    general_ledgers,
};

use super::Engine;

/// Narrows ledger listings. Unset fields match everything.
#[derive(Clone, Debug, Default)]
pub struct LedgerFilter {
    pub account_id: Option<Uuid>,
    pub member_profile_id: Option<Uuid>,
    pub transaction_batch_id: Option<Uuid>,
    pub source: Option<GeneralLedgerSource>,
}

/// Appends one posting to the ledger inside the caller's transaction.
///
/// The running balance continues from the latest row of the same account
/// and member subsidiary, following the account's normal side.
pub(crate) async fn record_transaction(
    db_tx: &DatabaseTransaction,
    actor: &Actor,
    posting: &Posting,
) -> ResultEngine<GeneralLedger> {
    let branch_id = actor.branch()?;
    let account = accounts::Entity::find_by_id(posting.account_id.to_string())
        .one(db_tx)
        .await?
        .map(Account::try_from)
        .transpose()?
        .filter(|account| {
            account.organization_id == actor.organization_id && account.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("account".to_owned()))?;

    let mut latest = general_ledgers::Entity::find()
        .filter(general_ledgers::Column::AccountId.eq(posting.account_id.to_string()))
        .order_by_desc(general_ledgers::Column::CreatedAt)
        .order_by_desc(general_ledgers::Column::Id);
    latest = match posting.member_profile_id {
        Some(member_profile_id) => latest.filter(
            general_ledgers::Column::MemberProfileId.eq(member_profile_id.to_string()),
        ),
        None => latest.filter(general_ledgers::Column::MemberProfileId.is_null()),
    };
    let previous_balance = latest
        .one(db_tx)
        .await?
        .map(|row| row.balance)
        .unwrap_or_default();

    let balance =
        account
            .general_ledger_type
            .apply(previous_balance, posting.debit, posting.credit);
    let row = GeneralLedger::post(actor, posting, balance)?;
    general_ledgers::ActiveModel::from(&row).insert(db_tx).await?;
    Ok(row)
}

fn filtered(
    actor: &Actor,
    filter: &LedgerFilter,
) -> ResultEngine<Select<general_ledgers::Entity>> {
    let branch_id = actor.branch()?;
    let mut query = general_ledgers::Entity::find()
        .filter(general_ledgers::Column::OrganizationId.eq(actor.organization_id.to_string()))
        .filter(general_ledgers::Column::BranchId.eq(branch_id.to_string()));
    if let Some(account_id) = filter.account_id {
        query = query.filter(general_ledgers::Column::AccountId.eq(account_id.to_string()));
    }
    if let Some(member_profile_id) = filter.member_profile_id {
        query = query.filter(
            general_ledgers::Column::MemberProfileId.eq(member_profile_id.to_string()),
        );
    }
    if let Some(transaction_batch_id) = filter.transaction_batch_id {
        query = query.filter(
            general_ledgers::Column::TransactionBatchId.eq(transaction_batch_id.to_string()),
        );
    }
    if let Some(source) = filter.source {
        query = query.filter(general_ledgers::Column::Source.eq(source.as_str()));
    }
    Ok(query)
}

impl Engine {
    pub async fn list_general_ledger(
        &self,
        actor: &Actor,
        filter: &LedgerFilter,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<GeneralLedger>, Option<String>)> {
        let limit = cursor::clamp_limit(limit);

        let mut query = filtered(actor, filter)?
            .order_by_desc(general_ledgers::Column::CreatedAt)
            .order_by_desc(general_ledgers::Column::Id)
            .limit(limit + 1);
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                general_ledgers::Column::CreatedAt,
                general_ledgers::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(GeneralLedger::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|row| {
                    PageCursor {
                        created_at: row.created_at,
                        id: row.id.to_string(),
                    }
                    .encode()
                })
                .transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }

    /// Everything the filter matches, oldest first, for file exports.
    pub async fn export_general_ledger(
        &self,
        actor: &Actor,
        filter: &LedgerFilter,
    ) -> ResultEngine<Vec<GeneralLedger>> {
        let rows = filtered(actor, filter)?
            .order_by_asc(general_ledgers::Column::CreatedAt)
            .order_by_asc(general_ledgers::Column::Id)
            .all(&self.database)
            .await?;
        rows.into_iter().map(GeneralLedger::try_from).collect()
    }
}
