use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    Actor, EngineError, Remittance, ResultEngine,
    cursor::{self, PageCursor},
    remittances, util,
};

use super::{Engine, batches, with_tx};

/// Which remittance table an operation goes against.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RemittanceKind {
    Check,
    Online,
}

#[derive(Clone, Debug)]
pub struct RemittanceInput {
    pub reference_number: String,
    pub account_name: String,
    pub amount: i64,
    pub date_entry: DateTime<Utc>,
    pub description: Option<String>,
}

async fn fetch(
    db_tx: &DatabaseTransaction,
    kind: RemittanceKind,
    id: Uuid,
) -> ResultEngine<Option<Remittance>> {
    let model = match kind {
        RemittanceKind::Check => remittances::check::Entity::find_by_id(id.to_string())
            .one(db_tx)
            .await?
            .map(Remittance::try_from),
        RemittanceKind::Online => remittances::online::Entity::find_by_id(id.to_string())
            .one(db_tx)
            .await?
            .map(Remittance::try_from),
    };
    model.transpose()
}

async fn insert(
    db_tx: &DatabaseTransaction,
    kind: RemittanceKind,
    remittance: &Remittance,
) -> ResultEngine<()> {
    match kind {
        RemittanceKind::Check => {
            remittances::check::ActiveModel::from(remittance)
                .insert(db_tx)
                .await?;
        }
        RemittanceKind::Online => {
            remittances::online::ActiveModel::from(remittance)
                .insert(db_tx)
                .await?;
        }
    }
    Ok(())
}

async fn update(
    db_tx: &DatabaseTransaction,
    kind: RemittanceKind,
    remittance: &Remittance,
) -> ResultEngine<()> {
    match kind {
        RemittanceKind::Check => {
            remittances::check::ActiveModel::from(remittance)
                .update(db_tx)
                .await?;
        }
        RemittanceKind::Online => {
            remittances::online::ActiveModel::from(remittance)
                .update(db_tx)
                .await?;
        }
    }
    Ok(())
}

async fn remove(db_tx: &DatabaseTransaction, kind: RemittanceKind, id: Uuid) -> ResultEngine<()> {
    match kind {
        RemittanceKind::Check => {
            remittances::check::Entity::delete_by_id(id.to_string())
                .exec(db_tx)
                .await?;
        }
        RemittanceKind::Online => {
            remittances::online::Entity::delete_by_id(id.to_string())
                .exec(db_tx)
                .await?;
        }
    }
    Ok(())
}

/// A remittance may only be touched while the batch it belongs to is the
/// caller's open one.
async fn editable(
    db_tx: &DatabaseTransaction,
    actor: &Actor,
    kind: RemittanceKind,
    id: Uuid,
) -> ResultEngine<Remittance> {
    let branch_id = actor.branch()?;
    let open = batches::open_batch(db_tx, actor).await?;
    fetch(db_tx, kind, id)
        .await?
        .filter(|remittance| {
            remittance.organization_id == actor.organization_id
                && remittance.branch_id == branch_id
                && remittance.transaction_batch_id == open.id
        })
        .ok_or_else(|| EngineError::NotFound("remittance".to_owned()))
}

macro_rules! fetch_page {
    ($module:ident, $engine:expr, $actor:expr, $branch_id:expr, $limit:expr, $cursor:expr) => {{
        let mut query = remittances::$module::Entity::find()
            .filter(
                remittances::$module::Column::OrganizationId
                    .eq($actor.organization_id.to_string()),
            )
            .filter(remittances::$module::Column::BranchId.eq($branch_id.to_string()))
            .order_by_desc(remittances::$module::Column::CreatedAt)
            .order_by_desc(remittances::$module::Column::Id)
            .limit($limit + 1);
        if let Some(cursor) = $cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                remittances::$module::Column::CreatedAt,
                remittances::$module::Column::Id,
                &cursor,
            ));
        }
        query
            .all(&$engine.database)
            .await?
            .into_iter()
            .map(Remittance::try_from)
            .collect::<Result<Vec<_>, EngineError>>()?
    }};
}

impl Engine {
    pub async fn create_remittance(
        &self,
        actor: &Actor,
        kind: RemittanceKind,
        input: &RemittanceInput,
    ) -> ResultEngine<Remittance> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let open = batches::open_batch(&db_tx, actor).await?;
            let remittance = Remittance::new(
                actor,
                open.id,
                &input.reference_number,
                &input.account_name,
                input.amount,
                input.date_entry,
                input.description.as_deref(),
            )?;
            insert(&db_tx, kind, &remittance).await?;
            batches::rebalance(&db_tx, actor, open.id).await?;
            Ok(remittance)
        })
    }

    pub async fn update_remittance(
        &self,
        actor: &Actor,
        kind: RemittanceKind,
        id: Uuid,
        input: &RemittanceInput,
    ) -> ResultEngine<Remittance> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let mut remittance = editable(&db_tx, actor, kind, id).await?;
            remittances::check_amount(input.amount)?;
            remittance.reference_number =
                util::normalize_required(&input.reference_number, "reference number")?;
            remittance.account_name =
                util::normalize_required(&input.account_name, "account name")?;
            remittance.amount = input.amount;
            remittance.date_entry = input.date_entry;
            remittance.description = util::normalize_optional(input.description.as_deref());
            remittance.updated_at = Utc::now();
            remittance.updated_by = actor.user_id;
            update(&db_tx, kind, &remittance).await?;
            batches::rebalance(&db_tx, actor, remittance.transaction_batch_id).await?;
            Ok(remittance)
        })
    }

    pub async fn delete_remittance(
        &self,
        actor: &Actor,
        kind: RemittanceKind,
        id: Uuid,
    ) -> ResultEngine<()> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let remittance = editable(&db_tx, actor, kind, id).await?;
            remove(&db_tx, kind, remittance.id).await?;
            batches::rebalance(&db_tx, actor, remittance.transaction_batch_id).await?;
            Ok(())
        })
    }

    pub async fn list_remittances(
        &self,
        actor: &Actor,
        kind: RemittanceKind,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Remittance>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut out = match kind {
            RemittanceKind::Check => fetch_page!(check, self, actor, branch_id, limit, cursor),
            RemittanceKind::Online => fetch_page!(online, self, actor, branch_id, limit, cursor),
        };
        let has_more = out.len() > limit as usize;
        out.truncate(limit as usize);

        let next_cursor = if has_more {
            out.last()
                .map(|remittance| {
                    PageCursor {
                        created_at: remittance.created_at,
                        id: remittance.id.to_string(),
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
