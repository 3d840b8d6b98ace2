use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Account, AccountHistory, Actor, EngineError, GeneralLedgerType, ResultEngine,
    account_histories, accounts, cash_check_voucher_entries,
    cursor::{self, PageCursor},
    general_ledgers, util,
};

use super::{Engine, with_tx};

fn scoped(actor: &Actor, model: Option<accounts::Model>) -> ResultEngine<Account> {
    let branch_id = actor.branch()?;
    model
        .map(Account::try_from)
        .transpose()?
        .filter(|account| {
            account.organization_id == actor.organization_id && account.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("account".to_owned()))
}

/// An account that has postings cannot be removed without orphaning them.
async fn ensure_unreferenced(db_tx: &DatabaseTransaction, account_id: Uuid) -> ResultEngine<()> {
    let ledger_rows = general_ledgers::Entity::find()
        .filter(general_ledgers::Column::AccountId.eq(account_id.to_string()))
        .count(db_tx)
        .await?;
    let entry_rows = cash_check_voucher_entries::Entity::find()
        .filter(cash_check_voucher_entries::Column::AccountId.eq(account_id.to_string()))
        .count(db_tx)
        .await?;
    if ledger_rows > 0 || entry_rows > 0 {
        return Err(EngineError::InvalidInput(
            "account has recorded entries".to_owned(),
        ));
    }
    Ok(())
}

async fn ensure_name_free(
    db_tx: &DatabaseTransaction,
    actor: &Actor,
    name: &str,
    skip_id: Option<Uuid>,
) -> ResultEngine<()> {
    let branch_id = actor.branch()?;
    let mut query = accounts::Entity::find()
        .filter(accounts::Column::OrganizationId.eq(actor.organization_id.to_string()))
        .filter(accounts::Column::BranchId.eq(branch_id.to_string()))
        .filter(accounts::Column::Name.eq(name));
    if let Some(skip_id) = skip_id {
        query = query.filter(accounts::Column::Id.ne(skip_id.to_string()));
    }
    if query.count(db_tx).await? > 0 {
        return Err(EngineError::AlreadyExists("account".to_owned()));
    }
    Ok(())
}

impl Engine {
    pub async fn create_account(
        &self,
        actor: &Actor,
        name: &str,
        description: Option<&str>,
        general_ledger_type: GeneralLedgerType,
    ) -> ResultEngine<Account> {
        let account = Account::new(actor, name, description, general_ledger_type)?;
        with_tx!(self, |db_tx| {
            ensure_name_free(&db_tx, actor, &account.name, None).await?;
            accounts::ActiveModel::from(&account).insert(&db_tx).await?;
            Ok(account)
        })
    }

    pub async fn account(&self, actor: &Actor, id: Uuid) -> ResultEngine<Account> {
        let model = accounts::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?;
        scoped(actor, model)
    }

    /// Rewrites the account and keeps the pre-change row in its history.
    pub async fn update_account(
        &self,
        actor: &Actor,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        general_ledger_type: GeneralLedgerType,
    ) -> ResultEngine<Account> {
        with_tx!(self, |db_tx| {
            let model = accounts::Entity::find_by_id(id.to_string()).one(&db_tx).await?;
            let mut account = scoped(actor, model)?;

            let history = AccountHistory::snapshot(&account, actor);
            account_histories::ActiveModel::from(&history)
                .insert(&db_tx)
                .await?;

            account.name = util::normalize_required(name, "account name")?;
            account.description = util::normalize_optional(description);
            account.general_ledger_type = general_ledger_type;
            account.updated_at = Utc::now();
            account.updated_by = actor.user_id;

            ensure_name_free(&db_tx, actor, &account.name, Some(account.id)).await?;
            accounts::ActiveModel::from(&account).update(&db_tx).await?;
            Ok(account)
        })
    }

    pub async fn delete_account(&self, actor: &Actor, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = accounts::Entity::find_by_id(id.to_string()).one(&db_tx).await?;
            let account = scoped(actor, model)?;
            ensure_unreferenced(&db_tx, account.id).await?;
            accounts::Entity::delete_by_id(account.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Deletes every listed account or none of them.
    pub async fn delete_accounts(&self, actor: &Actor, ids: &[Uuid]) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            for id in ids {
                let model = accounts::Entity::find_by_id(id.to_string()).one(&db_tx).await?;
                let account = scoped(actor, model)?;
                ensure_unreferenced(&db_tx, account.id).await?;
            }
            accounts::Entity::delete_many()
                .filter(accounts::Column::Id.is_in(ids.iter().map(Uuid::to_string)))
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    pub async fn list_accounts(
        &self,
        actor: &Actor,
        q: Option<&str>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Account>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut query = accounts::Entity::find()
            .filter(accounts::Column::OrganizationId.eq(actor.organization_id.to_string()))
            .filter(accounts::Column::BranchId.eq(branch_id.to_string()))
            .order_by_desc(accounts::Column::CreatedAt)
            .order_by_desc(accounts::Column::Id)
            .limit(limit + 1);
        if let Some(q) = util::normalize_optional(q) {
            query = query.filter(accounts::Column::Name.contains(&q));
        }
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                accounts::Column::CreatedAt,
                accounts::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(Account::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|account| {
                    PageCursor {
                        created_at: account.created_at,
                        id: account.id.to_string(),
                    }
                    .encode()
                })
                .transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }

    /// Past versions of one account, most recent change first.
    pub async fn account_history(
        &self,
        actor: &Actor,
        account_id: Uuid,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<AccountHistory>, Option<String>)> {
        let model = accounts::Entity::find_by_id(account_id.to_string())
            .one(&self.database)
            .await?;
        let account = scoped(actor, model)?;
        let limit = cursor::clamp_limit(limit);

        let mut query = account_histories::Entity::find()
            .filter(account_histories::Column::AccountId.eq(account.id.to_string()))
            .order_by_desc(account_histories::Column::ChangedAt)
            .order_by_desc(account_histories::Column::Id)
            .limit(limit + 1);
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                account_histories::Column::ChangedAt,
                account_histories::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(AccountHistory::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|history| {
                    PageCursor {
                        created_at: history.changed_at,
                        id: history.id.to_string(),
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
