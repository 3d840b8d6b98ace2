use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, Condition, DatabaseTransaction, QueryFilter, QueryOrder, QuerySelect,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    Actor, CashCheckVoucher, CashCheckVoucherEntry, EngineError, GeneralLedgerSource, Posting,
    ResultEngine, VoucherStatus, balance, cash_check_voucher_entries, cash_check_vouchers,
    cursor::{self, PageCursor},
    util,
};

use super::{Engine, batches, ledger, with_tx};

/// One debit/credit line of a voucher. An id is present when the line
/// already exists and the write should update it in place.
#[derive(Clone, Debug)]
pub struct VoucherEntryInput {
    pub id: Option<Uuid>,
    pub account_id: Uuid,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
}

fn scoped(
    actor: &Actor,
    model: Option<cash_check_vouchers::Model>,
) -> ResultEngine<CashCheckVoucher> {
    let branch_id = actor.branch()?;
    model
        .map(CashCheckVoucher::try_from)
        .transpose()?
        .filter(|voucher| {
            voucher.organization_id == actor.organization_id && voucher.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("cash check voucher".to_owned()))
}

async fn entries_of(
    db_tx: &DatabaseTransaction,
    voucher_id: Uuid,
) -> ResultEngine<Vec<CashCheckVoucherEntry>> {
    let rows = cash_check_voucher_entries::Entity::find()
        .filter(cash_check_voucher_entries::Column::CashCheckVoucherId.eq(voucher_id.to_string()))
        .order_by_asc(cash_check_voucher_entries::Column::CreatedAt)
        .order_by_asc(cash_check_voucher_entries::Column::Id)
        .all(db_tx)
        .await?;
    rows.into_iter()
        .map(CashCheckVoucherEntry::try_from)
        .collect()
}

impl Engine {
    /// Creates a draft voucher with its entry lines. Drafts may be
    /// unbalanced; the totals record whatever was submitted.
    pub async fn create_cash_check_voucher(
        &self,
        actor: &Actor,
        member_profile_id: Option<Uuid>,
        pay_to: &str,
        description: Option<&str>,
        entries: &[VoucherEntryInput],
    ) -> ResultEngine<(CashCheckVoucher, Vec<CashCheckVoucherEntry>)> {
        let mut voucher = CashCheckVoucher::new(actor, member_profile_id, pay_to, description)?;
        let summary = balance::summarize(entries.iter().map(|entry| (entry.debit, entry.credit)));
        voucher.total_debit = summary.total_debit;
        voucher.total_credit = summary.total_credit;

        let mut lines = Vec::with_capacity(entries.len());
        for entry in entries {
            lines.push(CashCheckVoucherEntry::new(
                actor,
                voucher.id,
                entry.account_id,
                entry.description.as_deref(),
                entry.debit,
                entry.credit,
            )?);
        }

        with_tx!(self, |db_tx| {
            cash_check_vouchers::ActiveModel::from(&voucher)
                .insert(&db_tx)
                .await?;
            for line in &lines {
                cash_check_voucher_entries::ActiveModel::from(line)
                    .insert(&db_tx)
                    .await?;
            }
            Ok((voucher, lines))
        })
    }

    pub async fn cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> ResultEngine<(CashCheckVoucher, Vec<CashCheckVoucherEntry>)> {
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let voucher = scoped(actor, model)?;
            let entries = entries_of(&db_tx, voucher.id).await?;
            Ok((voucher, entries))
        })
    }

    /// Rewrites a voucher and its lines. The submitted lines must balance,
    /// and lines marked for deletion must belong to this voucher.
    #[allow(clippy::too_many_arguments)]
    pub async fn update_cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
        member_profile_id: Option<Uuid>,
        pay_to: &str,
        description: Option<&str>,
        entries: &[VoucherEntryInput],
        deleted_entry_ids: &[Uuid],
    ) -> ResultEngine<(CashCheckVoucher, Vec<CashCheckVoucherEntry>)> {
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut voucher = scoped(actor, model)?;
            if voucher.status == VoucherStatus::Released {
                return Err(EngineError::VoucherState(
                    "voucher already released".to_owned(),
                ));
            }

            let summary =
                balance::summarize_strict(entries.iter().map(|entry| (entry.debit, entry.credit)))?;

            for entry_id in deleted_entry_ids {
                let owned = cash_check_voucher_entries::Entity::find_by_id(entry_id.to_string())
                    .one(&db_tx)
                    .await?
                    .map(CashCheckVoucherEntry::try_from)
                    .transpose()?
                    .is_some_and(|entry| entry.cash_check_voucher_id == voucher.id);
                if !owned {
                    return Err(EngineError::Forbidden(
                        "entry does not belong to the voucher".to_owned(),
                    ));
                }
            }
            if !deleted_entry_ids.is_empty() {
                cash_check_voucher_entries::Entity::delete_many()
                    .filter(
                        cash_check_voucher_entries::Column::Id
                            .is_in(deleted_entry_ids.iter().map(Uuid::to_string)),
                    )
                    .exec(&db_tx)
                    .await?;
            }

            for entry in entries {
                match entry.id {
                    Some(entry_id) => {
                        let mut line =
                            cash_check_voucher_entries::Entity::find_by_id(entry_id.to_string())
                                .one(&db_tx)
                                .await?
                                .map(CashCheckVoucherEntry::try_from)
                                .transpose()?
                                .filter(|line| line.cash_check_voucher_id == voucher.id)
                                .ok_or_else(|| {
                                    EngineError::NotFound("voucher entry".to_owned())
                                })?;
                        balance::check_amounts(entry.debit, entry.credit)?;
                        line.account_id = entry.account_id;
                        line.description = util::normalize_optional(entry.description.as_deref());
                        line.debit = entry.debit;
                        line.credit = entry.credit;
                        line.updated_at = Utc::now();
                        line.updated_by = actor.user_id;
                        cash_check_voucher_entries::ActiveModel::from(&line)
                            .update(&db_tx)
                            .await?;
                    }
                    None => {
                        let line = CashCheckVoucherEntry::new(
                            actor,
                            voucher.id,
                            entry.account_id,
                            entry.description.as_deref(),
                            entry.debit,
                            entry.credit,
                        )?;
                        cash_check_voucher_entries::ActiveModel::from(&line)
                            .insert(&db_tx)
                            .await?;
                    }
                }
            }

            voucher.member_profile_id = member_profile_id;
            voucher.pay_to = util::normalize_required(pay_to, "pay to")?;
            voucher.description = util::normalize_optional(description);
            voucher.total_debit = summary.total_debit;
            voucher.total_credit = summary.total_credit;
            voucher.updated_at = Utc::now();
            voucher.updated_by = actor.user_id;
            cash_check_vouchers::ActiveModel::from(&voucher)
                .update(&db_tx)
                .await?;

            let lines = entries_of(&db_tx, voucher.id).await?;
            Ok((voucher, lines))
        })
    }

    pub async fn delete_cash_check_voucher(&self, actor: &Actor, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let voucher = scoped(actor, model)?;
            if voucher.status == VoucherStatus::Released {
                return Err(EngineError::VoucherState(
                    "released vouchers cannot be deleted".to_owned(),
                ));
            }
            cash_check_voucher_entries::Entity::delete_many()
                .filter(
                    cash_check_voucher_entries::Column::CashCheckVoucherId
                        .eq(voucher.id.to_string()),
                )
                .exec(&db_tx)
                .await?;
            cash_check_vouchers::Entity::delete_by_id(voucher.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Deletes every listed voucher with its entries, or none of them.
    pub async fn delete_cash_check_vouchers(
        &self,
        actor: &Actor,
        ids: &[Uuid],
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            for id in ids {
                let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                    .one(&db_tx)
                    .await?;
                let voucher = scoped(actor, model)?;
                if voucher.status == VoucherStatus::Released {
                    return Err(EngineError::VoucherState(
                        "released vouchers cannot be deleted".to_owned(),
                    ));
                }
            }
            cash_check_voucher_entries::Entity::delete_many()
                .filter(
                    cash_check_voucher_entries::Column::CashCheckVoucherId
                        .is_in(ids.iter().map(Uuid::to_string)),
                )
                .exec(&db_tx)
                .await?;
            cash_check_vouchers::Entity::delete_many()
                .filter(cash_check_vouchers::Column::Id.is_in(ids.iter().map(Uuid::to_string)))
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    pub async fn print_cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
        cash_voucher_number: &str,
    ) -> ResultEngine<CashCheckVoucher> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut voucher = scoped(actor, model)?;
            voucher.print(actor, cash_voucher_number)?;
            cash_check_vouchers::ActiveModel::from(&voucher)
                .update(&db_tx)
                .await?;
            Ok(voucher)
        })
    }

    /// Another print of an already numbered voucher.
    pub async fn print_only_cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> ResultEngine<CashCheckVoucher> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut voucher = scoped(actor, model)?;
            voucher.print_only(actor);
            cash_check_vouchers::ActiveModel::from(&voucher)
                .update(&db_tx)
                .await?;
            Ok(voucher)
        })
    }

    pub async fn undo_print_cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> ResultEngine<CashCheckVoucher> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut voucher = scoped(actor, model)?;
            voucher.undo_print(actor)?;
            cash_check_vouchers::ActiveModel::from(&voucher)
                .update(&db_tx)
                .await?;
            Ok(voucher)
        })
    }

    pub async fn approve_cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> ResultEngine<CashCheckVoucher> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut voucher = scoped(actor, model)?;
            voucher.approve(actor)?;
            cash_check_vouchers::ActiveModel::from(&voucher)
                .update(&db_tx)
                .await?;
            Ok(voucher)
        })
    }

    pub async fn undo_approve_cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> ResultEngine<CashCheckVoucher> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut voucher = scoped(actor, model)?;
            voucher.undo_approve(actor)?;
            cash_check_vouchers::ActiveModel::from(&voucher)
                .update(&db_tx)
                .await?;
            Ok(voucher)
        })
    }

    /// Pays the voucher out: marks it released under the caller's open
    /// batch, mirrors every line into the general ledger and rebalances.
    pub async fn release_cash_check_voucher(
        &self,
        actor: &Actor,
        id: Uuid,
    ) -> ResultEngine<CashCheckVoucher> {
        actor.require_staff()?;
        with_tx!(self, |db_tx| {
            let model = cash_check_vouchers::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut voucher = scoped(actor, model)?;
            let open = batches::open_batch(&db_tx, actor).await?;
            voucher.release(actor, open.id)?;
            cash_check_vouchers::ActiveModel::from(&voucher)
                .update(&db_tx)
                .await?;

            let reference_number = voucher
                .cash_voucher_number
                .clone()
                .unwrap_or_else(|| voucher.id.to_string());
            for line in entries_of(&db_tx, voucher.id).await? {
                ledger::record_transaction(
                    &db_tx,
                    actor,
                    &Posting {
                        account_id: line.account_id,
                        member_profile_id: voucher.member_profile_id,
                        transaction_batch_id: Some(open.id),
                        payment_type_id: None,
                        source: GeneralLedgerSource::CheckVoucher,
                        reference_number: reference_number.clone(),
                        description: line.description.clone(),
                        debit: line.debit,
                        credit: line.credit,
                    },
                )
                .await?;
            }

            batches::rebalance(&db_tx, actor, open.id).await?;
            Ok(voucher)
        })
    }

    /// Branch voucher listing, optionally narrowed to one status or a
    /// pay-to/voucher-number search.
    pub async fn list_cash_check_vouchers(
        &self,
        actor: &Actor,
        status: Option<VoucherStatus>,
        q: Option<&str>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<CashCheckVoucher>, Option<String>)> {
        let mut query = self.voucher_query(actor)?;
        if let Some(status) = status {
            query = query.filter(cash_check_vouchers::Column::Status.eq(status.as_str()));
        }
        if let Some(q) = util::normalize_optional(q) {
            query = query.filter(
                Condition::any()
                    .add(cash_check_vouchers::Column::PayTo.contains(&q))
                    .add(cash_check_vouchers::Column::CashVoucherNumber.contains(&q)),
            );
        }
        self.page_vouchers(query, limit, cursor).await
    }

    /// Vouchers released since midnight UTC.
    pub async fn list_cash_check_vouchers_released_today(
        &self,
        actor: &Actor,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<CashCheckVoucher>, Option<String>)> {
        let start = Utc::now()
            .date_naive()
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| EngineError::InvalidInput("invalid date window".to_owned()))?;
        let end = start + Duration::days(1);
        let query = self
            .voucher_query(actor)?
            .filter(cash_check_vouchers::Column::Status.eq(VoucherStatus::Released.as_str()))
            .filter(cash_check_vouchers::Column::ReleasedDate.gte(start))
            .filter(cash_check_vouchers::Column::ReleasedDate.lt(end));
        self.page_vouchers(query, limit, cursor).await
    }

    fn voucher_query(&self, actor: &Actor) -> ResultEngine<Select<cash_check_vouchers::Entity>> {
        let branch_id = actor.branch()?;
        Ok(cash_check_vouchers::Entity::find()
            .filter(
                cash_check_vouchers::Column::OrganizationId.eq(actor.organization_id.to_string()),
            )
            .filter(cash_check_vouchers::Column::BranchId.eq(branch_id.to_string())))
    }

    async fn page_vouchers(
        &self,
        query: Select<cash_check_vouchers::Entity>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<CashCheckVoucher>, Option<String>)> {
        let limit = cursor::clamp_limit(limit);

        let mut query = query
            .order_by_desc(cash_check_vouchers::Column::CreatedAt)
            .order_by_desc(cash_check_vouchers::Column::Id)
            .limit(limit + 1);
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                cash_check_vouchers::Column::CreatedAt,
                cash_check_vouchers::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(CashCheckVoucher::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|voucher| {
                    PageCursor {
                        created_at: voucher.created_at,
                        id: voucher.id.to_string(),
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
