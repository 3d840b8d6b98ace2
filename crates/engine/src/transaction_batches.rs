//! Transaction batches.
//!
//! A batch is one teller's working session. At most one batch per employee
//! and branch is open at a time; ledger postings require an open batch and
//! the balancing totals are recomputed whenever a posting or remittance
//! lands in it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, util};

/// Ledger sums per source, fed into [`TransactionBatch::rebalance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchLedgerSums {
    /// Net of `payment` rows (debit minus credit).
    pub cash_collection: i64,
    /// Net of `deposit` rows.
    pub deposit_entry: i64,
    /// Net of `withdraw` rows; withdrawals post credit-heavy so this is
    /// usually negative.
    pub withdraw: i64,
    pub check_remittance: i64,
    pub online_remittance: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBatch {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub employee_user_id: Uuid,
    pub batch_name: String,
    pub is_closed: bool,
    pub beginning_balance: i64,
    pub deposit_in_bank: i64,
    pub cash_count_total: i64,
    pub total_cash_collection: i64,
    pub total_deposit_entry: i64,
    pub total_cash_handled: i64,
    pub total_withdrawals: i64,
    pub total_supposed_remittance: i64,
    pub total_check_remittance: i64,
    pub total_online_remittance: i64,
    pub total_cash_on_hand: i64,
    pub total_deposit_in_bank: i64,
    pub total_actual_remittance: i64,
    pub total_actual_supposed_comparison: i64,
    pub grand_total: i64,
    pub ended_at: Option<DateTime<Utc>>,
    pub ended_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl TransactionBatch {
    pub fn start(
        actor: &Actor,
        batch_name: &str,
        beginning_balance: i64,
        deposit_in_bank: i64,
    ) -> ResultEngine<Self> {
        util::require_non_negative(beginning_balance, "beginning balance")?;
        util::require_non_negative(deposit_in_bank, "deposit in bank")?;
        let now = Utc::now();
        let mut batch = Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            employee_user_id: actor.user_id,
            batch_name: util::normalize_required(batch_name, "batch name")?,
            is_closed: false,
            beginning_balance,
            deposit_in_bank,
            cash_count_total: 0,
            total_cash_collection: 0,
            total_deposit_entry: 0,
            total_cash_handled: 0,
            total_withdrawals: 0,
            total_supposed_remittance: 0,
            total_check_remittance: 0,
            total_online_remittance: 0,
            total_cash_on_hand: 0,
            total_deposit_in_bank: 0,
            total_actual_remittance: 0,
            total_actual_supposed_comparison: 0,
            grand_total: 0,
            ended_at: None,
            ended_by: None,
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        };
        batch.rebalance(BatchLedgerSums::default());
        Ok(batch)
    }

    /// Recomputes every derived total from the operator-entered figures and
    /// the ledger sums of this batch.
    pub fn rebalance(&mut self, sums: BatchLedgerSums) {
        self.total_cash_collection = sums.cash_collection;
        self.total_deposit_entry = sums.deposit_entry;
        self.total_cash_handled =
            self.beginning_balance + self.deposit_in_bank + self.total_cash_collection;
        self.total_withdrawals = -sums.withdraw;
        self.total_supposed_remittance = self.total_cash_handled - self.total_withdrawals;
        self.total_check_remittance = sums.check_remittance;
        self.total_online_remittance = sums.online_remittance;
        self.total_cash_on_hand = self.cash_count_total;
        self.total_deposit_in_bank = self.deposit_in_bank;
        self.total_actual_remittance = self.total_check_remittance
            + self.total_online_remittance
            + self.total_cash_on_hand
            + self.total_deposit_in_bank;
        self.total_actual_supposed_comparison =
            self.total_actual_remittance - self.total_supposed_remittance;
        self.grand_total = self.cash_count_total + self.deposit_in_bank + self.beginning_balance;
    }

    /// Closes the batch with the operator's counted cash.
    pub fn end(
        &mut self,
        actor: &Actor,
        cash_count_total: i64,
        sums: BatchLedgerSums,
    ) -> ResultEngine<()> {
        if self.is_closed {
            return Err(EngineError::InvalidInput(
                "transaction batch already ended".to_owned(),
            ));
        }
        util::require_non_negative(cash_count_total, "cash count total")?;
        self.cash_count_total = cash_count_total;
        self.rebalance(sums);
        self.is_closed = true;
        self.ended_at = Some(Utc::now());
        self.ended_by = Some(actor.user_id);
        self.updated_at = Utc::now();
        self.updated_by = actor.user_id;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transaction_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub employee_user_id: String,
    pub batch_name: String,
    pub is_closed: bool,
    pub beginning_balance: i64,
    pub deposit_in_bank: i64,
    pub cash_count_total: i64,
    pub total_cash_collection: i64,
    pub total_deposit_entry: i64,
    pub total_cash_handled: i64,
    pub total_withdrawals: i64,
    pub total_supposed_remittance: i64,
    pub total_check_remittance: i64,
    pub total_online_remittance: i64,
    pub total_cash_on_hand: i64,
    pub total_deposit_in_bank: i64,
    pub total_actual_remittance: i64,
    pub total_actual_supposed_comparison: i64,
    pub grand_total: i64,
    pub ended_at: Option<DateTimeUtc>,
    pub ended_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::general_ledgers::Entity")]
    GeneralLedgers,
    #[sea_orm(has_many = "super::remittances::check::Entity")]
    CheckRemittances,
    #[sea_orm(has_many = "super::remittances::online::Entity")]
    OnlineRemittances,
}

impl Related<super::general_ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralLedgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&TransactionBatch> for ActiveModel {
    fn from(batch: &TransactionBatch) -> Self {
        Self {
            id: ActiveValue::Set(batch.id.to_string()),
            organization_id: ActiveValue::Set(batch.organization_id.to_string()),
            branch_id: ActiveValue::Set(batch.branch_id.to_string()),
            employee_user_id: ActiveValue::Set(batch.employee_user_id.to_string()),
            batch_name: ActiveValue::Set(batch.batch_name.clone()),
            is_closed: ActiveValue::Set(batch.is_closed),
            beginning_balance: ActiveValue::Set(batch.beginning_balance),
            deposit_in_bank: ActiveValue::Set(batch.deposit_in_bank),
            cash_count_total: ActiveValue::Set(batch.cash_count_total),
            total_cash_collection: ActiveValue::Set(batch.total_cash_collection),
            total_deposit_entry: ActiveValue::Set(batch.total_deposit_entry),
            total_cash_handled: ActiveValue::Set(batch.total_cash_handled),
            total_withdrawals: ActiveValue::Set(batch.total_withdrawals),
            total_supposed_remittance: ActiveValue::Set(batch.total_supposed_remittance),
            total_check_remittance: ActiveValue::Set(batch.total_check_remittance),
            total_online_remittance: ActiveValue::Set(batch.total_online_remittance),
            total_cash_on_hand: ActiveValue::Set(batch.total_cash_on_hand),
            total_deposit_in_bank: ActiveValue::Set(batch.total_deposit_in_bank),
            total_actual_remittance: ActiveValue::Set(batch.total_actual_remittance),
            total_actual_supposed_comparison: ActiveValue::Set(
                batch.total_actual_supposed_comparison,
            ),
            grand_total: ActiveValue::Set(batch.grand_total),
            ended_at: ActiveValue::Set(batch.ended_at),
            ended_by: ActiveValue::Set(batch.ended_by.map(|id| id.to_string())),
            created_at: ActiveValue::Set(batch.created_at),
            created_by: ActiveValue::Set(batch.created_by.to_string()),
            updated_at: ActiveValue::Set(batch.updated_at),
            updated_by: ActiveValue::Set(batch.updated_by.to_string()),
        }
    }
}

impl TryFrom<Model> for TransactionBatch {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "transaction batch")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            employee_user_id: util::parse_uuid(&model.employee_user_id, "user")?,
            batch_name: model.batch_name,
            is_closed: model.is_closed,
            beginning_balance: model.beginning_balance,
            deposit_in_bank: model.deposit_in_bank,
            cash_count_total: model.cash_count_total,
            total_cash_collection: model.total_cash_collection,
            total_deposit_entry: model.total_deposit_entry,
            total_cash_handled: model.total_cash_handled,
            total_withdrawals: model.total_withdrawals,
            total_supposed_remittance: model.total_supposed_remittance,
            total_check_remittance: model.total_check_remittance,
            total_online_remittance: model.total_online_remittance,
            total_cash_on_hand: model.total_cash_on_hand,
            total_deposit_in_bank: model.total_deposit_in_bank,
            total_actual_remittance: model.total_actual_remittance,
            total_actual_supposed_comparison: model.total_actual_supposed_comparison,
            grand_total: model.grand_total,
            ended_at: model.ended_at,
            ended_by: model
                .ended_by
                .as_deref()
                .map(|id| util::parse_uuid(id, "user"))
                .transpose()?,
            created_at: model.created_at,
            created_by: util::parse_uuid(&model.created_by, "user")?,
            updated_at: model.updated_at,
            updated_by: util::parse_uuid(&model.updated_by, "user")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserType;

    fn staff_actor() -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Employee,
        }
    }

    #[test]
    fn start_seeds_the_derived_totals() {
        let actor = staff_actor();
        let batch = TransactionBatch::start(&actor, "morning shift", 10_000, 2_000).unwrap();
        assert!(!batch.is_closed);
        assert_eq!(batch.total_cash_handled, 12_000);
        assert_eq!(batch.total_supposed_remittance, 12_000);
        assert_eq!(batch.total_deposit_in_bank, 2_000);
        assert_eq!(batch.grand_total, 12_000);
    }

    #[test]
    fn rebalance_folds_ledger_sums_into_the_totals() {
        let actor = staff_actor();
        let mut batch = TransactionBatch::start(&actor, "afternoon shift", 5_000, 0).unwrap();
        batch.rebalance(BatchLedgerSums {
            cash_collection: 8_000,
            deposit_entry: 3_000,
            withdraw: -2_000,
            check_remittance: 4_000,
            online_remittance: 1_000,
        });
        assert_eq!(batch.total_cash_handled, 13_000);
        assert_eq!(batch.total_withdrawals, 2_000);
        assert_eq!(batch.total_supposed_remittance, 11_000);
        assert_eq!(batch.total_actual_remittance, 5_000);
        assert_eq!(batch.total_actual_supposed_comparison, -6_000);
    }

    #[test]
    fn end_closes_once() {
        let actor = staff_actor();
        let mut batch = TransactionBatch::start(&actor, "late shift", 1_000, 0).unwrap();
        batch.end(&actor, 1_000, BatchLedgerSums::default()).unwrap();
        assert!(batch.is_closed);
        assert_eq!(batch.total_cash_on_hand, 1_000);
        assert_eq!(batch.ended_by, Some(actor.user_id));
        assert!(
            batch
                .end(&actor, 1_000, BatchLedgerSums::default())
                .is_err()
        );
    }

    #[test]
    fn negative_operator_figures_are_rejected() {
        let actor = staff_actor();
        assert!(TransactionBatch::start(&actor, "shift", -1, 0).is_err());
        assert!(TransactionBatch::start(&actor, "shift", 0, -1).is_err());
    }
}
