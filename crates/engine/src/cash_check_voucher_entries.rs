//! Voucher entry lines.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, balance, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashCheckVoucherEntry {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub cash_check_voucher_id: Uuid,
    pub account_id: Uuid,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl CashCheckVoucherEntry {
    pub fn new(
        actor: &Actor,
        cash_check_voucher_id: Uuid,
        account_id: Uuid,
        description: Option<&str>,
        debit: i64,
        credit: i64,
    ) -> ResultEngine<Self> {
        balance::check_amounts(debit, credit)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            cash_check_voucher_id,
            account_id,
            description: util::normalize_optional(description),
            debit,
            credit,
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cash_check_voucher_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub cash_check_voucher_id: String,
    pub account_id: String,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cash_check_vouchers::Entity",
        from = "Column::CashCheckVoucherId",
        to = "super::cash_check_vouchers::Column::Id"
    )]
    Voucher,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
}

impl Related<super::cash_check_vouchers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Voucher.def()
    }
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CashCheckVoucherEntry> for ActiveModel {
    fn from(entry: &CashCheckVoucherEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            organization_id: ActiveValue::Set(entry.organization_id.to_string()),
            branch_id: ActiveValue::Set(entry.branch_id.to_string()),
            cash_check_voucher_id: ActiveValue::Set(entry.cash_check_voucher_id.to_string()),
            account_id: ActiveValue::Set(entry.account_id.to_string()),
            description: ActiveValue::Set(entry.description.clone()),
            debit: ActiveValue::Set(entry.debit),
            credit: ActiveValue::Set(entry.credit),
            created_at: ActiveValue::Set(entry.created_at),
            created_by: ActiveValue::Set(entry.created_by.to_string()),
            updated_at: ActiveValue::Set(entry.updated_at),
            updated_by: ActiveValue::Set(entry.updated_by.to_string()),
        }
    }
}

impl TryFrom<Model> for CashCheckVoucherEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "voucher entry")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            cash_check_voucher_id: util::parse_uuid(
                &model.cash_check_voucher_id,
                "cash check voucher",
            )?,
            account_id: util::parse_uuid(&model.account_id, "account")?,
            description: model.description,
            debit: model.debit,
            credit: model.credit,
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

    #[test]
    fn new_validates_amounts() {
        let actor = Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Employee,
        };
        let voucher_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();
        assert!(
            CashCheckVoucherEntry::new(&actor, voucher_id, account_id, None, 0, 0).is_err()
        );
        let entry =
            CashCheckVoucherEntry::new(&actor, voucher_id, account_id, Some("rent"), 5_000, 0)
                .unwrap();
        assert_eq!(entry.debit, 5_000);
        assert_eq!(entry.cash_check_voucher_id, voucher_id);
    }
}
