//! Chart-of-accounts entries.
//!
//! Every general ledger row posts against an account. The account's ledger
//! type decides its normal side: debits grow assets and expenses, credits
//! grow liabilities, equity and revenue.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, util};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneralLedgerType {
    Assets,
    Liabilities,
    Equity,
    Revenue,
    Expenses,
}

impl GeneralLedgerType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assets => "assets",
            Self::Liabilities => "liabilities",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expenses => "expenses",
        }
    }

    /// Applies a posting to a running balance following the account's
    /// normal side.
    pub const fn apply(self, balance: i64, debit: i64, credit: i64) -> i64 {
        match self {
            Self::Assets | Self::Expenses => balance + debit - credit,
            Self::Liabilities | Self::Equity | Self::Revenue => balance + credit - debit,
        }
    }
}

impl TryFrom<&str> for GeneralLedgerType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "assets" => Ok(Self::Assets),
            "liabilities" => Ok(Self::Liabilities),
            "equity" => Ok(Self::Equity),
            "revenue" => Ok(Self::Revenue),
            "expenses" => Ok(Self::Expenses),
            other => Err(EngineError::InvalidInput(format!(
                "invalid general ledger type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub general_ledger_type: GeneralLedgerType,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl Account {
    pub fn new(
        actor: &Actor,
        name: &str,
        description: Option<&str>,
        general_ledger_type: GeneralLedgerType,
    ) -> ResultEngine<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            name: util::normalize_required(name, "account name")?,
            description: util::normalize_optional(description),
            general_ledger_type,
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub name: String,
    pub description: Option<String>,
    pub general_ledger_type: String,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::account_histories::Entity")]
    AccountHistories,
    #[sea_orm(has_many = "super::general_ledgers::Entity")]
    GeneralLedgers,
}

impl Related<super::account_histories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccountHistories.def()
    }
}

impl Related<super::general_ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralLedgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Account> for ActiveModel {
    fn from(account: &Account) -> Self {
        Self {
            id: ActiveValue::Set(account.id.to_string()),
            organization_id: ActiveValue::Set(account.organization_id.to_string()),
            branch_id: ActiveValue::Set(account.branch_id.to_string()),
            name: ActiveValue::Set(account.name.clone()),
            description: ActiveValue::Set(account.description.clone()),
            general_ledger_type: ActiveValue::Set(account.general_ledger_type.as_str().to_owned()),
            created_at: ActiveValue::Set(account.created_at),
            created_by: ActiveValue::Set(account.created_by.to_string()),
            updated_at: ActiveValue::Set(account.updated_at),
            updated_by: ActiveValue::Set(account.updated_by.to_string()),
        }
    }
}

impl TryFrom<Model> for Account {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "account")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            name: model.name,
            description: model.description,
            general_ledger_type: GeneralLedgerType::try_from(model.general_ledger_type.as_str())?,
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

    #[test]
    fn ledger_type_round_trips_through_str() {
        for ledger_type in [
            GeneralLedgerType::Assets,
            GeneralLedgerType::Liabilities,
            GeneralLedgerType::Equity,
            GeneralLedgerType::Revenue,
            GeneralLedgerType::Expenses,
        ] {
            assert_eq!(
                GeneralLedgerType::try_from(ledger_type.as_str()).unwrap(),
                ledger_type
            );
        }
        assert!(GeneralLedgerType::try_from("contra").is_err());
    }

    #[test]
    fn apply_follows_the_normal_side() {
        assert_eq!(GeneralLedgerType::Assets.apply(1_000, 500, 200), 1_300);
        assert_eq!(GeneralLedgerType::Expenses.apply(0, 250, 0), 250);
        assert_eq!(GeneralLedgerType::Liabilities.apply(1_000, 500, 200), 700);
        assert_eq!(GeneralLedgerType::Equity.apply(0, 0, 400), 400);
        assert_eq!(GeneralLedgerType::Revenue.apply(100, 50, 75), 125);
    }
}
