//! Account history snapshots.
//!
//! Before an account row changes, the previous values are copied here so the
//! chart of accounts keeps an audit trail.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Actor, EngineError,
    accounts::{Account, GeneralLedgerType},
    util,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHistory {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub account_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub general_ledger_type: GeneralLedgerType,
    pub changed_at: DateTime<Utc>,
    pub changed_by: Uuid,
}

impl AccountHistory {
    /// Snapshots the account as it stands right before a change.
    pub fn snapshot(account: &Account, actor: &Actor) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id: account.organization_id,
            branch_id: account.branch_id,
            account_id: account.id,
            name: account.name.clone(),
            description: account.description.clone(),
            general_ledger_type: account.general_ledger_type,
            changed_at: Utc::now(),
            changed_by: actor.user_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "account_histories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub account_id: String,
    pub name: String,
    pub description: Option<String>,
    pub general_ledger_type: String,
    pub changed_at: DateTimeUtc,
    pub changed_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Accounts,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Accounts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&AccountHistory> for ActiveModel {
    fn from(history: &AccountHistory) -> Self {
        Self {
            id: ActiveValue::Set(history.id.to_string()),
            organization_id: ActiveValue::Set(history.organization_id.to_string()),
            branch_id: ActiveValue::Set(history.branch_id.to_string()),
            account_id: ActiveValue::Set(history.account_id.to_string()),
            name: ActiveValue::Set(history.name.clone()),
            description: ActiveValue::Set(history.description.clone()),
            general_ledger_type: ActiveValue::Set(history.general_ledger_type.as_str().to_owned()),
            changed_at: ActiveValue::Set(history.changed_at),
            changed_by: ActiveValue::Set(history.changed_by.to_string()),
        }
    }
}

impl TryFrom<Model> for AccountHistory {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "account history")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            account_id: util::parse_uuid(&model.account_id, "account")?,
            name: model.name,
            description: model.description,
            general_ledger_type: GeneralLedgerType::try_from(model.general_ledger_type.as_str())?,
            changed_at: model.changed_at,
            changed_by: util::parse_uuid(&model.changed_by, "user")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserType;

    #[test]
    fn snapshot_copies_the_current_values() {
        let actor = Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Owner,
        };
        let account = Account::new(
            &actor,
            "Cash on Hand",
            Some("till"),
            GeneralLedgerType::Assets,
        )
        .unwrap();

        let history = AccountHistory::snapshot(&account, &actor);
        assert_eq!(history.account_id, account.id);
        assert_eq!(history.name, account.name);
        assert_eq!(history.general_ledger_type, account.general_ledger_type);
        assert_eq!(history.changed_by, actor.user_id);
    }
}
