//! Adjustment entries.
//!
//! Manual corrections posted straight to the general ledger. The amounts are
//! immutable once posted; only the narrative fields can be edited afterwards.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, balance, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustmentEntry {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub account_id: Uuid,
    pub member_profile_id: Option<Uuid>,
    pub employee_user_id: Uuid,
    pub payment_type_id: Option<Uuid>,
    pub reference_number: String,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl AdjustmentEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        actor: &Actor,
        account_id: Uuid,
        member_profile_id: Option<Uuid>,
        payment_type_id: Option<Uuid>,
        reference_number: &str,
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
            account_id,
            member_profile_id,
            employee_user_id: actor.user_id,
            payment_type_id,
            reference_number: util::normalize_required(reference_number, "reference number")?,
            description: util::normalize_optional(description),
            debit,
            credit,
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }

    /// The ledger row already carries the amounts, so an edit may only touch
    /// the narrative fields.
    pub fn revise(
        &mut self,
        actor: &Actor,
        reference_number: &str,
        description: Option<&str>,
    ) -> ResultEngine<()> {
        self.reference_number = util::normalize_required(reference_number, "reference number")?;
        self.description = util::normalize_optional(description);
        self.updated_at = Utc::now();
        self.updated_by = actor.user_id;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "adjustment_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub account_id: String,
    pub member_profile_id: Option<String>,
    pub employee_user_id: String,
    pub payment_type_id: Option<String>,
    pub reference_number: String,
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
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::payment_types::Entity",
        from = "Column::PaymentTypeId",
        to = "super::payment_types::Column::Id"
    )]
    PaymentType,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&AdjustmentEntry> for ActiveModel {
    fn from(entry: &AdjustmentEntry) -> Self {
        Self {
            id: ActiveValue::Set(entry.id.to_string()),
            organization_id: ActiveValue::Set(entry.organization_id.to_string()),
            branch_id: ActiveValue::Set(entry.branch_id.to_string()),
            account_id: ActiveValue::Set(entry.account_id.to_string()),
            member_profile_id: ActiveValue::Set(
                entry.member_profile_id.map(|id| id.to_string()),
            ),
            employee_user_id: ActiveValue::Set(entry.employee_user_id.to_string()),
            payment_type_id: ActiveValue::Set(entry.payment_type_id.map(|id| id.to_string())),
            reference_number: ActiveValue::Set(entry.reference_number.clone()),
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

impl TryFrom<Model> for AdjustmentEntry {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "adjustment entry")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            account_id: util::parse_uuid(&model.account_id, "account")?,
            member_profile_id: model
                .member_profile_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "member profile"))
                .transpose()?,
            employee_user_id: util::parse_uuid(&model.employee_user_id, "user")?,
            payment_type_id: model
                .payment_type_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "payment type"))
                .transpose()?,
            reference_number: model.reference_number,
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

    fn staff_actor() -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Owner,
        }
    }

    #[test]
    fn new_requires_an_amount_on_one_side() {
        let actor = staff_actor();
        assert!(
            AdjustmentEntry::new(&actor, Uuid::new_v4(), None, None, "ADJ-1", None, 0, 0)
                .is_err()
        );
    }

    #[test]
    fn revise_keeps_the_amounts() {
        let actor = staff_actor();
        let mut entry = AdjustmentEntry::new(
            &actor,
            Uuid::new_v4(),
            None,
            None,
            "ADJ-2",
            Some("typo fix"),
            0,
            750,
        )
        .unwrap();
        entry.revise(&actor, "ADJ-2-b", None).unwrap();
        assert_eq!(entry.reference_number, "ADJ-2-b");
        assert_eq!(entry.credit, 750);
        assert_eq!(entry.description, None);
    }
}
