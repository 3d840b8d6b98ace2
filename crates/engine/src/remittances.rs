//! Check and online remittances.
//!
//! Both kinds carry the same fields and only differ in the table they land
//! in, so they share one domain type with an entity module per table. Every
//! remittance belongs to the batch that was open when it was recorded.

use chrono::{DateTime, Utc};
use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remittance {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub transaction_batch_id: Uuid,
    pub employee_user_id: Uuid,
    pub reference_number: String,
    pub account_name: String,
    pub amount: i64,
    pub date_entry: DateTime<Utc>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl Remittance {
    pub fn new(
        actor: &Actor,
        transaction_batch_id: Uuid,
        reference_number: &str,
        account_name: &str,
        amount: i64,
        date_entry: DateTime<Utc>,
        description: Option<&str>,
    ) -> ResultEngine<Self> {
        check_amount(amount)?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            transaction_batch_id,
            employee_user_id: actor.user_id,
            reference_number: util::normalize_required(reference_number, "reference number")?,
            account_name: util::normalize_required(account_name, "account name")?,
            amount,
            date_entry,
            description: util::normalize_optional(description),
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }
}

pub(crate) fn check_amount(amount: i64) -> ResultEngine<()> {
    if amount <= 0 {
        return Err(EngineError::InvalidInput(
            "amount must be greater than zero".to_owned(),
        ));
    }
    Ok(())
}

macro_rules! remittance_entity {
    ($module:ident, $table:literal) => {
        pub mod $module {
            use sea_orm::entity::prelude::*;

            use super::{ActiveValue, Remittance};
            use crate::{EngineError, util};

            #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
            #[sea_orm(table_name = $table)]
            pub struct Model {
                #[sea_orm(primary_key, auto_increment = false)]
                pub id: String,
                pub organization_id: String,
                pub branch_id: String,
                pub transaction_batch_id: String,
                pub employee_user_id: String,
                pub reference_number: String,
                pub account_name: String,
                pub amount: i64,
                pub date_entry: DateTimeUtc,
                pub description: Option<String>,
                pub created_at: DateTimeUtc,
                pub created_by: String,
                pub updated_at: DateTimeUtc,
                pub updated_by: String,
            }

            #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
            pub enum Relation {
                #[sea_orm(
                    belongs_to = "crate::transaction_batches::Entity",
                    from = "Column::TransactionBatchId",
                    to = "crate::transaction_batches::Column::Id"
                )]
                TransactionBatch,
            }

            impl Related<crate::transaction_batches::Entity> for Entity {
                fn to() -> RelationDef {
                    Relation::TransactionBatch.def()
                }
            }

            impl ActiveModelBehavior for ActiveModel {}

            impl From<&Remittance> for ActiveModel {
                fn from(remittance: &Remittance) -> Self {
                    Self {
                        id: ActiveValue::Set(remittance.id.to_string()),
                        organization_id: ActiveValue::Set(
                            remittance.organization_id.to_string(),
                        ),
                        branch_id: ActiveValue::Set(remittance.branch_id.to_string()),
                        transaction_batch_id: ActiveValue::Set(
                            remittance.transaction_batch_id.to_string(),
                        ),
                        employee_user_id: ActiveValue::Set(
                            remittance.employee_user_id.to_string(),
                        ),
                        reference_number: ActiveValue::Set(
                            remittance.reference_number.clone(),
                        ),
                        account_name: ActiveValue::Set(remittance.account_name.clone()),
                        amount: ActiveValue::Set(remittance.amount),
                        date_entry: ActiveValue::Set(remittance.date_entry),
                        description: ActiveValue::Set(remittance.description.clone()),
                        created_at: ActiveValue::Set(remittance.created_at),
                        created_by: ActiveValue::Set(remittance.created_by.to_string()),
                        updated_at: ActiveValue::Set(remittance.updated_at),
                        updated_by: ActiveValue::Set(remittance.updated_by.to_string()),
                    }
                }
            }

            impl TryFrom<Model> for Remittance {
                type Error = EngineError;

                fn try_from(model: Model) -> Result<Self, Self::Error> {
                    Ok(Self {
                        id: util::parse_uuid(&model.id, "remittance")?,
                        organization_id: util::parse_uuid(
                            &model.organization_id,
                            "organization",
                        )?,
                        branch_id: util::parse_uuid(&model.branch_id, "branch")?,
                        transaction_batch_id: util::parse_uuid(
                            &model.transaction_batch_id,
                            "transaction batch",
                        )?,
                        employee_user_id: util::parse_uuid(&model.employee_user_id, "user")?,
                        reference_number: model.reference_number,
                        account_name: model.account_name,
                        amount: model.amount,
                        date_entry: model.date_entry,
                        description: model.description,
                        created_at: model.created_at,
                        created_by: util::parse_uuid(&model.created_by, "user")?,
                        updated_at: model.updated_at,
                        updated_by: util::parse_uuid(&model.updated_by, "user")?,
                    })
                }
            }
        }
    };
}

remittance_entity!(check, "check_remittances");
remittance_entity!(online, "online_remittances");

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
    fn amount_must_be_positive() {
        let actor = staff_actor();
        let batch_id = Uuid::new_v4();
        for amount in [0, -100] {
            assert!(
                Remittance::new(&actor, batch_id, "REF-1", "BDO 1234", amount, Utc::now(), None)
                    .is_err()
            );
        }
    }

    #[test]
    fn round_trips_through_both_tables() {
        let actor = staff_actor();
        let remittance = Remittance::new(
            &actor,
            Uuid::new_v4(),
            "REF-2",
            "BPI 5678",
            25_000,
            Utc::now(),
            Some("afternoon deposit"),
        )
        .unwrap();

        let model = check::Model {
            id: remittance.id.to_string(),
            organization_id: remittance.organization_id.to_string(),
            branch_id: remittance.branch_id.to_string(),
            transaction_batch_id: remittance.transaction_batch_id.to_string(),
            employee_user_id: remittance.employee_user_id.to_string(),
            reference_number: remittance.reference_number.clone(),
            account_name: remittance.account_name.clone(),
            amount: remittance.amount,
            date_entry: remittance.date_entry,
            description: remittance.description.clone(),
            created_at: remittance.created_at,
            created_by: remittance.created_by.to_string(),
            updated_at: remittance.updated_at,
            updated_by: remittance.updated_by.to_string(),
        };
        assert_eq!(Remittance::try_from(model).unwrap(), remittance);
    }
}
