//! Payment types.
//!
//! Branch-defined payment methods used by adjustment entries and remittances.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, util};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentKind {
    Cash,
    Check,
    Online,
}

impl PaymentKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Check => "check",
            Self::Online => "online",
        }
    }
}

impl TryFrom<&str> for PaymentKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "cash" => Ok(Self::Cash),
            "check" => Ok(Self::Check),
            "online" => Ok(Self::Online),
            other => Err(EngineError::InvalidInput(format!(
                "invalid payment kind: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentType {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: PaymentKind,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl PaymentType {
    pub fn new(
        actor: &Actor,
        name: &str,
        description: Option<&str>,
        kind: PaymentKind,
    ) -> ResultEngine<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            name: util::normalize_required(name, "payment type name")?,
            description: util::normalize_optional(description),
            kind,
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payment_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub name: String,
    pub description: Option<String>,
    pub kind: String,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&PaymentType> for ActiveModel {
    fn from(payment_type: &PaymentType) -> Self {
        Self {
            id: ActiveValue::Set(payment_type.id.to_string()),
            organization_id: ActiveValue::Set(payment_type.organization_id.to_string()),
            branch_id: ActiveValue::Set(payment_type.branch_id.to_string()),
            name: ActiveValue::Set(payment_type.name.clone()),
            description: ActiveValue::Set(payment_type.description.clone()),
            kind: ActiveValue::Set(payment_type.kind.as_str().to_owned()),
            created_at: ActiveValue::Set(payment_type.created_at),
            created_by: ActiveValue::Set(payment_type.created_by.to_string()),
            updated_at: ActiveValue::Set(payment_type.updated_at),
            updated_by: ActiveValue::Set(payment_type.updated_by.to_string()),
        }
    }
}

impl TryFrom<Model> for PaymentType {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "payment type")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            name: model.name,
            description: model.description,
            kind: PaymentKind::try_from(model.kind.as_str())?,
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
    fn kind_round_trips_through_str() {
        for kind in [PaymentKind::Cash, PaymentKind::Check, PaymentKind::Online] {
            assert_eq!(PaymentKind::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(PaymentKind::try_from("wire").is_err());
    }

    #[test]
    fn new_normalizes_name() {
        let actor = Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Owner,
        };
        let payment_type =
            PaymentType::new(&actor, "  GCash  ", None, PaymentKind::Online).unwrap();
        assert_eq!(payment_type.name, "GCash");
        assert!(PaymentType::new(&actor, "   ", None, PaymentKind::Cash).is_err());
    }
}
