//! Branches table (minimal entity).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultEngine, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Branch {
    pub fn new(organization_id: Uuid, name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id,
            name: util::normalize_required(name, "branch name")?,
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "branches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organization,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Branch> for ActiveModel {
    fn from(branch: &Branch) -> Self {
        Self {
            id: ActiveValue::Set(branch.id.to_string()),
            organization_id: ActiveValue::Set(branch.organization_id.to_string()),
            name: ActiveValue::Set(branch.name.clone()),
            created_at: ActiveValue::Set(branch.created_at),
        }
    }
}

impl TryFrom<Model> for Branch {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "branch")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            name: model.name,
            created_at: model.created_at,
        })
    }
}
