//! Organizations table (minimal entity).
//!
//! Every scoped record carries an `organization_id`; the table itself only
//! names the cooperative.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultEngine, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Organization {
    pub fn new(name: &str) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            name: util::normalize_required(name, "organization name")?,
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::branches::Entity")]
    Branches,
}

impl Related<super::branches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Branches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Organization> for ActiveModel {
    fn from(org: &Organization) -> Self {
        Self {
            id: ActiveValue::Set(org.id.to_string()),
            name: ActiveValue::Set(org.name.clone()),
            created_at: ActiveValue::Set(org.created_at),
        }
    }
}

impl TryFrom<Model> for Organization {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "organization")?,
            name: model.name,
            created_at: model.created_at,
        })
    }
}
