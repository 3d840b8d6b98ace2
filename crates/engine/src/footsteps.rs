//! Footsteps.
//!
//! Append-only audit trail. A footstep is recorded after each handled
//! request, whether it succeeded or failed, and is never updated.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Footstep {
    pub id: Uuid,
    pub organization_id: Option<Uuid>,
    pub branch_id: Option<Uuid>,
    pub user_id: Uuid,
    pub user_organization_id: Option<Uuid>,
    pub module: String,
    pub activity: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Footstep {
    pub fn new(actor: &Actor, module: &str, activity: &str, description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            organization_id: Some(actor.organization_id),
            branch_id: actor.branch_id,
            user_id: actor.user_id,
            user_organization_id: Some(actor.user_organization_id),
            module: module.to_owned(),
            activity: activity.to_owned(),
            description: description.to_owned(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "footsteps")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: Option<String>,
    pub branch_id: Option<String>,
    pub user_id: String,
    pub user_organization_id: Option<String>,
    pub module: String,
    pub activity: String,
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Footstep> for ActiveModel {
    fn from(footstep: &Footstep) -> Self {
        Self {
            id: ActiveValue::Set(footstep.id.to_string()),
            organization_id: ActiveValue::Set(
                footstep.organization_id.map(|id| id.to_string()),
            ),
            branch_id: ActiveValue::Set(footstep.branch_id.map(|id| id.to_string())),
            user_id: ActiveValue::Set(footstep.user_id.to_string()),
            user_organization_id: ActiveValue::Set(
                footstep.user_organization_id.map(|id| id.to_string()),
            ),
            module: ActiveValue::Set(footstep.module.clone()),
            activity: ActiveValue::Set(footstep.activity.clone()),
            description: ActiveValue::Set(footstep.description.clone()),
            created_at: ActiveValue::Set(footstep.created_at),
        }
    }
}

impl TryFrom<Model> for Footstep {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "footstep")?,
            organization_id: model
                .organization_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "organization"))
                .transpose()?,
            branch_id: model
                .branch_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "branch"))
                .transpose()?,
            user_id: util::parse_uuid(&model.user_id, "user")?,
            user_organization_id: model
                .user_organization_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "user organization"))
                .transpose()?,
            module: model.module,
            activity: model.activity,
            description: model.description,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserType;

    #[test]
    fn new_captures_the_actor_scope() {
        let actor = Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Employee,
        };
        let footstep = Footstep::new(&actor, "accounts", "create", "created \"Cash on Hand\"");
        assert_eq!(footstep.user_id, actor.user_id);
        assert_eq!(footstep.organization_id, Some(actor.organization_id));
        assert_eq!(footstep.branch_id, actor.branch_id);
        assert_eq!(footstep.module, "accounts");
    }
}
