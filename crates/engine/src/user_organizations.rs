//! User-organization bindings.
//!
//! A binding scopes a user to an organization (and usually a branch) with a
//! role. Operations receive the caller's binding as an [`Actor`] and derive
//! every scope and role check from it.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Role of a user inside an organization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Owner,
    Employee,
    Member,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Employee => "employee",
            Self::Member => "member",
        }
    }

    /// Owners and employees run the back office; members only consume it.
    pub fn is_staff(self) -> bool {
        matches!(self, Self::Owner | Self::Employee)
    }
}

impl TryFrom<&str> for UserType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "owner" => Ok(Self::Owner),
            "employee" => Ok(Self::Employee),
            "member" => Ok(Self::Member),
            other => Err(EngineError::InvalidInput(format!(
                "invalid user type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserOrganization {
    pub id: Uuid,
    pub user_id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl UserOrganization {
    pub fn new(
        user_id: Uuid,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
        user_type: UserType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            organization_id,
            branch_id,
            user_type,
            created_at: Utc::now(),
        }
    }
}

/// The authenticated caller's scope, resolved once by the HTTP layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub user_organization_id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Option<Uuid>,
    pub user_type: UserType,
}

impl Actor {
    pub fn from_binding(binding: &UserOrganization) -> Self {
        Self {
            user_id: binding.user_id,
            user_organization_id: binding.id,
            organization_id: binding.organization_id,
            branch_id: binding.branch_id,
            user_type: binding.user_type,
        }
    }

    /// The branch this actor operates in; bindings without a branch cannot
    /// touch branch-scoped records.
    pub fn branch(&self) -> ResultEngine<Uuid> {
        self.branch_id.ok_or_else(|| {
            EngineError::InvalidInput("user is not assigned to a branch".to_string())
        })
    }

    pub fn require_staff(&self) -> ResultEngine<()> {
        if !self.user_type.is_staff() {
            return Err(EngineError::Forbidden(
                "operation requires an owner or employee".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_organizations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub user_id: String,
    pub organization_id: String,
    pub branch_id: Option<String>,
    pub user_type: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organization,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&UserOrganization> for ActiveModel {
    fn from(binding: &UserOrganization) -> Self {
        Self {
            id: ActiveValue::Set(binding.id.to_string()),
            user_id: ActiveValue::Set(binding.user_id.to_string()),
            organization_id: ActiveValue::Set(binding.organization_id.to_string()),
            branch_id: ActiveValue::Set(binding.branch_id.map(|id| id.to_string())),
            user_type: ActiveValue::Set(binding.user_type.as_str().to_string()),
            created_at: ActiveValue::Set(binding.created_at),
        }
    }
}

impl TryFrom<Model> for UserOrganization {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: crate::util::parse_uuid(&model.id, "user organization")?,
            user_id: crate::util::parse_uuid(&model.user_id, "user")?,
            organization_id: crate::util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: model
                .branch_id
                .as_deref()
                .map(|id| crate::util::parse_uuid(id, "branch"))
                .transpose()?,
            user_type: UserType::try_from(model.user_type.as_str())?,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(user_type: UserType, branch: Option<Uuid>) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: branch,
            user_type,
        }
    }

    #[test]
    fn user_type_round_trips() {
        for kind in [UserType::Owner, UserType::Employee, UserType::Member] {
            assert_eq!(UserType::try_from(kind.as_str()).unwrap(), kind);
        }
        assert!(UserType::try_from("teller").is_err());
    }

    #[test]
    fn member_is_not_staff() {
        let member = actor(UserType::Member, Some(Uuid::new_v4()));
        assert!(member.require_staff().is_err());
        assert!(actor(UserType::Employee, None).require_staff().is_ok());
    }

    #[test]
    fn branch_is_required_for_branch_scope() {
        let actor = actor(UserType::Employee, None);
        assert_eq!(
            actor.branch().unwrap_err(),
            EngineError::InvalidInput("user is not assigned to a branch".to_string())
        );
    }
}
