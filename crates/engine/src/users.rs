//! Users table.
//!
//! Authentication is username + password per request; organization roles live
//! in [`user_organizations`](crate::user_organizations).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ResultEngine, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: &str, password: &str, full_name: &str) -> ResultEngine<Self> {
        let username = util::normalize_required(username, "username")?;
        let full_name = util::normalize_required(full_name, "full name")?;
        let password = util::normalize_required(password, "password")?;
        Ok(Self {
            id: Uuid::new_v4(),
            username,
            password,
            full_name,
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_organizations::Entity")]
    UserOrganizations,
}

impl Related<super::user_organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserOrganizations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&User> for ActiveModel {
    fn from(user: &User) -> Self {
        Self {
            id: ActiveValue::Set(user.id.to_string()),
            username: ActiveValue::Set(user.username.clone()),
            password: ActiveValue::Set(user.password.clone()),
            full_name: ActiveValue::Set(user.full_name.clone()),
            created_at: ActiveValue::Set(user.created_at),
        }
    }
}

impl TryFrom<Model> for User {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "user")?,
            username: model.username,
            password: model.password,
            full_name: model.full_name,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_blank_username() {
        assert!(User::new("  ", "secret", "Ada Lovelace").is_err());
    }

    #[test]
    fn new_trims_fields() {
        let user = User::new(" ada ", "secret", " Ada Lovelace ").unwrap();
        assert_eq!(user.username, "ada");
        assert_eq!(user.full_name, "Ada Lovelace");
    }
}
