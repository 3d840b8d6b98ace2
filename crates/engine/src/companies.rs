//! Companies registered under a branch.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, ResultEngine, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl Company {
    pub fn new(
        actor: &Actor,
        name: &str,
        description: Option<&str>,
        contact_number: Option<&str>,
    ) -> ResultEngine<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            name: util::normalize_required(name, "company name")?,
            description: util::normalize_optional(description),
            contact_number: util::normalize_optional(contact_number),
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub name: String,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Company> for ActiveModel {
    fn from(company: &Company) -> Self {
        Self {
            id: ActiveValue::Set(company.id.to_string()),
            organization_id: ActiveValue::Set(company.organization_id.to_string()),
            branch_id: ActiveValue::Set(company.branch_id.to_string()),
            name: ActiveValue::Set(company.name.clone()),
            description: ActiveValue::Set(company.description.clone()),
            contact_number: ActiveValue::Set(company.contact_number.clone()),
            created_at: ActiveValue::Set(company.created_at),
            created_by: ActiveValue::Set(company.created_by.to_string()),
            updated_at: ActiveValue::Set(company.updated_at),
            updated_by: ActiveValue::Set(company.updated_by.to_string()),
        }
    }
}

impl TryFrom<Model> for Company {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "company")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            name: model.name,
            description: model.description,
            contact_number: model.contact_number,
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
            user_type: UserType::Employee,
        }
    }

    #[test]
    fn new_scopes_to_actor() {
        let actor = staff_actor();
        let company = Company::new(&actor, "Acme Traders", Some("supplier"), None).unwrap();
        assert_eq!(company.organization_id, actor.organization_id);
        assert_eq!(company.branch_id, actor.branch_id.unwrap());
        assert_eq!(company.created_by, actor.user_id);
    }

    #[test]
    fn new_requires_branch() {
        let mut actor = staff_actor();
        actor.branch_id = None;
        assert!(Company::new(&actor, "Acme Traders", None, None).is_err());
    }
}
