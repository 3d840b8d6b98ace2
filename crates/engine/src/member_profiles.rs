//! Member profiles.
//!
//! A profile is the branch-side record of a cooperative member; it may link
//! to a login user but does not have to.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, ResultEngine, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub passbook_number: Option<String>,
    pub contact_number: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl MemberProfile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        actor: &Actor,
        user_id: Option<Uuid>,
        first_name: &str,
        middle_name: Option<&str>,
        last_name: &str,
        passbook_number: Option<&str>,
        contact_number: Option<&str>,
        description: Option<&str>,
    ) -> ResultEngine<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            user_id,
            first_name: util::normalize_required(first_name, "first name")?,
            middle_name: util::normalize_optional(middle_name),
            last_name: util::normalize_required(last_name, "last name")?,
            passbook_number: util::normalize_optional(passbook_number),
            contact_number: util::normalize_optional(contact_number),
            description: util::normalize_optional(description),
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }

    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "member_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub user_id: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub passbook_number: Option<String>,
    pub contact_number: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::general_ledgers::Entity")]
    GeneralLedgers,
}

impl Related<super::general_ledgers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GeneralLedgers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&MemberProfile> for ActiveModel {
    fn from(profile: &MemberProfile) -> Self {
        Self {
            id: ActiveValue::Set(profile.id.to_string()),
            organization_id: ActiveValue::Set(profile.organization_id.to_string()),
            branch_id: ActiveValue::Set(profile.branch_id.to_string()),
            user_id: ActiveValue::Set(profile.user_id.map(|id| id.to_string())),
            first_name: ActiveValue::Set(profile.first_name.clone()),
            middle_name: ActiveValue::Set(profile.middle_name.clone()),
            last_name: ActiveValue::Set(profile.last_name.clone()),
            passbook_number: ActiveValue::Set(profile.passbook_number.clone()),
            contact_number: ActiveValue::Set(profile.contact_number.clone()),
            description: ActiveValue::Set(profile.description.clone()),
            created_at: ActiveValue::Set(profile.created_at),
            created_by: ActiveValue::Set(profile.created_by.to_string()),
            updated_at: ActiveValue::Set(profile.updated_at),
            updated_by: ActiveValue::Set(profile.updated_by.to_string()),
        }
    }
}

impl TryFrom<Model> for MemberProfile {
    type Error = crate::EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "member profile")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            user_id: model
                .user_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "user"))
                .transpose()?,
            first_name: model.first_name,
            middle_name: model.middle_name,
            last_name: model.last_name,
            passbook_number: model.passbook_number,
            contact_number: model.contact_number,
            description: model.description,
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
    fn full_name_includes_middle_when_present() {
        let actor = staff_actor();
        let profile = MemberProfile::new(
            &actor,
            None,
            "Maria",
            Some("Clara"),
            "Santos",
            Some("PB-0001"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(profile.full_name(), "Maria Clara Santos");

        let profile = MemberProfile::new(&actor, None, "Jose", None, "Rizal", None, None, None)
            .unwrap();
        assert_eq!(profile.full_name(), "Jose Rizal");
    }

    #[test]
    fn new_rejects_blank_names() {
        let actor = staff_actor();
        assert!(MemberProfile::new(&actor, None, " ", None, "Santos", None, None, None).is_err());
        assert!(MemberProfile::new(&actor, None, "Maria", None, "  ", None, None, None).is_err());
    }
}
