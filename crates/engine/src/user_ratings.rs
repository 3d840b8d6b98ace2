//! Peer ratings between users of a branch.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, util};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRating {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub rater_user_id: Uuid,
    pub ratee_user_id: Uuid,
    pub rate: i16,
    pub remark: String,
    pub created_at: DateTime<Utc>,
}

impl UserRating {
    /// Rate must fall in 1..=5 and a user can never rate themselves.
    pub fn new(actor: &Actor, ratee_user_id: Uuid, rate: i16, remark: &str) -> ResultEngine<Self> {
        if !(1..=5).contains(&rate) {
            return Err(EngineError::InvalidInput(
                "rate must be between 1 and 5".to_owned(),
            ));
        }
        if ratee_user_id == actor.user_id {
            return Err(EngineError::InvalidInput(
                "users cannot rate themselves".to_owned(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            rater_user_id: actor.user_id,
            ratee_user_id,
            rate,
            remark: util::normalize_required(remark, "remark")?,
            created_at: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub rater_user_id: String,
    pub ratee_user_id: String,
    pub rate: i16,
    pub remark: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::RateeUserId",
        to = "super::users::Column::Id"
    )]
    Ratee,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&UserRating> for ActiveModel {
    fn from(rating: &UserRating) -> Self {
        Self {
            id: ActiveValue::Set(rating.id.to_string()),
            organization_id: ActiveValue::Set(rating.organization_id.to_string()),
            branch_id: ActiveValue::Set(rating.branch_id.to_string()),
            rater_user_id: ActiveValue::Set(rating.rater_user_id.to_string()),
            ratee_user_id: ActiveValue::Set(rating.ratee_user_id.to_string()),
            rate: ActiveValue::Set(rating.rate),
            remark: ActiveValue::Set(rating.remark.clone()),
            created_at: ActiveValue::Set(rating.created_at),
        }
    }
}

impl TryFrom<Model> for UserRating {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "user rating")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            rater_user_id: util::parse_uuid(&model.rater_user_id, "user")?,
            ratee_user_id: util::parse_uuid(&model.ratee_user_id, "user")?,
            rate: model.rate,
            remark: model.remark,
            created_at: model.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserType;

    fn member_actor() -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Member,
        }
    }

    #[test]
    fn rate_must_stay_between_one_and_five() {
        let actor = member_actor();
        let ratee = Uuid::new_v4();
        assert!(UserRating::new(&actor, ratee, 0, "bad").is_err());
        assert!(UserRating::new(&actor, ratee, 6, "too good").is_err());
        assert!(UserRating::new(&actor, ratee, 5, "great teller").is_ok());
    }

    #[test]
    fn self_rating_is_rejected() {
        let actor = member_actor();
        let err = UserRating::new(&actor, actor.user_id, 3, "me").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidInput("users cannot rate themselves".to_owned())
        );
    }

    #[test]
    fn remark_is_required() {
        let actor = member_actor();
        assert!(UserRating::new(&actor, Uuid::new_v4(), 4, "   ").is_err());
    }
}
