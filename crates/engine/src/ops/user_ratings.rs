use sea_orm::{ActiveModelTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, EngineError, ResultEngine, UserRating,
    cursor::{self, PageCursor},
    user_ratings, users,
};

use super::{Engine, with_tx};

fn scoped(actor: &Actor, model: Option<user_ratings::Model>) -> ResultEngine<UserRating> {
    let branch_id = actor.branch()?;
    model
        .map(UserRating::try_from)
        .transpose()?
        .filter(|rating| {
            rating.organization_id == actor.organization_id && rating.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("user rating".to_owned()))
}

impl Engine {
    pub async fn create_user_rating(
        &self,
        actor: &Actor,
        ratee_user_id: Uuid,
        rate: i16,
        remark: &str,
    ) -> ResultEngine<UserRating> {
        let rating = UserRating::new(actor, ratee_user_id, rate, remark)?;
        with_tx!(self, |db_tx| {
            users::Entity::find_by_id(ratee_user_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("user".to_owned()))?;
            user_ratings::ActiveModel::from(&rating).insert(&db_tx).await?;
            Ok(rating)
        })
    }

    pub async fn user_rating(&self, actor: &Actor, id: Uuid) -> ResultEngine<UserRating> {
        let model = user_ratings::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?;
        scoped(actor, model)
    }

    pub async fn delete_user_rating(&self, actor: &Actor, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = user_ratings::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let rating = scoped(actor, model)?;
            user_ratings::Entity::delete_by_id(rating.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Lists the branch's ratings newest first, optionally for one ratee.
    pub async fn list_user_ratings(
        &self,
        actor: &Actor,
        ratee_user_id: Option<Uuid>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<UserRating>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut query = user_ratings::Entity::find()
            .filter(user_ratings::Column::OrganizationId.eq(actor.organization_id.to_string()))
            .filter(user_ratings::Column::BranchId.eq(branch_id.to_string()))
            .order_by_desc(user_ratings::Column::CreatedAt)
            .order_by_desc(user_ratings::Column::Id)
            .limit(limit + 1);
        if let Some(ratee_user_id) = ratee_user_id {
            query =
                query.filter(user_ratings::Column::RateeUserId.eq(ratee_user_id.to_string()));
        }
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                user_ratings::Column::CreatedAt,
                user_ratings::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(UserRating::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|rating| {
                    PageCursor {
                        created_at: rating.created_at,
                        id: rating.id.to_string(),
                    }
                    .encode()
                })
                .transpose()?
        } else {
            None
        };

        Ok((out, next_cursor))
    }
}
