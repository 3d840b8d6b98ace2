use sea_orm::{ActiveModelTrait, QueryFilter, QueryOrder, QuerySelect, prelude::*};

use crate::{
    Actor, Footstep, ResultEngine,
    cursor::{self, PageCursor},
    footsteps,
};

use super::Engine;

impl Engine {
    /// Records an activity trail entry for the acting user.
    pub async fn record_footstep(
        &self,
        actor: &Actor,
        module: &str,
        activity: &str,
        description: &str,
    ) -> ResultEngine<Footstep> {
        let footstep = Footstep::new(actor, module, activity, description);
        footsteps::ActiveModel::from(&footstep)
            .insert(&self.database)
            .await?;
        Ok(footstep)
    }

    /// The caller's own trail, across every organization they acted in.
    pub async fn list_footsteps_me(
        &self,
        actor: &Actor,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Footstep>, Option<String>)> {
        let query = footsteps::Entity::find()
            .filter(footsteps::Column::UserId.eq(actor.user_id.to_string()));
        self.page_footsteps(query, limit, cursor).await
    }

    /// Every user's trail within the caller's branch. Staff only.
    pub async fn list_footsteps_branch(
        &self,
        actor: &Actor,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Footstep>, Option<String>)> {
        actor.require_staff()?;
        let branch_id = actor.branch()?;
        let query = footsteps::Entity::find()
            .filter(footsteps::Column::OrganizationId.eq(actor.organization_id.to_string()))
            .filter(footsteps::Column::BranchId.eq(branch_id.to_string()));
        self.page_footsteps(query, limit, cursor).await
    }

    async fn page_footsteps(
        &self,
        query: Select<footsteps::Entity>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Footstep>, Option<String>)> {
        let limit = cursor::clamp_limit(limit);

        let mut query = query
            .order_by_desc(footsteps::Column::CreatedAt)
            .order_by_desc(footsteps::Column::Id)
            .limit(limit + 1);
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                footsteps::Column::CreatedAt,
                footsteps::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(Footstep::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|footstep| {
                    PageCursor {
                        created_at: footstep.created_at,
                        id: footstep.id.to_string(),
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
