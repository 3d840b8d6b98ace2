use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, Condition, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{
    Actor, EngineError, MemberProfile, ResultEngine,
    cursor::{self, PageCursor},
    member_profiles, util,
};

use super::{Engine, with_tx};

/// Create/update payload for a member profile.
#[derive(Clone, Debug, Default)]
pub struct MemberProfileInput {
    pub user_id: Option<Uuid>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub passbook_number: Option<String>,
    pub contact_number: Option<String>,
    pub description: Option<String>,
}

fn scoped(actor: &Actor, model: Option<member_profiles::Model>) -> ResultEngine<MemberProfile> {
    let branch_id = actor.branch()?;
    model
        .map(MemberProfile::try_from)
        .transpose()?
        .filter(|profile| {
            profile.organization_id == actor.organization_id && profile.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("member profile".to_owned()))
}

impl Engine {
    pub async fn create_member_profile(
        &self,
        actor: &Actor,
        input: &MemberProfileInput,
    ) -> ResultEngine<MemberProfile> {
        let profile = MemberProfile::new(
            actor,
            input.user_id,
            &input.first_name,
            input.middle_name.as_deref(),
            &input.last_name,
            input.passbook_number.as_deref(),
            input.contact_number.as_deref(),
            input.description.as_deref(),
        )?;
        member_profiles::ActiveModel::from(&profile)
            .insert(&self.database)
            .await?;
        Ok(profile)
    }

    pub async fn member_profile(&self, actor: &Actor, id: Uuid) -> ResultEngine<MemberProfile> {
        let model = member_profiles::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?;
        scoped(actor, model)
    }

    pub async fn update_member_profile(
        &self,
        actor: &Actor,
        id: Uuid,
        input: &MemberProfileInput,
    ) -> ResultEngine<MemberProfile> {
        with_tx!(self, |db_tx| {
            let model = member_profiles::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut profile = scoped(actor, model)?;
            profile.user_id = input.user_id;
            profile.first_name = util::normalize_required(&input.first_name, "first name")?;
            profile.middle_name = util::normalize_optional(input.middle_name.as_deref());
            profile.last_name = util::normalize_required(&input.last_name, "last name")?;
            profile.passbook_number = util::normalize_optional(input.passbook_number.as_deref());
            profile.contact_number = util::normalize_optional(input.contact_number.as_deref());
            profile.description = util::normalize_optional(input.description.as_deref());
            profile.updated_at = Utc::now();
            profile.updated_by = actor.user_id;
            member_profiles::ActiveModel::from(&profile)
                .update(&db_tx)
                .await?;
            Ok(profile)
        })
    }

    pub async fn delete_member_profile(&self, actor: &Actor, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = member_profiles::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let profile = scoped(actor, model)?;
            member_profiles::Entity::delete_by_id(profile.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Deletes a set of member profiles; any miss aborts the whole batch.
    pub async fn delete_member_profiles(&self, actor: &Actor, ids: &[Uuid]) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            for id in ids {
                let model = member_profiles::Entity::find_by_id(id.to_string())
                    .one(&db_tx)
                    .await?;
                scoped(actor, model)?;
            }
            member_profiles::Entity::delete_many()
                .filter(
                    member_profiles::Column::Id
                        .is_in(ids.iter().map(ToString::to_string).collect::<Vec<_>>()),
                )
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Lists the branch's member profiles newest first; `q` matches names and
    /// passbook numbers.
    pub async fn list_member_profiles(
        &self,
        actor: &Actor,
        q: Option<&str>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<MemberProfile>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut query = member_profiles::Entity::find()
            .filter(member_profiles::Column::OrganizationId.eq(actor.organization_id.to_string()))
            .filter(member_profiles::Column::BranchId.eq(branch_id.to_string()))
            .order_by_desc(member_profiles::Column::CreatedAt)
            .order_by_desc(member_profiles::Column::Id)
            .limit(limit + 1);
        if let Some(q) = util::normalize_optional(q) {
            query = query.filter(
                Condition::any()
                    .add(member_profiles::Column::FirstName.contains(&q))
                    .add(member_profiles::Column::LastName.contains(&q))
                    .add(member_profiles::Column::PassbookNumber.contains(&q)),
            );
        }
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                member_profiles::Column::CreatedAt,
                member_profiles::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(MemberProfile::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|profile| {
                    PageCursor {
                        created_at: profile.created_at,
                        id: profile.id.to_string(),
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
