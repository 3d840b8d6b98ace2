use chrono::Utc;
use sea_orm::{ActiveModelTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, Company, EngineError, ResultEngine, companies,
    cursor::{self, PageCursor},
    util,
};

use super::{Engine, with_tx};

fn scoped(actor: &Actor, model: Option<companies::Model>) -> ResultEngine<Company> {
    let branch_id = actor.branch()?;
    model
        .map(Company::try_from)
        .transpose()?
        .filter(|company| {
            company.organization_id == actor.organization_id && company.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("company".to_owned()))
}

impl Engine {
    pub async fn create_company(
        &self,
        actor: &Actor,
        name: &str,
        description: Option<&str>,
        contact_number: Option<&str>,
    ) -> ResultEngine<Company> {
        let company = Company::new(actor, name, description, contact_number)?;
        companies::ActiveModel::from(&company)
            .insert(&self.database)
            .await?;
        Ok(company)
    }

    pub async fn company(&self, actor: &Actor, id: Uuid) -> ResultEngine<Company> {
        let model = companies::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?;
        scoped(actor, model)
    }

    pub async fn update_company(
        &self,
        actor: &Actor,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        contact_number: Option<&str>,
    ) -> ResultEngine<Company> {
        with_tx!(self, |db_tx| {
            let model = companies::Entity::find_by_id(id.to_string()).one(&db_tx).await?;
            let mut company = scoped(actor, model)?;
            company.name = util::normalize_required(name, "company name")?;
            company.description = util::normalize_optional(description);
            company.contact_number = util::normalize_optional(contact_number);
            company.updated_at = Utc::now();
            company.updated_by = actor.user_id;
            companies::ActiveModel::from(&company).update(&db_tx).await?;
            Ok(company)
        })
    }

    pub async fn delete_company(&self, actor: &Actor, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = companies::Entity::find_by_id(id.to_string()).one(&db_tx).await?;
            let company = scoped(actor, model)?;
            companies::Entity::delete_by_id(company.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Deletes a set of companies; any miss aborts the whole batch.
    pub async fn delete_companies(&self, actor: &Actor, ids: &[Uuid]) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            for id in ids {
                let model = companies::Entity::find_by_id(id.to_string()).one(&db_tx).await?;
                scoped(actor, model)?;
            }
            companies::Entity::delete_many()
                .filter(
                    companies::Column::Id
                        .is_in(ids.iter().map(ToString::to_string).collect::<Vec<_>>()),
                )
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Lists the branch's companies newest first; `q` narrows by name.
    pub async fn list_companies(
        &self,
        actor: &Actor,
        q: Option<&str>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<Company>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut query = companies::Entity::find()
            .filter(companies::Column::OrganizationId.eq(actor.organization_id.to_string()))
            .filter(companies::Column::BranchId.eq(branch_id.to_string()))
            .order_by_desc(companies::Column::CreatedAt)
            .order_by_desc(companies::Column::Id)
            .limit(limit + 1);
        if let Some(q) = util::normalize_optional(q) {
            query = query.filter(companies::Column::Name.contains(&q));
        }
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                companies::Column::CreatedAt,
                companies::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(Company::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|company| {
                    PageCursor {
                        created_at: company.created_at,
                        id: company.id.to_string(),
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
