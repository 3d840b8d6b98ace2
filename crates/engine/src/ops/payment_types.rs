use chrono::Utc;
use sea_orm::{ActiveModelTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Actor, EngineError, PaymentKind, PaymentType, ResultEngine,
    cursor::{self, PageCursor},
    payment_types, util,
};

use super::{Engine, with_tx};

fn scoped(actor: &Actor, model: Option<payment_types::Model>) -> ResultEngine<PaymentType> {
    let branch_id = actor.branch()?;
    model
        .map(PaymentType::try_from)
        .transpose()?
        .filter(|payment_type| {
            payment_type.organization_id == actor.organization_id
                && payment_type.branch_id == branch_id
        })
        .ok_or_else(|| EngineError::NotFound("payment type".to_owned()))
}

impl Engine {
    pub async fn create_payment_type(
        &self,
        actor: &Actor,
        name: &str,
        description: Option<&str>,
        kind: PaymentKind,
    ) -> ResultEngine<PaymentType> {
        let payment_type = PaymentType::new(actor, name, description, kind)?;
        payment_types::ActiveModel::from(&payment_type)
            .insert(&self.database)
            .await?;
        Ok(payment_type)
    }

    pub async fn payment_type(&self, actor: &Actor, id: Uuid) -> ResultEngine<PaymentType> {
        let model = payment_types::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?;
        scoped(actor, model)
    }

    pub async fn update_payment_type(
        &self,
        actor: &Actor,
        id: Uuid,
        name: &str,
        description: Option<&str>,
        kind: PaymentKind,
    ) -> ResultEngine<PaymentType> {
        with_tx!(self, |db_tx| {
            let model = payment_types::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let mut payment_type = scoped(actor, model)?;
            payment_type.name = util::normalize_required(name, "payment type name")?;
            payment_type.description = util::normalize_optional(description);
            payment_type.kind = kind;
            payment_type.updated_at = Utc::now();
            payment_type.updated_by = actor.user_id;
            payment_types::ActiveModel::from(&payment_type)
                .update(&db_tx)
                .await?;
            Ok(payment_type)
        })
    }

    pub async fn delete_payment_type(&self, actor: &Actor, id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let model = payment_types::Entity::find_by_id(id.to_string())
                .one(&db_tx)
                .await?;
            let payment_type = scoped(actor, model)?;
            payment_types::Entity::delete_by_id(payment_type.id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Deletes a set of payment types; any miss aborts the whole batch.
    pub async fn delete_payment_types(&self, actor: &Actor, ids: &[Uuid]) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            for id in ids {
                let model = payment_types::Entity::find_by_id(id.to_string())
                    .one(&db_tx)
                    .await?;
                scoped(actor, model)?;
            }
            payment_types::Entity::delete_many()
                .filter(
                    payment_types::Column::Id
                        .is_in(ids.iter().map(ToString::to_string).collect::<Vec<_>>()),
                )
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Lists the branch's payment types newest first; `q` narrows by name.
    pub async fn list_payment_types(
        &self,
        actor: &Actor,
        q: Option<&str>,
        limit: Option<u64>,
        cursor: Option<&str>,
    ) -> ResultEngine<(Vec<PaymentType>, Option<String>)> {
        let branch_id = actor.branch()?;
        let limit = cursor::clamp_limit(limit);

        let mut query = payment_types::Entity::find()
            .filter(payment_types::Column::OrganizationId.eq(actor.organization_id.to_string()))
            .filter(payment_types::Column::BranchId.eq(branch_id.to_string()))
            .order_by_desc(payment_types::Column::CreatedAt)
            .order_by_desc(payment_types::Column::Id)
            .limit(limit + 1);
        if let Some(q) = util::normalize_optional(q) {
            query = query.filter(payment_types::Column::Name.contains(&q));
        }
        if let Some(cursor) = cursor {
            let cursor = PageCursor::decode(cursor)?;
            query = query.filter(cursor::keyset(
                payment_types::Column::CreatedAt,
                payment_types::Column::Id,
                &cursor,
            ));
        }

        let rows = query.all(&self.database).await?;
        let has_more = rows.len() > limit as usize;

        let mut out = Vec::with_capacity(rows.len().min(limit as usize));
        for model in rows.into_iter().take(limit as usize) {
            out.push(PaymentType::try_from(model)?);
        }

        let next_cursor = if has_more {
            out.last()
                .map(|payment_type| {
                    PageCursor {
                        created_at: payment_type.created_at,
                        id: payment_type.id.to_string(),
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
