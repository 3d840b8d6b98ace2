//! Credential and organization-binding lookups used by the HTTP layer.

use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    Branch, EngineError, Organization, ResultEngine, User, UserOrganization, branches,
    organizations, user_organizations, users,
};

use super::Engine;

/// A binding joined with the names the API exposes alongside it.
pub(crate) type NamedBinding = (UserOrganization, Organization, Option<Branch>);

impl Engine {
    /// Resolves Basic credentials to a user. Unknown usernames and wrong
    /// passwords fail the same way.
    pub async fn authenticate(&self, username: &str, password: &str) -> ResultEngine<User> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.database)
            .await?;
        let Some(model) = model else {
            return Err(EngineError::Unauthorized("invalid credentials".to_owned()));
        };
        if model.password != password {
            return Err(EngineError::Unauthorized("invalid credentials".to_owned()));
        }
        User::try_from(model)
    }

    /// Loads one organization binding; it must belong to the given user.
    pub async fn binding_for(
        &self,
        user_id: Uuid,
        user_organization_id: Uuid,
    ) -> ResultEngine<UserOrganization> {
        let model = user_organizations::Entity::find_by_id(user_organization_id.to_string())
            .one(&self.database)
            .await?;
        let Some(model) = model else {
            return Err(EngineError::Unauthorized(
                "invalid organization binding".to_owned(),
            ));
        };
        let binding = UserOrganization::try_from(model)?;
        if binding.user_id != user_id {
            return Err(EngineError::Unauthorized(
                "invalid organization binding".to_owned(),
            ));
        }
        Ok(binding)
    }

    /// All bindings of a user, each with its organization and branch names.
    pub async fn bindings_with_names(&self, user_id: Uuid) -> ResultEngine<Vec<NamedBinding>> {
        let models = user_organizations::Entity::find()
            .filter(user_organizations::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(user_organizations::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            let binding = UserOrganization::try_from(model)?;
            out.push(self.name_binding(binding).await?);
        }
        Ok(out)
    }

    /// One binding of the user by id, with names.
    pub async fn binding_with_names(
        &self,
        user_id: Uuid,
        user_organization_id: Uuid,
    ) -> ResultEngine<NamedBinding> {
        let model = user_organizations::Entity::find_by_id(user_organization_id.to_string())
            .one(&self.database)
            .await?;
        let binding = model
            .map(UserOrganization::try_from)
            .transpose()?
            .filter(|binding| binding.user_id == user_id)
            .ok_or_else(|| EngineError::NotFound("user organization".to_owned()))?;
        self.name_binding(binding).await
    }

    async fn name_binding(&self, binding: UserOrganization) -> ResultEngine<NamedBinding> {
        let organization = organizations::Entity::find_by_id(binding.organization_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::NotFound("organization".to_owned()))?;
        let organization = Organization::try_from(organization)?;

        let branch = match binding.branch_id {
            Some(branch_id) => branches::Entity::find_by_id(branch_id.to_string())
                .one(&self.database)
                .await?
                .map(Branch::try_from)
                .transpose()?,
            None => None,
        };

        Ok((binding, organization, branch))
    }
}
