//! Bootstrap operations used by the admin CLI.
//!
//! Users, organizations, branches and bindings have no HTTP surface; they
//! are provisioned out of band.

use sea_orm::{ActiveModelTrait, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    Branch, EngineError, Organization, ResultEngine, User, UserOrganization, UserType, branches,
    organizations, user_organizations, users,
};

use super::{Engine, with_tx};

impl Engine {
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
    ) -> ResultEngine<User> {
        let user = User::new(username, password, full_name)?;
        with_tx!(self, |db_tx| {
            let existing = users::Entity::find()
                .filter(users::Column::Username.eq(user.username.clone()))
                .one(&db_tx)
                .await?;
            if existing.is_some() {
                return Err(EngineError::AlreadyExists("user".to_owned()));
            }
            users::ActiveModel::from(&user).insert(&db_tx).await?;
            Ok(user)
        })
    }

    pub async fn create_organization(&self, name: &str) -> ResultEngine<Organization> {
        let organization = Organization::new(name)?;
        organizations::ActiveModel::from(&organization)
            .insert(&self.database)
            .await?;
        Ok(organization)
    }

    pub async fn create_branch(&self, organization_id: Uuid, name: &str) -> ResultEngine<Branch> {
        let branch = Branch::new(organization_id, name)?;
        with_tx!(self, |db_tx| {
            organizations::Entity::find_by_id(organization_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("organization".to_owned()))?;
            branches::ActiveModel::from(&branch).insert(&db_tx).await?;
            Ok(branch)
        })
    }

    /// Binds a user to an organization (and optionally one of its branches)
    /// with a role. One binding per (user, organization, branch).
    pub async fn assign_user(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
        branch_id: Option<Uuid>,
        user_type: UserType,
    ) -> ResultEngine<UserOrganization> {
        let binding = UserOrganization::new(user_id, organization_id, branch_id, user_type);
        with_tx!(self, |db_tx| {
            users::Entity::find_by_id(user_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("user".to_owned()))?;
            organizations::Entity::find_by_id(organization_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::NotFound("organization".to_owned()))?;
            if let Some(branch_id) = branch_id {
                let branch = branches::Entity::find_by_id(branch_id.to_string())
                    .one(&db_tx)
                    .await?
                    .ok_or_else(|| EngineError::NotFound("branch".to_owned()))?;
                if branch.organization_id != organization_id.to_string() {
                    return Err(EngineError::InvalidInput(
                        "branch does not belong to the organization".to_owned(),
                    ));
                }
            }

            let mut query = user_organizations::Entity::find()
                .filter(user_organizations::Column::UserId.eq(user_id.to_string()))
                .filter(
                    user_organizations::Column::OrganizationId.eq(organization_id.to_string()),
                );
            query = match branch_id {
                Some(branch_id) => {
                    query.filter(user_organizations::Column::BranchId.eq(branch_id.to_string()))
                }
                None => query.filter(user_organizations::Column::BranchId.is_null()),
            };
            if query.one(&db_tx).await?.is_some() {
                return Err(EngineError::AlreadyExists("user organization".to_owned()));
            }

            user_organizations::ActiveModel::from(&binding)
                .insert(&db_tx)
                .await?;
            Ok(binding)
        })
    }
}
