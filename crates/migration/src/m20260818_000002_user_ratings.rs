use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum UserRatings {
    Table,
    Id,
    OrganizationId,
    BranchId,
    RaterUserId,
    RateeUserId,
    Rate,
    Remark,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
}

#[derive(Iden)]
enum Branches {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserRatings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserRatings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserRatings::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserRatings::BranchId).string().not_null())
                    .col(
                        ColumnDef::new(UserRatings::RaterUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRatings::RateeUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserRatings::Rate)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserRatings::Remark).string().not_null())
                    .col(ColumnDef::new(UserRatings::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_ratings-organization_id")
                            .from(UserRatings::Table, UserRatings::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_ratings-branch_id")
                            .from(UserRatings::Table, UserRatings::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_ratings-rater_user_id")
                            .from(UserRatings::Table, UserRatings::RaterUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_ratings-ratee_user_id")
                            .from(UserRatings::Table, UserRatings::RateeUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-user_ratings-ratee_user_id-created_at")
                    .table(UserRatings::Table)
                    .col(UserRatings::RateeUserId)
                    .col(UserRatings::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserRatings::Table).to_owned())
            .await?;
        Ok(())
    }
}
