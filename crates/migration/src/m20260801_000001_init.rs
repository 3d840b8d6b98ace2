//! Initial schema migration - creates all tables from scratch.
//!
//! Complete schema for Kassa:
//!
//! - `users`: authentication
//! - `organizations`, `branches`: tenancy
//! - `user_organizations`: per-branch bindings carrying a user type
//! - `companies`: cooperative identity records
//! - `member_profiles`: member master data
//! - `payment_types`: payment channels for ledger postings
//! - `accounts`, `account_histories`: chart of accounts with change history
//! - `transaction_batches`: teller cash batches
//! - `cash_check_vouchers`, `cash_check_voucher_entries`: disbursement workflow
//! - `general_ledgers`: running-balance ledger rows
//! - `adjustment_entries`: manual corrections posted against an open batch
//! - `check_remittances`, `online_remittances`: remittances inside a batch
//! - `footsteps`: activity trail

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Password,
    FullName,
    CreatedAt,
}

#[derive(Iden)]
enum Organizations {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum Branches {
    Table,
    Id,
    OrganizationId,
    Name,
    CreatedAt,
}

#[derive(Iden)]
enum UserOrganizations {
    Table,
    Id,
    UserId,
    OrganizationId,
    BranchId,
    UserType,
    CreatedAt,
}

#[derive(Iden)]
enum Companies {
    Table,
    Id,
    OrganizationId,
    BranchId,
    Name,
    Description,
    ContactNumber,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum MemberProfiles {
    Table,
    Id,
    OrganizationId,
    BranchId,
    UserId,
    FirstName,
    MiddleName,
    LastName,
    PassbookNumber,
    ContactNumber,
    Description,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum PaymentTypes {
    Table,
    Id,
    OrganizationId,
    BranchId,
    Name,
    Description,
    Kind,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    OrganizationId,
    BranchId,
    Name,
    Description,
    GeneralLedgerType,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum AccountHistories {
    Table,
    Id,
    OrganizationId,
    BranchId,
    AccountId,
    Name,
    Description,
    GeneralLedgerType,
    ChangedAt,
    ChangedBy,
}

#[derive(Iden)]
enum TransactionBatches {
    Table,
    Id,
    OrganizationId,
    BranchId,
    EmployeeUserId,
    BatchName,
    IsClosed,
    BeginningBalance,
    DepositInBank,
    CashCountTotal,
    TotalCashCollection,
    TotalDepositEntry,
    TotalCashHandled,
    TotalWithdrawals,
    TotalSupposedRemittance,
    TotalCheckRemittance,
    TotalOnlineRemittance,
    TotalCashOnHand,
    TotalDepositInBank,
    TotalActualRemittance,
    TotalActualSupposedComparison,
    GrandTotal,
    EndedAt,
    EndedBy,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum CashCheckVouchers {
    Table,
    Id,
    OrganizationId,
    BranchId,
    MemberProfileId,
    PayTo,
    Description,
    Status,
    CashVoucherNumber,
    TotalDebit,
    TotalCredit,
    PrintCount,
    EntryDate,
    PrintedDate,
    PrintedBy,
    ApprovedDate,
    ApprovedBy,
    ReleasedDate,
    ReleasedBy,
    TransactionBatchId,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum CashCheckVoucherEntries {
    Table,
    Id,
    OrganizationId,
    BranchId,
    CashCheckVoucherId,
    AccountId,
    Description,
    Debit,
    Credit,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum GeneralLedgers {
    Table,
    Id,
    OrganizationId,
    BranchId,
    AccountId,
    MemberProfileId,
    EmployeeUserId,
    TransactionBatchId,
    PaymentTypeId,
    Source,
    ReferenceNumber,
    Description,
    Debit,
    Credit,
    Balance,
    CreatedAt,
    CreatedBy,
}

#[derive(Iden)]
enum AdjustmentEntries {
    Table,
    Id,
    OrganizationId,
    BranchId,
    AccountId,
    MemberProfileId,
    EmployeeUserId,
    PaymentTypeId,
    ReferenceNumber,
    Description,
    Debit,
    Credit,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum CheckRemittances {
    Table,
    Id,
    OrganizationId,
    BranchId,
    TransactionBatchId,
    EmployeeUserId,
    ReferenceNumber,
    AccountName,
    Amount,
    DateEntry,
    Description,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum OnlineRemittances {
    Table,
    Id,
    OrganizationId,
    BranchId,
    TransactionBatchId,
    EmployeeUserId,
    ReferenceNumber,
    AccountName,
    Amount,
    DateEntry,
    Description,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum Footsteps {
    Table,
    Id,
    OrganizationId,
    BranchId,
    UserId,
    UserOrganizationId,
    Module,
    Activity,
    Description,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // identity and tenancy
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-username-unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Branches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Branches::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Branches::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Branches::Name).string().not_null())
                    .col(ColumnDef::new(Branches::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-branches-organization_id")
                            .from(Branches::Table, Branches::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(UserOrganizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserOrganizations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserOrganizations::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserOrganizations::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserOrganizations::BranchId).string())
                    .col(
                        ColumnDef::new(UserOrganizations::UserType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserOrganizations::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_organizations-user_id")
                            .from(UserOrganizations::Table, UserOrganizations::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_organizations-organization_id")
                            .from(UserOrganizations::Table, UserOrganizations::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user_organizations-branch_id")
                            .from(UserOrganizations::Table, UserOrganizations::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-user_organizations-user_id-organization_id-branch_id-unique")
                    .table(UserOrganizations::Table)
                    .col(UserOrganizations::UserId)
                    .col(UserOrganizations::OrganizationId)
                    .col(UserOrganizations::BranchId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // branch records
        manager
            .create_table(
                Table::create()
                    .table(Companies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Companies::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Companies::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Companies::BranchId).string().not_null())
                    .col(ColumnDef::new(Companies::Name).string().not_null())
                    .col(ColumnDef::new(Companies::Description).string())
                    .col(ColumnDef::new(Companies::ContactNumber).string())
                    .col(ColumnDef::new(Companies::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Companies::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Companies::UpdatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Companies::UpdatedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-companies-organization_id")
                            .from(Companies::Table, Companies::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-companies-branch_id")
                            .from(Companies::Table, Companies::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-companies-organization_id-branch_id")
                    .table(Companies::Table)
                    .col(Companies::OrganizationId)
                    .col(Companies::BranchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MemberProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MemberProfiles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MemberProfiles::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberProfiles::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MemberProfiles::UserId).string())
                    .col(
                        ColumnDef::new(MemberProfiles::FirstName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MemberProfiles::MiddleName).string())
                    .col(ColumnDef::new(MemberProfiles::LastName).string().not_null())
                    .col(ColumnDef::new(MemberProfiles::PassbookNumber).string())
                    .col(ColumnDef::new(MemberProfiles::ContactNumber).string())
                    .col(ColumnDef::new(MemberProfiles::Description).string())
                    .col(
                        ColumnDef::new(MemberProfiles::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberProfiles::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberProfiles::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberProfiles::UpdatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-member_profiles-organization_id")
                            .from(MemberProfiles::Table, MemberProfiles::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-member_profiles-branch_id")
                            .from(MemberProfiles::Table, MemberProfiles::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-member_profiles-user_id")
                            .from(MemberProfiles::Table, MemberProfiles::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-member_profiles-organization_id-branch_id")
                    .table(MemberProfiles::Table)
                    .col(MemberProfiles::OrganizationId)
                    .col(MemberProfiles::BranchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentTypes::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentTypes::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTypes::BranchId).string().not_null())
                    .col(ColumnDef::new(PaymentTypes::Name).string().not_null())
                    .col(ColumnDef::new(PaymentTypes::Description).string())
                    .col(ColumnDef::new(PaymentTypes::Kind).string().not_null())
                    .col(
                        ColumnDef::new(PaymentTypes::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTypes::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(PaymentTypes::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentTypes::UpdatedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payment_types-organization_id")
                            .from(PaymentTypes::Table, PaymentTypes::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payment_types-branch_id")
                            .from(PaymentTypes::Table, PaymentTypes::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payment_types-organization_id-branch_id")
                    .table(PaymentTypes::Table)
                    .col(PaymentTypes::OrganizationId)
                    .col(PaymentTypes::BranchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::BranchId).string().not_null())
                    .col(ColumnDef::new(Accounts::Name).string().not_null())
                    .col(ColumnDef::new(Accounts::Description).string())
                    .col(
                        ColumnDef::new(Accounts::GeneralLedgerType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Accounts::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Accounts::UpdatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Accounts::UpdatedBy).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-organization_id")
                            .from(Accounts::Table, Accounts::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-accounts-branch_id")
                            .from(Accounts::Table, Accounts::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-accounts-organization_id-branch_id-name-unique")
                    .table(Accounts::Table)
                    .col(Accounts::OrganizationId)
                    .col(Accounts::BranchId)
                    .col(Accounts::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AccountHistories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountHistories::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AccountHistories::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountHistories::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountHistories::AccountId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountHistories::Name).string().not_null())
                    .col(ColumnDef::new(AccountHistories::Description).string())
                    .col(
                        ColumnDef::new(AccountHistories::GeneralLedgerType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountHistories::ChangedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountHistories::ChangedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-account_histories-account_id")
                            .from(AccountHistories::Table, AccountHistories::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-account_histories-account_id-changed_at")
                    .table(AccountHistories::Table)
                    .col(AccountHistories::AccountId)
                    .col(AccountHistories::ChangedAt)
                    .to_owned(),
            )
            .await?;

        // money movement
        manager
            .create_table(
                Table::create()
                    .table(TransactionBatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionBatches::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::EmployeeUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::BatchName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::IsClosed)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::BeginningBalance)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::DepositInBank)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::CashCountTotal)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalCashCollection)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalDepositEntry)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalCashHandled)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalWithdrawals)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalSupposedRemittance)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalCheckRemittance)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalOnlineRemittance)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalCashOnHand)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalDepositInBank)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalActualRemittance)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::TotalActualSupposedComparison)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::GrandTotal)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransactionBatches::EndedAt).timestamp())
                    .col(ColumnDef::new(TransactionBatches::EndedBy).string())
                    .col(
                        ColumnDef::new(TransactionBatches::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionBatches::UpdatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction_batches-organization_id")
                            .from(TransactionBatches::Table, TransactionBatches::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction_batches-branch_id")
                            .from(TransactionBatches::Table, TransactionBatches::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction_batches-employee_user_id")
                            .from(TransactionBatches::Table, TransactionBatches::EmployeeUserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transaction_batches-branch_id-is_closed")
                    .table(TransactionBatches::Table)
                    .col(TransactionBatches::BranchId)
                    .col(TransactionBatches::IsClosed)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CashCheckVouchers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CashCheckVouchers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVouchers::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVouchers::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CashCheckVouchers::MemberProfileId).string())
                    .col(ColumnDef::new(CashCheckVouchers::PayTo).string().not_null())
                    .col(ColumnDef::new(CashCheckVouchers::Description).string())
                    .col(
                        ColumnDef::new(CashCheckVouchers::Status)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CashCheckVouchers::CashVoucherNumber).string())
                    .col(
                        ColumnDef::new(CashCheckVouchers::TotalDebit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVouchers::TotalCredit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVouchers::PrintCount)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CashCheckVouchers::EntryDate).timestamp())
                    .col(ColumnDef::new(CashCheckVouchers::PrintedDate).timestamp())
                    .col(ColumnDef::new(CashCheckVouchers::PrintedBy).string())
                    .col(ColumnDef::new(CashCheckVouchers::ApprovedDate).timestamp())
                    .col(ColumnDef::new(CashCheckVouchers::ApprovedBy).string())
                    .col(ColumnDef::new(CashCheckVouchers::ReleasedDate).timestamp())
                    .col(ColumnDef::new(CashCheckVouchers::ReleasedBy).string())
                    .col(ColumnDef::new(CashCheckVouchers::TransactionBatchId).string())
                    .col(
                        ColumnDef::new(CashCheckVouchers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVouchers::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVouchers::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVouchers::UpdatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_check_vouchers-organization_id")
                            .from(CashCheckVouchers::Table, CashCheckVouchers::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_check_vouchers-branch_id")
                            .from(CashCheckVouchers::Table, CashCheckVouchers::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_check_vouchers-transaction_batch_id")
                            .from(
                                CashCheckVouchers::Table,
                                CashCheckVouchers::TransactionBatchId,
                            )
                            .to(TransactionBatches::Table, TransactionBatches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cash_check_vouchers-branch_id-status")
                    .table(CashCheckVouchers::Table)
                    .col(CashCheckVouchers::BranchId)
                    .col(CashCheckVouchers::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CashCheckVoucherEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::CashCheckVoucherId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::AccountId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CashCheckVoucherEntries::Description).string())
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::Debit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::Credit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CashCheckVoucherEntries::UpdatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_check_voucher_entries-cash_check_voucher_id")
                            .from(
                                CashCheckVoucherEntries::Table,
                                CashCheckVoucherEntries::CashCheckVoucherId,
                            )
                            .to(CashCheckVouchers::Table, CashCheckVouchers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-cash_check_voucher_entries-account_id")
                            .from(
                                CashCheckVoucherEntries::Table,
                                CashCheckVoucherEntries::AccountId,
                            )
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cash_check_voucher_entries-cash_check_voucher_id")
                    .table(CashCheckVoucherEntries::Table)
                    .col(CashCheckVoucherEntries::CashCheckVoucherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-cash_check_voucher_entries-account_id")
                    .table(CashCheckVoucherEntries::Table)
                    .col(CashCheckVoucherEntries::AccountId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GeneralLedgers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GeneralLedgers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GeneralLedgers::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralLedgers::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralLedgers::AccountId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GeneralLedgers::MemberProfileId).string())
                    .col(ColumnDef::new(GeneralLedgers::EmployeeUserId).string())
                    .col(ColumnDef::new(GeneralLedgers::TransactionBatchId).string())
                    .col(ColumnDef::new(GeneralLedgers::PaymentTypeId).string())
                    .col(ColumnDef::new(GeneralLedgers::Source).string().not_null())
                    .col(
                        ColumnDef::new(GeneralLedgers::ReferenceNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(GeneralLedgers::Description).string())
                    .col(
                        ColumnDef::new(GeneralLedgers::Debit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralLedgers::Credit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralLedgers::Balance)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralLedgers::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GeneralLedgers::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-general_ledgers-organization_id")
                            .from(GeneralLedgers::Table, GeneralLedgers::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-general_ledgers-branch_id")
                            .from(GeneralLedgers::Table, GeneralLedgers::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-general_ledgers-account_id")
                            .from(GeneralLedgers::Table, GeneralLedgers::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-general_ledgers-transaction_batch_id")
                            .from(GeneralLedgers::Table, GeneralLedgers::TransactionBatchId)
                            .to(TransactionBatches::Table, TransactionBatches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-general_ledgers-account_id-created_at")
                    .table(GeneralLedgers::Table)
                    .col(GeneralLedgers::AccountId)
                    .col(GeneralLedgers::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-general_ledgers-transaction_batch_id-source")
                    .table(GeneralLedgers::Table)
                    .col(GeneralLedgers::TransactionBatchId)
                    .col(GeneralLedgers::Source)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AdjustmentEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AdjustmentEntries::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::AccountId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdjustmentEntries::MemberProfileId).string())
                    .col(
                        ColumnDef::new(AdjustmentEntries::EmployeeUserId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdjustmentEntries::PaymentTypeId).string())
                    .col(
                        ColumnDef::new(AdjustmentEntries::ReferenceNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AdjustmentEntries::Description).string())
                    .col(
                        ColumnDef::new(AdjustmentEntries::Debit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::Credit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AdjustmentEntries::UpdatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-adjustment_entries-organization_id")
                            .from(AdjustmentEntries::Table, AdjustmentEntries::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-adjustment_entries-branch_id")
                            .from(AdjustmentEntries::Table, AdjustmentEntries::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-adjustment_entries-account_id")
                            .from(AdjustmentEntries::Table, AdjustmentEntries::AccountId)
                            .to(Accounts::Table, Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-adjustment_entries-branch_id-created_at")
                    .table(AdjustmentEntries::Table)
                    .col(AdjustmentEntries::BranchId)
                    .col(AdjustmentEntries::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CheckRemittances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CheckRemittances::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::TransactionBatchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::EmployeeUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::ReferenceNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::AccountName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::DateEntry)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(CheckRemittances::Description).string())
                    .col(
                        ColumnDef::new(CheckRemittances::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CheckRemittances::UpdatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-check_remittances-organization_id")
                            .from(CheckRemittances::Table, CheckRemittances::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-check_remittances-branch_id")
                            .from(CheckRemittances::Table, CheckRemittances::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-check_remittances-transaction_batch_id")
                            .from(CheckRemittances::Table, CheckRemittances::TransactionBatchId)
                            .to(TransactionBatches::Table, TransactionBatches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-check_remittances-transaction_batch_id")
                    .table(CheckRemittances::Table)
                    .col(CheckRemittances::TransactionBatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OnlineRemittances::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OnlineRemittances::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::OrganizationId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::BranchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::TransactionBatchId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::EmployeeUserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::ReferenceNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::AccountName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::DateEntry)
                            .timestamp()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OnlineRemittances::Description).string())
                    .col(
                        ColumnDef::new(OnlineRemittances::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OnlineRemittances::UpdatedBy)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-online_remittances-organization_id")
                            .from(OnlineRemittances::Table, OnlineRemittances::OrganizationId)
                            .to(Organizations::Table, Organizations::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-online_remittances-branch_id")
                            .from(OnlineRemittances::Table, OnlineRemittances::BranchId)
                            .to(Branches::Table, Branches::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-online_remittances-transaction_batch_id")
                            .from(
                                OnlineRemittances::Table,
                                OnlineRemittances::TransactionBatchId,
                            )
                            .to(TransactionBatches::Table, TransactionBatches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-online_remittances-transaction_batch_id")
                    .table(OnlineRemittances::Table)
                    .col(OnlineRemittances::TransactionBatchId)
                    .to_owned(),
            )
            .await?;

        // activity trail
        manager
            .create_table(
                Table::create()
                    .table(Footsteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Footsteps::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Footsteps::OrganizationId).string())
                    .col(ColumnDef::new(Footsteps::BranchId).string())
                    .col(ColumnDef::new(Footsteps::UserId).string().not_null())
                    .col(ColumnDef::new(Footsteps::UserOrganizationId).string())
                    .col(ColumnDef::new(Footsteps::Module).string().not_null())
                    .col(ColumnDef::new(Footsteps::Activity).string().not_null())
                    .col(ColumnDef::new(Footsteps::Description).string().not_null())
                    .col(ColumnDef::new(Footsteps::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-footsteps-user_id")
                            .from(Footsteps::Table, Footsteps::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-footsteps-user_id-created_at")
                    .table(Footsteps::Table)
                    .col(Footsteps::UserId)
                    .col(Footsteps::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-footsteps-organization_id-branch_id")
                    .table(Footsteps::Table)
                    .col(Footsteps::OrganizationId)
                    .col(Footsteps::BranchId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Footsteps::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OnlineRemittances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CheckRemittances::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AdjustmentEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GeneralLedgers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CashCheckVoucherEntries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CashCheckVouchers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionBatches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AccountHistories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MemberProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Companies::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserOrganizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Branches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
