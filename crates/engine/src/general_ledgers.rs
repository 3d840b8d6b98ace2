//! General ledger rows.
//!
//! Append-only double-entry postings. Each row carries a running balance for
//! its account (per member profile when one is attached), computed on the
//! account's normal side at insert time.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, balance, util};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneralLedgerSource {
    Withdraw,
    Deposit,
    Journal,
    Payment,
    Adjustment,
    JournalVoucher,
    CheckVoucher,
    Loan,
    SavingsInterest,
    MutualContribution,
}

impl GeneralLedgerSource {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Withdraw => "withdraw",
            Self::Deposit => "deposit",
            Self::Journal => "journal",
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
            Self::JournalVoucher => "journal_voucher",
            Self::CheckVoucher => "check_voucher",
            Self::Loan => "loan",
            Self::SavingsInterest => "savings_interest",
            Self::MutualContribution => "mutual_contribution",
        }
    }
}

impl TryFrom<&str> for GeneralLedgerSource {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "withdraw" => Ok(Self::Withdraw),
            "deposit" => Ok(Self::Deposit),
            "journal" => Ok(Self::Journal),
            "payment" => Ok(Self::Payment),
            "adjustment" => Ok(Self::Adjustment),
            "journal_voucher" => Ok(Self::JournalVoucher),
            "check_voucher" => Ok(Self::CheckVoucher),
            "loan" => Ok(Self::Loan),
            "savings_interest" => Ok(Self::SavingsInterest),
            "mutual_contribution" => Ok(Self::MutualContribution),
            other => Err(EngineError::InvalidInput(format!(
                "invalid general ledger source: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLedger {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub account_id: Uuid,
    pub member_profile_id: Option<Uuid>,
    pub employee_user_id: Option<Uuid>,
    pub transaction_batch_id: Option<Uuid>,
    pub payment_type_id: Option<Uuid>,
    pub source: GeneralLedgerSource,
    pub reference_number: String,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
    pub balance: i64,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// Everything a posting needs besides the running balance, which the ops
/// layer derives from the previous row of the same account chain.
#[derive(Clone, Debug)]
pub struct Posting {
    pub account_id: Uuid,
    pub member_profile_id: Option<Uuid>,
    pub transaction_batch_id: Option<Uuid>,
    pub payment_type_id: Option<Uuid>,
    pub source: GeneralLedgerSource,
    pub reference_number: String,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
}

impl GeneralLedger {
    pub fn post(actor: &Actor, posting: &Posting, balance: i64) -> ResultEngine<Self> {
        balance::check_amounts(posting.debit, posting.credit)?;
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            account_id: posting.account_id,
            member_profile_id: posting.member_profile_id,
            employee_user_id: Some(actor.user_id),
            transaction_batch_id: posting.transaction_batch_id,
            payment_type_id: posting.payment_type_id,
            source: posting.source,
            reference_number: util::normalize_required(
                &posting.reference_number,
                "reference number",
            )?,
            description: util::normalize_optional(posting.description.as_deref()),
            debit: posting.debit,
            credit: posting.credit,
            balance,
            created_at: Utc::now(),
            created_by: actor.user_id,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "general_ledgers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub account_id: String,
    pub member_profile_id: Option<String>,
    pub employee_user_id: Option<String>,
    pub transaction_batch_id: Option<String>,
    pub payment_type_id: Option<String>,
    pub source: String,
    pub reference_number: String,
    pub description: Option<String>,
    pub debit: i64,
    pub credit: i64,
    pub balance: i64,
    pub created_at: DateTimeUtc,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
    #[sea_orm(
        belongs_to = "super::member_profiles::Entity",
        from = "Column::MemberProfileId",
        to = "super::member_profiles::Column::Id"
    )]
    MemberProfile,
    #[sea_orm(
        belongs_to = "super::transaction_batches::Entity",
        from = "Column::TransactionBatchId",
        to = "super::transaction_batches::Column::Id"
    )]
    TransactionBatch,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::member_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MemberProfile.def()
    }
}

impl Related<super::transaction_batches::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransactionBatch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&GeneralLedger> for ActiveModel {
    fn from(row: &GeneralLedger) -> Self {
        Self {
            id: ActiveValue::Set(row.id.to_string()),
            organization_id: ActiveValue::Set(row.organization_id.to_string()),
            branch_id: ActiveValue::Set(row.branch_id.to_string()),
            account_id: ActiveValue::Set(row.account_id.to_string()),
            member_profile_id: ActiveValue::Set(row.member_profile_id.map(|id| id.to_string())),
            employee_user_id: ActiveValue::Set(row.employee_user_id.map(|id| id.to_string())),
            transaction_batch_id: ActiveValue::Set(
                row.transaction_batch_id.map(|id| id.to_string()),
            ),
            payment_type_id: ActiveValue::Set(row.payment_type_id.map(|id| id.to_string())),
            source: ActiveValue::Set(row.source.as_str().to_owned()),
            reference_number: ActiveValue::Set(row.reference_number.clone()),
            description: ActiveValue::Set(row.description.clone()),
            debit: ActiveValue::Set(row.debit),
            credit: ActiveValue::Set(row.credit),
            balance: ActiveValue::Set(row.balance),
            created_at: ActiveValue::Set(row.created_at),
            created_by: ActiveValue::Set(row.created_by.to_string()),
        }
    }
}

impl TryFrom<Model> for GeneralLedger {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "general ledger")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            account_id: util::parse_uuid(&model.account_id, "account")?,
            member_profile_id: model
                .member_profile_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "member profile"))
                .transpose()?,
            employee_user_id: model
                .employee_user_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "user"))
                .transpose()?,
            transaction_batch_id: model
                .transaction_batch_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "transaction batch"))
                .transpose()?,
            payment_type_id: model
                .payment_type_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "payment type"))
                .transpose()?,
            source: GeneralLedgerSource::try_from(model.source.as_str())?,
            reference_number: model.reference_number,
            description: model.description,
            debit: model.debit,
            credit: model.credit,
            balance: model.balance,
            created_at: model.created_at,
            created_by: util::parse_uuid(&model.created_by, "user")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserType;

    #[test]
    fn source_round_trips_through_str() {
        for source in [
            GeneralLedgerSource::Withdraw,
            GeneralLedgerSource::Deposit,
            GeneralLedgerSource::Journal,
            GeneralLedgerSource::Payment,
            GeneralLedgerSource::Adjustment,
            GeneralLedgerSource::JournalVoucher,
            GeneralLedgerSource::CheckVoucher,
            GeneralLedgerSource::Loan,
            GeneralLedgerSource::SavingsInterest,
            GeneralLedgerSource::MutualContribution,
        ] {
            assert_eq!(GeneralLedgerSource::try_from(source.as_str()).unwrap(), source);
        }
        assert!(GeneralLedgerSource::try_from("dividend").is_err());
    }

    #[test]
    fn post_rejects_empty_amounts() {
        let actor = Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Employee,
        };
        let posting = Posting {
            account_id: Uuid::new_v4(),
            member_profile_id: None,
            transaction_batch_id: None,
            payment_type_id: None,
            source: GeneralLedgerSource::Payment,
            reference_number: "OR-100".to_owned(),
            description: None,
            debit: 0,
            credit: 0,
        };
        assert!(GeneralLedger::post(&actor, &posting, 0).is_err());

        let posting = Posting {
            debit: 1_500,
            ..posting
        };
        let row = GeneralLedger::post(&actor, &posting, 1_500).unwrap();
        assert_eq!(row.balance, 1_500);
        assert_eq!(row.employee_user_id, Some(actor.user_id));
    }
}
