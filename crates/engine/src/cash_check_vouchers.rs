//! Cash/check vouchers.
//!
//! A voucher moves through pending, printed, approved and released. Each
//! step stamps who did it and when; release additionally posts the entry
//! lines to the general ledger inside the open transaction batch (that part
//! lives in the ops layer, since it needs the database).

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Actor, EngineError, ResultEngine, util};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoucherStatus {
    Pending,
    Printed,
    Approved,
    Released,
}

impl VoucherStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Printed => "printed",
            Self::Approved => "approved",
            Self::Released => "released",
        }
    }
}

impl TryFrom<&str> for VoucherStatus {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "printed" => Ok(Self::Printed),
            "approved" => Ok(Self::Approved),
            "released" => Ok(Self::Released),
            other => Err(EngineError::InvalidInput(format!(
                "invalid voucher status: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashCheckVoucher {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub branch_id: Uuid,
    pub member_profile_id: Option<Uuid>,
    pub pay_to: String,
    pub description: Option<String>,
    pub status: VoucherStatus,
    pub cash_voucher_number: Option<String>,
    pub total_debit: i64,
    pub total_credit: i64,
    pub print_count: i32,
    pub entry_date: Option<DateTime<Utc>>,
    pub printed_date: Option<DateTime<Utc>>,
    pub printed_by: Option<Uuid>,
    pub approved_date: Option<DateTime<Utc>>,
    pub approved_by: Option<Uuid>,
    pub released_date: Option<DateTime<Utc>>,
    pub released_by: Option<Uuid>,
    pub transaction_batch_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

impl CashCheckVoucher {
    pub fn new(
        actor: &Actor,
        member_profile_id: Option<Uuid>,
        pay_to: &str,
        description: Option<&str>,
    ) -> ResultEngine<Self> {
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            organization_id: actor.organization_id,
            branch_id: actor.branch()?,
            member_profile_id,
            pay_to: util::normalize_required(pay_to, "pay to")?,
            description: util::normalize_optional(description),
            status: VoucherStatus::Pending,
            cash_voucher_number: None,
            total_debit: 0,
            total_credit: 0,
            print_count: 0,
            entry_date: None,
            printed_date: None,
            printed_by: None,
            approved_date: None,
            approved_by: None,
            released_date: None,
            released_by: None,
            transaction_batch_id: None,
            created_at: now,
            created_by: actor.user_id,
            updated_at: now,
            updated_by: actor.user_id,
        })
    }

    fn touch(&mut self, actor: &Actor) {
        self.updated_at = Utc::now();
        self.updated_by = actor.user_id;
    }

    /// Stamps the voucher as printed and assigns its voucher number.
    pub fn print(&mut self, actor: &Actor, cash_voucher_number: &str) -> ResultEngine<()> {
        if self.status == VoucherStatus::Released {
            return Err(EngineError::VoucherState(
                "voucher already released".to_owned(),
            ));
        }
        let now = Utc::now();
        self.cash_voucher_number = Some(util::normalize_required(
            cash_voucher_number,
            "cash voucher number",
        )?);
        self.entry_date = Some(now);
        self.printed_date = Some(now);
        self.printed_by = Some(actor.user_id);
        self.print_count += 1;
        if self.status == VoucherStatus::Pending {
            self.status = VoucherStatus::Printed;
        }
        self.touch(actor);
        Ok(())
    }

    /// Bumps the print counter and refreshes the printed stamp without
    /// touching the voucher number or the lifecycle.
    pub fn print_only(&mut self, actor: &Actor) {
        self.print_count += 1;
        self.printed_date = Some(Utc::now());
        self.printed_by = Some(actor.user_id);
        self.touch(actor);
    }

    pub fn undo_print(&mut self, actor: &Actor) -> ResultEngine<()> {
        if self.status == VoucherStatus::Released {
            return Err(EngineError::VoucherState(
                "voucher already released".to_owned(),
            ));
        }
        if self.printed_date.is_none() {
            return Err(EngineError::VoucherState(
                "voucher has not been printed".to_owned(),
            ));
        }
        self.printed_date = None;
        self.printed_by = None;
        self.print_count = 0;
        if self.status == VoucherStatus::Printed {
            self.status = VoucherStatus::Pending;
        }
        self.touch(actor);
        Ok(())
    }

    pub fn approve(&mut self, actor: &Actor) -> ResultEngine<()> {
        match self.status {
            VoucherStatus::Approved => Err(EngineError::VoucherState(
                "voucher already approved".to_owned(),
            )),
            VoucherStatus::Released => Err(EngineError::VoucherState(
                "voucher already released".to_owned(),
            )),
            VoucherStatus::Pending | VoucherStatus::Printed => {
                self.approved_date = Some(Utc::now());
                self.approved_by = Some(actor.user_id);
                self.status = VoucherStatus::Approved;
                self.touch(actor);
                Ok(())
            }
        }
    }

    /// Approval can be taken back until the voucher is released. The status
    /// falls back to printed when a print already happened, otherwise to
    /// pending.
    pub fn undo_approve(&mut self, actor: &Actor) -> ResultEngine<()> {
        if self.status == VoucherStatus::Released {
            return Err(EngineError::VoucherState(
                "cannot unapprove a released voucher".to_owned(),
            ));
        }
        if self.approved_date.is_none() {
            return Err(EngineError::VoucherState(
                "voucher is not approved yet".to_owned(),
            ));
        }
        self.approved_date = None;
        self.approved_by = None;
        self.status = if self.printed_date.is_some() {
            VoucherStatus::Printed
        } else {
            VoucherStatus::Pending
        };
        self.touch(actor);
        Ok(())
    }

    /// Marks the voucher released into the given batch. The caller posts the
    /// ledger rows in the same transaction.
    pub fn release(&mut self, actor: &Actor, transaction_batch_id: Uuid) -> ResultEngine<()> {
        match self.status {
            VoucherStatus::Released => Err(EngineError::VoucherState(
                "voucher already released".to_owned(),
            )),
            VoucherStatus::Pending | VoucherStatus::Printed => Err(EngineError::VoucherState(
                "voucher must be approved before release".to_owned(),
            )),
            VoucherStatus::Approved => {
                self.released_date = Some(Utc::now());
                self.released_by = Some(actor.user_id);
                self.transaction_batch_id = Some(transaction_batch_id);
                self.status = VoucherStatus::Released;
                self.touch(actor);
                Ok(())
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "cash_check_vouchers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub organization_id: String,
    pub branch_id: String,
    pub member_profile_id: Option<String>,
    pub pay_to: String,
    pub description: Option<String>,
    pub status: String,
    pub cash_voucher_number: Option<String>,
    pub total_debit: i64,
    pub total_credit: i64,
    pub print_count: i32,
    pub entry_date: Option<DateTimeUtc>,
    pub printed_date: Option<DateTimeUtc>,
    pub printed_by: Option<String>,
    pub approved_date: Option<DateTimeUtc>,
    pub approved_by: Option<String>,
    pub released_date: Option<DateTimeUtc>,
    pub released_by: Option<String>,
    pub transaction_batch_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: DateTimeUtc,
    pub updated_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cash_check_voucher_entries::Entity")]
    Entries,
}

impl Related<super::cash_check_voucher_entries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Entries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&CashCheckVoucher> for ActiveModel {
    fn from(voucher: &CashCheckVoucher) -> Self {
        Self {
            id: ActiveValue::Set(voucher.id.to_string()),
            organization_id: ActiveValue::Set(voucher.organization_id.to_string()),
            branch_id: ActiveValue::Set(voucher.branch_id.to_string()),
            member_profile_id: ActiveValue::Set(
                voucher.member_profile_id.map(|id| id.to_string()),
            ),
            pay_to: ActiveValue::Set(voucher.pay_to.clone()),
            description: ActiveValue::Set(voucher.description.clone()),
            status: ActiveValue::Set(voucher.status.as_str().to_owned()),
            cash_voucher_number: ActiveValue::Set(voucher.cash_voucher_number.clone()),
            total_debit: ActiveValue::Set(voucher.total_debit),
            total_credit: ActiveValue::Set(voucher.total_credit),
            print_count: ActiveValue::Set(voucher.print_count),
            entry_date: ActiveValue::Set(voucher.entry_date),
            printed_date: ActiveValue::Set(voucher.printed_date),
            printed_by: ActiveValue::Set(voucher.printed_by.map(|id| id.to_string())),
            approved_date: ActiveValue::Set(voucher.approved_date),
            approved_by: ActiveValue::Set(voucher.approved_by.map(|id| id.to_string())),
            released_date: ActiveValue::Set(voucher.released_date),
            released_by: ActiveValue::Set(voucher.released_by.map(|id| id.to_string())),
            transaction_batch_id: ActiveValue::Set(
                voucher.transaction_batch_id.map(|id| id.to_string()),
            ),
            created_at: ActiveValue::Set(voucher.created_at),
            created_by: ActiveValue::Set(voucher.created_by.to_string()),
            updated_at: ActiveValue::Set(voucher.updated_at),
            updated_by: ActiveValue::Set(voucher.updated_by.to_string()),
        }
    }
}

impl TryFrom<Model> for CashCheckVoucher {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: util::parse_uuid(&model.id, "cash check voucher")?,
            organization_id: util::parse_uuid(&model.organization_id, "organization")?,
            branch_id: util::parse_uuid(&model.branch_id, "branch")?,
            member_profile_id: model
                .member_profile_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "member profile"))
                .transpose()?,
            pay_to: model.pay_to,
            description: model.description,
            status: VoucherStatus::try_from(model.status.as_str())?,
            cash_voucher_number: model.cash_voucher_number,
            total_debit: model.total_debit,
            total_credit: model.total_credit,
            print_count: model.print_count,
            entry_date: model.entry_date,
            printed_date: model.printed_date,
            printed_by: model
                .printed_by
                .as_deref()
                .map(|id| util::parse_uuid(id, "user"))
                .transpose()?,
            approved_date: model.approved_date,
            approved_by: model
                .approved_by
                .as_deref()
                .map(|id| util::parse_uuid(id, "user"))
                .transpose()?,
            released_date: model.released_date,
            released_by: model
                .released_by
                .as_deref()
                .map(|id| util::parse_uuid(id, "user"))
                .transpose()?,
            transaction_batch_id: model
                .transaction_batch_id
                .as_deref()
                .map(|id| util::parse_uuid(id, "transaction batch"))
                .transpose()?,
            created_at: model.created_at,
            created_by: util::parse_uuid(&model.created_by, "user")?,
            updated_at: model.updated_at,
            updated_by: util::parse_uuid(&model.updated_by, "user")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UserType;

    fn staff_actor() -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            user_organization_id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            branch_id: Some(Uuid::new_v4()),
            user_type: UserType::Employee,
        }
    }

    fn voucher(actor: &Actor) -> CashCheckVoucher {
        CashCheckVoucher::new(actor, None, "Juan dela Cruz", None).unwrap()
    }

    #[test]
    fn print_stamps_number_and_status() {
        let actor = staff_actor();
        let mut voucher = voucher(&actor);
        voucher.print(&actor, "CV-0001").unwrap();
        assert_eq!(voucher.status, VoucherStatus::Printed);
        assert_eq!(voucher.cash_voucher_number.as_deref(), Some("CV-0001"));
        assert_eq!(voucher.print_count, 1);
        assert!(voucher.printed_date.is_some());
        assert!(voucher.entry_date.is_some());
    }

    #[test]
    fn print_only_bumps_the_counter() {
        let actor = staff_actor();
        let mut voucher = voucher(&actor);
        voucher.print(&actor, "CV-0002").unwrap();
        voucher.print_only(&actor);
        assert_eq!(voucher.print_count, 2);
        assert_eq!(voucher.status, VoucherStatus::Printed);
    }

    #[test]
    fn undo_print_resets_to_pending() {
        let actor = staff_actor();
        let mut voucher = voucher(&actor);
        assert!(voucher.undo_print(&actor).is_err());

        voucher.print(&actor, "CV-0003").unwrap();
        voucher.undo_print(&actor).unwrap();
        assert_eq!(voucher.status, VoucherStatus::Pending);
        assert_eq!(voucher.print_count, 0);
        assert!(voucher.printed_date.is_none());
    }

    #[test]
    fn approve_twice_is_rejected() {
        let actor = staff_actor();
        let mut voucher = voucher(&actor);
        voucher.approve(&actor).unwrap();
        let err = voucher.approve(&actor).unwrap_err();
        assert_eq!(
            err,
            EngineError::VoucherState("voucher already approved".to_owned())
        );
    }

    #[test]
    fn release_requires_approval() {
        let actor = staff_actor();
        let mut voucher = voucher(&actor);
        let err = voucher.release(&actor, Uuid::new_v4()).unwrap_err();
        assert_eq!(
            err,
            EngineError::VoucherState("voucher must be approved before release".to_owned())
        );

        voucher.approve(&actor).unwrap();
        let batch_id = Uuid::new_v4();
        voucher.release(&actor, batch_id).unwrap();
        assert_eq!(voucher.status, VoucherStatus::Released);
        assert_eq!(voucher.transaction_batch_id, Some(batch_id));

        let err = voucher.release(&actor, batch_id).unwrap_err();
        assert_eq!(
            err,
            EngineError::VoucherState("voucher already released".to_owned())
        );
    }

    #[test]
    fn undo_approve_falls_back_to_print_state() {
        let actor = staff_actor();
        let mut voucher = voucher(&actor);
        assert!(voucher.undo_approve(&actor).is_err());

        voucher.print(&actor, "CV-0004").unwrap();
        voucher.approve(&actor).unwrap();
        voucher.undo_approve(&actor).unwrap();
        assert_eq!(voucher.status, VoucherStatus::Printed);
        assert!(voucher.approved_date.is_none());

        voucher.undo_print(&actor).unwrap();
        voucher.approve(&actor).unwrap();
        voucher.undo_approve(&actor).unwrap();
        assert_eq!(voucher.status, VoucherStatus::Pending);
    }

    #[test]
    fn released_voucher_cannot_be_unapproved() {
        let actor = staff_actor();
        let mut voucher = voucher(&actor);
        voucher.approve(&actor).unwrap();
        voucher.release(&actor, Uuid::new_v4()).unwrap();
        let err = voucher.undo_approve(&actor).unwrap_err();
        assert_eq!(
            err,
            EngineError::VoucherState("cannot unapprove a released voucher".to_owned())
        );
    }
}
