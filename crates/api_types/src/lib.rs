use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod common {
    use super::*;

    /// Request body for bulk-delete endpoints.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IdsRequest {
        pub ids: Vec<Uuid>,
    }

    /// Query parameters shared by search/list endpoints.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct PageQuery {
        /// Case-insensitive needle matched against the resource's name fields.
        pub q: Option<String>,
        pub limit: Option<u64>,
        /// Opaque pagination cursor (base64), from `next_cursor`.
        pub cursor: Option<String>,
    }

    /// Debit/credit totals over a set of entries.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceTotals {
        pub total_debit: i64,
        pub total_credit: i64,
        /// `total_debit - total_credit`.
        pub balance: i64,
        pub is_balanced: bool,
    }
}

pub mod user {
    use super::*;

    /// Role of a user inside an organization binding.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum UserType {
        Owner,
        Employee,
        Member,
    }

    impl UserType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Owner => "owner",
                Self::Employee => "employee",
                Self::Member => "member",
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub username: String,
        pub full_name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserOrganizationView {
        pub id: Uuid,
        pub organization_id: Uuid,
        pub organization_name: String,
        pub branch_id: Option<Uuid>,
        pub branch_name: Option<String>,
        pub user_type: UserType,
    }

    /// Response body for `GET /user/me`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct MeResponse {
        pub user: UserView,
        pub organizations: Vec<UserOrganizationView>,
    }
}

pub mod company {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyNew {
        pub name: String,
        pub description: Option<String>,
        pub contact_number: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyUpdate {
        pub name: String,
        pub description: Option<String>,
        pub contact_number: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanyView {
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub contact_number: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CompanySearchResponse {
        pub companies: Vec<CompanyView>,
        pub next_cursor: Option<String>,
    }
}

pub mod member_profile {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberProfileNew {
        pub user_id: Option<Uuid>,
        pub first_name: String,
        pub middle_name: Option<String>,
        pub last_name: String,
        pub passbook_number: Option<String>,
        pub contact_number: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberProfileUpdate {
        pub user_id: Option<Uuid>,
        pub first_name: String,
        pub middle_name: Option<String>,
        pub last_name: String,
        pub passbook_number: Option<String>,
        pub contact_number: Option<String>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberProfileView {
        pub id: Uuid,
        pub user_id: Option<Uuid>,
        pub first_name: String,
        pub middle_name: Option<String>,
        pub last_name: String,
        pub passbook_number: Option<String>,
        pub contact_number: Option<String>,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MemberProfileSearchResponse {
        pub member_profiles: Vec<MemberProfileView>,
        pub next_cursor: Option<String>,
    }
}

pub mod payment_type {
    use super::*;

    /// How a payment physically arrives at the teller.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PaymentKind {
        Cash,
        Check,
        Online,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentTypeNew {
        pub name: String,
        pub description: Option<String>,
        pub kind: PaymentKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentTypeUpdate {
        pub name: String,
        pub description: Option<String>,
        pub kind: PaymentKind,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentTypeView {
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub kind: PaymentKind,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PaymentTypeSearchResponse {
        pub payment_types: Vec<PaymentTypeView>,
        pub next_cursor: Option<String>,
    }
}

pub mod account {
    use super::*;

    /// Which side of the ledger grows an account's balance.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum GeneralLedgerType {
        Assets,
        Liabilities,
        Equity,
        Revenue,
        Expenses,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountNew {
        pub name: String,
        pub description: Option<String>,
        pub general_ledger_type: GeneralLedgerType,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountUpdate {
        pub name: String,
        pub description: Option<String>,
        pub general_ledger_type: GeneralLedgerType,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountView {
        pub id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub general_ledger_type: GeneralLedgerType,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    /// Pre-update snapshot of an account, written on every update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountHistoryView {
        pub id: Uuid,
        pub account_id: Uuid,
        pub name: String,
        pub description: Option<String>,
        pub general_ledger_type: GeneralLedgerType,
        pub changed_at: DateTime<Utc>,
        pub changed_by: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountSearchResponse {
        pub accounts: Vec<AccountView>,
        pub next_cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AccountHistoryListResponse {
        pub history: Vec<AccountHistoryView>,
        pub next_cursor: Option<String>,
    }
}

pub mod user_rating {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRatingNew {
        pub ratee_user_id: Uuid,
        /// 1 (worst) to 5 (best).
        pub rate: i16,
        pub remark: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRatingView {
        pub id: Uuid,
        pub rater_user_id: Uuid,
        pub ratee_user_id: Uuid,
        pub rate: i16,
        pub remark: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRatingListResponse {
        pub ratings: Vec<UserRatingView>,
        pub next_cursor: Option<String>,
    }
}

pub mod footstep {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FootstepView {
        pub id: Uuid,
        pub module: String,
        pub activity: String,
        pub description: String,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FootstepListResponse {
        pub footsteps: Vec<FootstepView>,
        pub next_cursor: Option<String>,
    }
}

pub mod voucher {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum VoucherStatus {
        Pending,
        Printed,
        Approved,
        Released,
    }

    /// One debit/credit line of a voucher.
    ///
    /// On update, an entry with an `id` overwrites the existing line; without
    /// one it is created.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherEntryUpsert {
        pub id: Option<Uuid>,
        pub account_id: Uuid,
        pub description: Option<String>,
        pub debit: i64,
        pub credit: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashCheckVoucherNew {
        pub member_profile_id: Option<Uuid>,
        pub pay_to: String,
        pub description: Option<String>,
        pub entries: Vec<VoucherEntryUpsert>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashCheckVoucherUpdate {
        pub member_profile_id: Option<Uuid>,
        pub pay_to: String,
        pub description: Option<String>,
        pub entries: Vec<VoucherEntryUpsert>,
        /// Entry ids to remove; each must belong to this voucher.
        #[serde(default)]
        pub deleted_entry_ids: Vec<Uuid>,
    }

    /// Request body for `PUT /cash-check-voucher/{id}/print`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherPrint {
        pub cash_voucher_number: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherEntryView {
        pub id: Uuid,
        pub account_id: Uuid,
        pub description: Option<String>,
        pub debit: i64,
        pub credit: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashCheckVoucherView {
        pub id: Uuid,
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
        pub updated_at: DateTime<Utc>,
    }

    /// Voucher plus its entry lines, as returned by get-by-id and create.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CashCheckVoucherDetail {
        pub voucher: CashCheckVoucherView,
        pub entries: Vec<VoucherEntryView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VoucherSearchResponse {
        pub vouchers: Vec<CashCheckVoucherView>,
        pub next_cursor: Option<String>,
    }
}

pub mod adjustment {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdjustmentEntryNew {
        pub account_id: Uuid,
        pub member_profile_id: Option<Uuid>,
        pub payment_type_id: Option<Uuid>,
        pub reference_number: String,
        pub description: Option<String>,
        pub debit: i64,
        pub credit: i64,
    }

    /// Amounts are immutable once posted to the ledger; only the narrative
    /// fields can change.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdjustmentEntryUpdate {
        pub reference_number: String,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdjustmentEntryView {
        pub id: Uuid,
        pub account_id: Uuid,
        pub member_profile_id: Option<Uuid>,
        pub employee_user_id: Uuid,
        pub payment_type_id: Option<Uuid>,
        pub reference_number: String,
        pub description: Option<String>,
        pub debit: i64,
        pub credit: i64,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AdjustmentSearchResponse {
        pub entries: Vec<AdjustmentEntryView>,
        pub next_cursor: Option<String>,
    }
}

pub mod remittance {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RemittanceNew {
        pub reference_number: String,
        pub account_name: String,
        pub amount: i64,
        pub date_entry: DateTime<Utc>,
        pub description: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RemittanceUpdate {
        pub reference_number: String,
        pub account_name: String,
        pub amount: i64,
        pub date_entry: DateTime<Utc>,
        pub description: Option<String>,
    }

    /// Shared by check and online remittances; the route distinguishes them.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RemittanceView {
        pub id: Uuid,
        pub transaction_batch_id: Uuid,
        pub employee_user_id: Uuid,
        pub reference_number: String,
        pub account_name: String,
        pub amount: i64,
        pub date_entry: DateTime<Utc>,
        pub description: Option<String>,
        pub created_at: DateTime<Utc>,
        pub updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RemittanceListResponse {
        pub remittances: Vec<RemittanceView>,
        pub next_cursor: Option<String>,
    }
}

pub mod transaction_batch {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BatchStart {
        pub batch_name: String,
        pub beginning_balance: i64,
        pub deposit_in_bank: i64,
    }

    /// Close request; the operator declares the counted cash.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BatchEnd {
        pub cash_count_total: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionBatchView {
        pub id: Uuid,
        pub batch_name: String,
        pub employee_user_id: Uuid,
        pub is_closed: bool,
        pub beginning_balance: i64,
        pub deposit_in_bank: i64,
        pub cash_count_total: i64,
        pub total_cash_collection: i64,
        pub total_deposit_entry: i64,
        pub total_cash_handled: i64,
        pub total_withdrawals: i64,
        pub total_supposed_remittance: i64,
        pub total_check_remittance: i64,
        pub total_online_remittance: i64,
        pub total_cash_on_hand: i64,
        pub total_deposit_in_bank: i64,
        pub total_actual_remittance: i64,
        /// Actual minus supposed remittance; zero when the drawer reconciles.
        pub total_actual_supposed_comparison: i64,
        pub grand_total: i64,
        pub ended_at: Option<DateTime<Utc>>,
        pub ended_by: Option<Uuid>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BatchSearchResponse {
        pub batches: Vec<TransactionBatchView>,
        pub next_cursor: Option<String>,
    }
}

pub mod general_ledger {
    use super::*;

    /// Subsystem that originated a ledger posting.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
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

    /// Query parameters for `GET /general-ledger`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LedgerQuery {
        pub account_id: Option<Uuid>,
        pub member_profile_id: Option<Uuid>,
        pub transaction_batch_id: Option<Uuid>,
        pub source: Option<GeneralLedgerSource>,
        pub limit: Option<u64>,
        pub cursor: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GeneralLedgerView {
        pub id: Uuid,
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
        /// Running balance after this posting.
        pub balance: i64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct GeneralLedgerListResponse {
        pub entries: Vec<GeneralLedgerView>,
        pub next_cursor: Option<String>,
    }
}
