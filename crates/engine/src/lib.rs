pub use accounts::{Account, GeneralLedgerType};
pub use account_histories::AccountHistory;
pub use adjustment_entries::AdjustmentEntry;
pub use balance::{BalanceSummary, summarize, summarize_strict};
pub use branches::Branch;
pub use cash_check_voucher_entries::CashCheckVoucherEntry;
pub use cash_check_vouchers::{CashCheckVoucher, VoucherStatus};
pub use companies::Company;
pub use error::EngineError;
pub use footsteps::Footstep;
pub use general_ledgers::{GeneralLedger, GeneralLedgerSource, Posting};
pub use member_profiles::MemberProfile;
pub use ops::{
    AdjustmentEntryInput, Engine, EngineBuilder, LedgerFilter, MemberProfileInput,
    RemittanceInput, RemittanceKind, VoucherEntryInput,
};
pub use organizations::Organization;
pub use payment_types::{PaymentKind, PaymentType};
pub use remittances::Remittance;
pub use transaction_batches::{BatchLedgerSums, TransactionBatch};
pub use user_organizations::{Actor, UserOrganization, UserType};
pub use user_ratings::UserRating;
pub use users::User;

mod accounts;
mod account_histories;
mod adjustment_entries;
mod balance;
mod branches;
mod cash_check_voucher_entries;
mod cash_check_vouchers;
mod companies;
mod cursor;
mod error;
mod footsteps;
mod general_ledgers;
mod member_profiles;
mod ops;
mod organizations;
mod payment_types;
mod remittances;
mod transaction_batches;
mod user_organizations;
mod user_ratings;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
