use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{router, run, run_with_listener, spawn_with_listener};

mod accounts;
mod adjustments;
mod batches;
mod companies;
mod footsteps;
mod general_ledger;
mod member_profiles;
mod payment_types;
mod remittances;
mod server;
mod user;
mod user_ratings;
mod vouchers;

pub mod types {
    pub mod common {
        pub use api_types::common::{BalanceTotals, IdsRequest, PageQuery};
    }

    pub mod user {
        pub use api_types::user::{MeResponse, UserOrganizationView, UserType, UserView};
    }

    pub mod company {
        pub use api_types::company::{
            CompanyNew, CompanySearchResponse, CompanyUpdate, CompanyView,
        };
    }

    pub mod member_profile {
        pub use api_types::member_profile::{
            MemberProfileNew, MemberProfileSearchResponse, MemberProfileUpdate, MemberProfileView,
        };
    }

    pub mod payment_type {
        pub use api_types::payment_type::{
            PaymentKind, PaymentTypeNew, PaymentTypeSearchResponse, PaymentTypeUpdate,
            PaymentTypeView,
        };
    }

    pub mod account {
        pub use api_types::account::{
            AccountHistoryListResponse, AccountHistoryView, AccountNew, AccountSearchResponse,
            AccountUpdate, AccountView, GeneralLedgerType,
        };
    }

    pub mod user_rating {
        pub use api_types::user_rating::{UserRatingListResponse, UserRatingNew, UserRatingView};
    }

    pub mod footstep {
        pub use api_types::footstep::{FootstepListResponse, FootstepView};
    }

    pub mod voucher {
        pub use api_types::voucher::{
            CashCheckVoucherDetail, CashCheckVoucherNew, CashCheckVoucherUpdate,
            CashCheckVoucherView, VoucherEntryUpsert, VoucherEntryView, VoucherPrint,
            VoucherSearchResponse, VoucherStatus,
        };
    }

    pub mod adjustment {
        pub use api_types::adjustment::{
            AdjustmentEntryNew, AdjustmentEntryUpdate, AdjustmentEntryView,
            AdjustmentSearchResponse,
        };
    }

    pub mod remittance {
        pub use api_types::remittance::{
            RemittanceListResponse, RemittanceNew, RemittanceUpdate, RemittanceView,
        };
    }

    pub mod transaction_batch {
        pub use api_types::transaction_batch::{
            BatchEnd, BatchSearchResponse, BatchStart, TransactionBatchView,
        };
    }

    pub mod general_ledger {
        pub use api_types::general_ledger::{
            GeneralLedgerListResponse, GeneralLedgerSource, GeneralLedgerView, LedgerQuery,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::AlreadyExists(_)
        | EngineError::InvalidInput(_)
        | EngineError::Unbalanced(_)
        | EngineError::VoucherState(_) => StatusCode::BAD_REQUEST,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_unauthorized_maps_to_401() {
        let res =
            ServerError::from(EngineError::Unauthorized("no credentials".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn engine_forbidden_maps_to_403() {
        let res = ServerError::from(EngineError::Forbidden("forbidden".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::NotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_validation_maps_to_400() {
        let res = ServerError::from(EngineError::InvalidInput("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_unbalanced_maps_to_400() {
        let res = ServerError::from(EngineError::Unbalanced("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_voucher_state_maps_to_400() {
        let res = ServerError::from(EngineError::VoucherState("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
