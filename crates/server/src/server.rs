use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{delete, get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, Error as AxumError, Header, authorization::Basic},
};
use uuid::Uuid;

use std::sync::Arc;

use crate::{
    ServerError, accounts, adjustments, batches, companies, footsteps, general_ledger,
    member_profiles, payment_types, remittances, user, user_ratings, vouchers,
};
use engine::{Actor, Engine, EngineError, User};

static USER_ORG_HEADER: axum::http::HeaderName = axum::http::HeaderName::from_static("x-user-org");

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

impl ServerState {
    /// Records the audit trail entry for a write, successful or failed.
    /// Trail persistence failures only log; the response is never affected.
    pub async fn footstep<T>(
        &self,
        actor: &Actor,
        module: &str,
        activity: &str,
        description: String,
        outcome: &Result<T, EngineError>,
    ) {
        let description = match outcome {
            Ok(_) => description,
            Err(err) => format!("{description} failed: {err}"),
        };
        if let Err(err) = self
            .engine
            .record_footstep(actor, module, activity, &description)
            .await
        {
            tracing::warn!("failed to record footstep: {err}");
        }
    }
}

/// What the auth middleware resolved for the request: the Basic-auth user
/// and, when an "x-user-org" header selected a binding, the caller's scope.
#[derive(Clone)]
pub struct AuthSession {
    pub user: User,
    pub actor: Option<Actor>,
}

impl AuthSession {
    /// The selected organization binding. Scoped routes require one.
    pub fn actor(&self) -> Result<&Actor, ServerError> {
        self.actor.as_ref().ok_or_else(|| {
            ServerError::Engine(EngineError::Unauthorized(
                "no organization selected".to_string(),
            ))
        })
    }
}

/// `TypedHeader` for the organization selector.
///
/// Scoped requests carry an "x-user-org" entry naming one of the caller's
/// organization bindings by id.
#[derive(Debug)]
struct UserOrgHeader(Uuid);

impl Header for UserOrgHeader {
    fn name() -> &'static axum::http::HeaderName {
        &USER_ORG_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };
        let Ok(value) = value.parse() else {
            return Err(AxumError::invalid());
        };

        Ok(UserOrgHeader(value))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        let as_string = self.0.to_string();
        match axum::http::HeaderValue::from_str(&as_string) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-user-org header"),
        }
    }
}

async fn auth(
    auth_header: Option<TypedHeader<Authorization<Basic>>>,
    org_header: Option<TypedHeader<UserOrgHeader>>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(auth_header) = auth_header else {
        return Err(StatusCode::UNAUTHORIZED);
    };
    if auth_header.username().is_empty() || auth_header.password().is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let user = state
        .engine
        .authenticate(auth_header.username(), auth_header.password())
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let actor = match org_header {
        Some(TypedHeader(UserOrgHeader(binding_id))) => {
            let binding = state
                .engine
                .binding_for(user.id, binding_id)
                .await
                .map_err(|_| StatusCode::UNAUTHORIZED)?;
            Some(Actor::from_binding(&binding))
        }
        None => None,
    };

    request.extensions_mut().insert(AuthSession { user, actor });
    Ok(next.run(request).await)
}

fn app(state: ServerState) -> Router {
    Router::new()
        .route("/user/me", get(user::me))
        .route("/user-organization", get(user::list_bindings))
        .route("/user-organization/{id}", get(user::get_binding))
        .route("/company", get(companies::list).post(companies::create))
        .route("/company/search", get(companies::list))
        .route("/company/bulk-delete", delete(companies::remove_many))
        .route(
            "/company/{id}",
            get(companies::get)
                .put(companies::update)
                .delete(companies::remove),
        )
        .route(
            "/member-profile",
            get(member_profiles::list).post(member_profiles::create),
        )
        .route("/member-profile/search", get(member_profiles::list))
        .route(
            "/member-profile/bulk-delete",
            delete(member_profiles::remove_many),
        )
        .route(
            "/member-profile/{id}",
            get(member_profiles::get)
                .put(member_profiles::update)
                .delete(member_profiles::remove),
        )
        .route(
            "/payment-type",
            get(payment_types::list).post(payment_types::create),
        )
        .route("/payment-type/search", get(payment_types::list))
        .route(
            "/payment-type/bulk-delete",
            delete(payment_types::remove_many),
        )
        .route(
            "/payment-type/{id}",
            get(payment_types::get)
                .put(payment_types::update)
                .delete(payment_types::remove),
        )
        .route("/account", get(accounts::list).post(accounts::create))
        .route("/account/search", get(accounts::list))
        .route("/account/bulk-delete", delete(accounts::remove_many))
        .route(
            "/account/{id}",
            get(accounts::get)
                .put(accounts::update)
                .delete(accounts::remove),
        )
        .route("/account/{id}/history", get(accounts::history))
        .route(
            "/user-rating",
            get(user_ratings::list).post(user_ratings::create),
        )
        .route("/user-rating/user/{user_id}", get(user_ratings::for_user))
        .route(
            "/user-rating/{id}",
            get(user_ratings::get).delete(user_ratings::remove),
        )
        .route("/footstep/me", get(footsteps::me))
        .route("/footstep/branch", get(footsteps::branch))
        .route(
            "/cash-check-voucher",
            get(vouchers::list).post(vouchers::create),
        )
        .route("/cash-check-voucher/search", get(vouchers::list))
        .route("/cash-check-voucher/draft", get(vouchers::draft))
        .route("/cash-check-voucher/printed", get(vouchers::printed))
        .route("/cash-check-voucher/approved", get(vouchers::approved))
        .route("/cash-check-voucher/released", get(vouchers::released))
        .route(
            "/cash-check-voucher/released-today",
            get(vouchers::released_today),
        )
        .route(
            "/cash-check-voucher/bulk-delete",
            delete(vouchers::remove_many),
        )
        .route(
            "/cash-check-voucher/{id}",
            get(vouchers::get)
                .put(vouchers::update)
                .delete(vouchers::remove),
        )
        .route("/cash-check-voucher/{id}/print", put(vouchers::print))
        .route(
            "/cash-check-voucher/{id}/print-only",
            post(vouchers::print_only),
        )
        .route(
            "/cash-check-voucher/{id}/print-undo",
            put(vouchers::print_undo),
        )
        .route("/cash-check-voucher/{id}/approve", put(vouchers::approve))
        .route(
            "/cash-check-voucher/{id}/approve-undo",
            post(vouchers::approve_undo),
        )
        .route("/cash-check-voucher/{id}/release", post(vouchers::release))
        .route(
            "/adjustment-entry",
            get(adjustments::list).post(adjustments::create),
        )
        .route("/adjustment-entry/total", get(adjustments::total))
        .route(
            "/adjustment-entry/bulk-delete",
            delete(adjustments::remove_many),
        )
        .route(
            "/adjustment-entry/{id}",
            get(adjustments::get)
                .put(adjustments::update)
                .delete(adjustments::remove),
        )
        .route(
            "/check-remittance",
            get(remittances::check_list).post(remittances::check_create),
        )
        .route(
            "/check-remittance/{id}",
            put(remittances::check_update).delete(remittances::check_remove),
        )
        .route(
            "/online-remittance",
            get(remittances::online_list).post(remittances::online_create),
        )
        .route(
            "/online-remittance/{id}",
            put(remittances::online_update).delete(remittances::online_remove),
        )
        .route("/transaction-batch/start", post(batches::start))
        .route("/transaction-batch/current", get(batches::current))
        .route("/transaction-batch", get(batches::list))
        .route("/transaction-batch/{id}", get(batches::get))
        .route("/transaction-batch/{id}/end", put(batches::end))
        .route("/general-ledger", get(general_ledger::list))
        .route("/general-ledger/export", get(general_ledger::export))
        .route(
            "/general-ledger/account/{id}",
            get(general_ledger::by_account),
        )
        .route(
            "/general-ledger/member-profile/{id}",
            get(general_ledger::by_member_profile),
        )
        .route(
            "/general-ledger/transaction-batch/{id}",
            get(general_ledger::by_batch),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .with_state(state)
}

pub fn router(engine: Engine) -> Router {
    app(ServerState {
        engine: Arc::new(engine),
    })
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
