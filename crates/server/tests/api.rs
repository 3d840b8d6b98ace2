use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use engine::{Engine, UserType};
use migration::MigratorTrait;

const PASSWORD: &str = "hunter2";

struct Caller {
    username: String,
    binding_id: Uuid,
    user_id: Uuid,
}

struct TestApp {
    app: Router,
    owner: Caller,
    member: Caller,
    annex_owner: Caller,
}

async fn seed_caller(
    engine: &Engine,
    username: &str,
    full_name: &str,
    organization_id: Uuid,
    branch_id: Uuid,
    user_type: UserType,
) -> Caller {
    let user = engine
        .create_user(username, PASSWORD, full_name)
        .await
        .unwrap();
    let binding = engine
        .assign_user(user.id, organization_id, Some(branch_id), user_type)
        .await
        .unwrap();

    Caller {
        username: username.to_string(),
        binding_id: binding.id,
        user_id: user.id,
    }
}

/// Fresh in-memory database with one organization, two branches and three
/// callers: an owner and a member in the main branch, an owner in the annex.
async fn spawn_app() -> TestApp {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();

    let organization = engine
        .create_organization("Sunrise Cooperative")
        .await
        .unwrap();
    let main = engine
        .create_branch(organization.id, "Main Branch")
        .await
        .unwrap();
    let annex = engine
        .create_branch(organization.id, "Annex Branch")
        .await
        .unwrap();

    let owner = seed_caller(
        &engine,
        "ofelia",
        "Ofelia Reyes",
        organization.id,
        main.id,
        UserType::Owner,
    )
    .await;
    let member = seed_caller(
        &engine,
        "marco",
        "Marco Cruz",
        organization.id,
        main.id,
        UserType::Member,
    )
    .await;
    let annex_owner = seed_caller(
        &engine,
        "odessa",
        "Odessa Lim",
        organization.id,
        annex.id,
        UserType::Owner,
    )
    .await;

    TestApp {
        app: server::router(engine),
        owner,
        member,
        annex_owner,
    }
}

fn basic_auth(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{username}:{password}"))
    )
}

fn request(caller: &Caller, method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::AUTHORIZATION,
            basic_auth(&caller.username, PASSWORD),
        )
        .header("x-user-org", caller.binding_id.to_string());
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    builder.body(body).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

async fn create_account(app: &Router, caller: &Caller, name: &str) -> Uuid {
    let (status, body) = send(
        app,
        request(
            caller,
            "POST",
            "/account",
            Some(json!({
                "name": name,
                "description": null,
                "general_ledger_type": "assets",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["id"].as_str().unwrap().parse().unwrap()
}

async fn start_batch(app: &Router, caller: &Caller) -> Uuid {
    let (status, body) = send(
        app,
        request(
            caller,
            "POST",
            "/transaction-batch/start",
            Some(json!({
                "batch_name": "morning shift",
                "beginning_balance": 10_000,
                "deposit_in_bank": 0,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    body["id"].as_str().unwrap().parse().unwrap()
}

async fn create_voucher(app: &Router, caller: &Caller, account_id: Uuid) -> Uuid {
    let (status, body) = send(
        app,
        request(
            caller,
            "POST",
            "/cash-check-voucher",
            Some(json!({
                "member_profile_id": null,
                "pay_to": "Juan dela Cruz",
                "description": "loan proceeds",
                "entries": [
                    { "account_id": account_id, "description": null, "debit": 500, "credit": 0 },
                    { "account_id": account_id, "description": null, "debit": 0, "credit": 500 },
                ],
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["voucher"]["status"], "pending");

    body["voucher"]["id"].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn requests_without_credentials_are_rejected() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/company")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/company")
                .header(
                    header::AUTHORIZATION,
                    basic_auth(&test.owner.username, "not-the-password"),
                )
                .header("x-user-org", test.owner.binding_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn selecting_another_users_binding_is_rejected() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/company")
                .header(
                    header::AUTHORIZATION,
                    basic_auth(&test.owner.username, PASSWORD),
                )
                .header("x-user-org", test.member.binding_id.to_string())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn scoped_routes_require_an_organization_header() {
    let test = spawn_app().await;

    let response = test
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/company")
                .header(
                    header::AUTHORIZATION,
                    basic_auth(&test.owner.username, PASSWORD),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_user_and_bindings() {
    let test = spawn_app().await;

    let (status, body) = send(&test.app, request(&test.owner, "GET", "/user/me", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "ofelia");
    assert_eq!(body["user"]["id"], test.owner.user_id.to_string());
    let organizations = body["organizations"].as_array().unwrap();
    assert_eq!(organizations.len(), 1);
    assert_eq!(
        organizations[0]["id"],
        test.owner.binding_id.to_string()
    );
    assert_eq!(organizations[0]["organization_name"], "Sunrise Cooperative");
    assert_eq!(organizations[0]["branch_name"], "Main Branch");
    assert_eq!(organizations[0]["user_type"], "owner");
}

#[tokio::test]
async fn company_create_then_get_roundtrip() {
    let test = spawn_app().await;

    let (status, created) = send(
        &test.app,
        request(
            &test.owner,
            "POST",
            "/company",
            Some(json!({
                "name": "Acme Trading",
                "description": "supplier",
                "contact_number": "0917-555-0000",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().unwrap();

    let (status, fetched) = send(
        &test.app,
        request(&test.owner, "GET", &format!("/company/{id}"), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "Acme Trading");
    assert_eq!(fetched["description"], "supplier");

    let (status, listed) = send(&test.app, request(&test.owner, "GET", "/company", None)).await;
    assert_eq!(status, StatusCode::OK);
    let companies = listed["companies"].as_array().unwrap();
    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0]["id"], id);
}

#[tokio::test]
async fn lists_are_scoped_to_the_callers_branch() {
    let test = spawn_app().await;

    let (status, _) = send(
        &test.app,
        request(
            &test.owner,
            "POST",
            "/company",
            Some(json!({
                "name": "Main Branch Supplier",
                "description": null,
                "contact_number": null,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, listed) = send(
        &test.app,
        request(&test.annex_owner, "GET", "/company", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed["companies"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn member_cannot_start_a_batch() {
    let test = spawn_app().await;

    let (status, body) = send(
        &test.app,
        request(
            &test.member,
            "POST",
            "/transaction-batch/start",
            Some(json!({
                "batch_name": "sneaky shift",
                "beginning_balance": 0,
                "deposit_in_bank": 0,
            })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn member_cannot_list_branch_footsteps() {
    let test = spawn_app().await;

    let (status, body) = send(
        &test.app,
        request(&test.member, "GET", "/footstep/branch", None),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn missing_company_returns_404_with_error_body() {
    let test = spawn_app().await;

    let (status, body) = send(
        &test.app,
        request(
            &test.owner,
            "GET",
            &format!("/company/{}", Uuid::new_v4()),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn voucher_release_requires_approval() {
    let test = spawn_app().await;
    let account_id = create_account(&test.app, &test.owner, "Cash on Hand").await;
    start_batch(&test.app, &test.owner).await;
    let voucher_id = create_voucher(&test.app, &test.owner, account_id).await;

    let (status, body) = send(
        &test.app,
        request(
            &test.owner,
            "POST",
            &format!("/cash-check-voucher/{voucher_id}/release"),
            None,
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn voucher_lifecycle_over_http() {
    let test = spawn_app().await;
    let account_id = create_account(&test.app, &test.owner, "Cash on Hand").await;
    start_batch(&test.app, &test.owner).await;
    let voucher_id = create_voucher(&test.app, &test.owner, account_id).await;

    let (status, printed) = send(
        &test.app,
        request(
            &test.owner,
            "PUT",
            &format!("/cash-check-voucher/{voucher_id}/print"),
            Some(json!({ "cash_voucher_number": "CV-0001" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(printed["status"], "printed");
    assert_eq!(printed["cash_voucher_number"], "CV-0001");
    assert_eq!(printed["print_count"], 1);

    let (status, approved) = send(
        &test.app,
        request(
            &test.owner,
            "PUT",
            &format!("/cash-check-voucher/{voucher_id}/approve"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "approved");

    let (status, released) = send(
        &test.app,
        request(
            &test.owner,
            "POST",
            &format!("/cash-check-voucher/{voucher_id}/release"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(released["status"], "released");
    assert!(released["transaction_batch_id"].is_string());

    // Released entry lines land in the ledger under the voucher number.
    let (status, ledger) = send(
        &test.app,
        request(
            &test.owner,
            "GET",
            &format!("/general-ledger/account/{account_id}"),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let entries = ledger["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(
        entries
            .iter()
            .all(|entry| entry["reference_number"] == "CV-0001")
    );

    let (status, today) = send(
        &test.app,
        request(
            &test.owner,
            "GET",
            "/cash-check-voucher/released-today",
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(today["vouchers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn member_cannot_print_a_voucher() {
    let test = spawn_app().await;
    let account_id = create_account(&test.app, &test.owner, "Cash on Hand").await;
    start_batch(&test.app, &test.owner).await;
    let voucher_id = create_voucher(&test.app, &test.owner, account_id).await;

    let (status, _) = send(
        &test.app,
        request(
            &test.member,
            "PUT",
            &format!("/cash-check-voucher/{voucher_id}/print"),
            Some(json!({ "cash_voucher_number": "CV-9999" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn adjustment_totals_and_csv_export() {
    let test = spawn_app().await;
    let account_id = create_account(&test.app, &test.owner, "Cash on Hand").await;
    start_batch(&test.app, &test.owner).await;

    let (status, _) = send(
        &test.app,
        request(
            &test.owner,
            "POST",
            "/adjustment-entry",
            Some(json!({
                "account_id": account_id,
                "member_profile_id": null,
                "payment_type_id": null,
                "reference_number": "ADJ-7",
                "description": "cash shortage correction",
                "debit": 500,
                "credit": 0,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, totals) = send(
        &test.app,
        request(&test.owner, "GET", "/adjustment-entry/total", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["total_debit"], 500);
    assert_eq!(totals["total_credit"], 0);
    assert_eq!(totals["balance"], 500);
    assert_eq!(totals["is_balanced"], false);

    let response = test
        .app
        .clone()
        .oneshot(request(&test.owner, "GET", "/general-ledger/export", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv"
    );
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(csv.starts_with("created_at,source,reference_number"));
    assert!(csv.contains("ADJ-7"));
}

#[tokio::test]
async fn remittances_are_kind_separated_and_roll_into_the_batch() {
    let test = spawn_app().await;
    let batch_id = start_batch(&test.app, &test.owner).await;

    let (status, created) = send(
        &test.app,
        request(
            &test.owner,
            "POST",
            "/check-remittance",
            Some(json!({
                "reference_number": "CHK-31",
                "account_name": "Land Bank",
                "amount": 2_500,
                "date_entry": Utc::now().to_rfc3339(),
                "description": null,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["amount"], 2_500);
    assert_eq!(created["transaction_batch_id"], batch_id.to_string());

    let (status, checks) = send(
        &test.app,
        request(&test.owner, "GET", "/check-remittance", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(checks["remittances"].as_array().unwrap().len(), 1);

    let (status, onlines) = send(
        &test.app,
        request(&test.owner, "GET", "/online-remittance", None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(onlines["remittances"].as_array().unwrap().is_empty());

    let (status, ended) = send(
        &test.app,
        request(
            &test.owner,
            "PUT",
            &format!("/transaction-batch/{batch_id}/end"),
            Some(json!({ "cash_count_total": 10_000 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ended["is_closed"], true);
    assert_eq!(ended["total_check_remittance"], 2_500);
    assert_eq!(ended["total_cash_on_hand"], 10_000);
}

#[tokio::test]
async fn footsteps_record_writes() {
    let test = spawn_app().await;

    let (status, _) = send(
        &test.app,
        request(
            &test.owner,
            "POST",
            "/company",
            Some(json!({
                "name": "Audited Trading",
                "description": null,
                "contact_number": null,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&test.app, request(&test.owner, "GET", "/footstep/me", None)).await;
    assert_eq!(status, StatusCode::OK);
    let footsteps = body["footsteps"].as_array().unwrap();
    assert_eq!(footsteps.len(), 1);
    assert_eq!(footsteps[0]["module"], "company");
    assert_eq!(footsteps[0]["activity"], "create");
}
