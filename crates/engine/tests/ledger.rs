use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use engine::{
    Actor, AdjustmentEntryInput, Engine, EngineError, GeneralLedgerSource, GeneralLedgerType,
    LedgerFilter, RemittanceInput, RemittanceKind, UserType, VoucherEntryInput, VoucherStatus,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, DatabaseConnection, String, std::path::PathBuf) {
    let root =
        std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("engine_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();

    (engine, db, url, path)
}

/// Provisions a fresh user, organization and branch and binds them together.
async fn seed_actor(engine: &Engine, user_type: UserType) -> Actor {
    let tag = Uuid::new_v4();
    let user = engine
        .create_user(&format!("user-{tag}"), "hunter2", "Alice Dimaano")
        .await
        .unwrap();
    let organization = engine
        .create_organization(&format!("Coop {tag}"))
        .await
        .unwrap();
    let branch = engine
        .create_branch(organization.id, "Main Branch")
        .await
        .unwrap();
    let binding = engine
        .assign_user(user.id, organization.id, Some(branch.id), user_type)
        .await
        .unwrap();
    Actor::from_binding(&binding)
}

fn debit(account_id: Uuid, amount: i64) -> VoucherEntryInput {
    VoucherEntryInput {
        id: None,
        account_id,
        description: None,
        debit: amount,
        credit: 0,
    }
}

fn credit(account_id: Uuid, amount: i64) -> VoucherEntryInput {
    VoucherEntryInput {
        id: None,
        account_id,
        description: None,
        debit: 0,
        credit: amount,
    }
}

fn adjustment(account_id: Uuid, reference: &str, debit: i64, credit: i64) -> AdjustmentEntryInput {
    AdjustmentEntryInput {
        account_id,
        member_profile_id: None,
        payment_type_id: None,
        reference_number: reference.to_string(),
        description: None,
        debit,
        credit,
    }
}

#[tokio::test]
async fn authenticate_checks_credentials() {
    let (engine, _db) = engine_with_db().await;

    let user = engine
        .create_user("alice", "hunter2", "Alice Dimaano")
        .await
        .unwrap();
    let organization = engine.create_organization("Samahan Coop").await.unwrap();
    let branch = engine
        .create_branch(organization.id, "Main Branch")
        .await
        .unwrap();
    let binding = engine
        .assign_user(user.id, organization.id, Some(branch.id), UserType::Employee)
        .await
        .unwrap();

    let authenticated = engine.authenticate("alice", "hunter2").await.unwrap();
    assert_eq!(authenticated.id, user.id);

    let err = engine.authenticate("alice", "wrong").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Unauthorized("invalid credentials".to_string())
    );
    let err = engine.authenticate("nobody", "hunter2").await.unwrap_err();
    assert_eq!(
        err,
        EngineError::Unauthorized("invalid credentials".to_string())
    );

    let bindings = engine.bindings_with_names(user.id).await.unwrap();
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].0.id, binding.id);
    assert_eq!(bindings[0].1.name, "Samahan Coop");
    assert_eq!(
        bindings[0].2.as_ref().map(|branch| branch.name.as_str()),
        Some("Main Branch")
    );

    // A binding id of someone else is rejected, not leaked.
    let err = engine
        .binding_for(Uuid::new_v4(), binding.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Unauthorized("invalid organization binding".to_string())
    );
}

#[tokio::test]
async fn company_crud_round_trip() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let company = engine
        .create_company(&actor, "Acme Feeds", Some("supplier"), Some("0917-555-0000"))
        .await
        .unwrap();

    let fetched = engine.company(&actor, company.id).await.unwrap();
    assert_eq!(fetched.id, company.id);
    assert_eq!(fetched.name, "Acme Feeds");
    assert_eq!(fetched.description.as_deref(), Some("supplier"));
    assert_eq!(fetched.contact_number.as_deref(), Some("0917-555-0000"));

    let updated = engine
        .update_company(&actor, company.id, "Acme Feeds Inc", None, None)
        .await
        .unwrap();
    assert_eq!(updated.name, "Acme Feeds Inc");
    assert_eq!(updated.description, None);

    engine.delete_company(&actor, company.id).await.unwrap();
    let err = engine.company(&actor, company.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("company".to_string()));
}

#[tokio::test]
async fn rows_of_other_branches_stay_hidden() {
    let (engine, _db) = engine_with_db().await;
    let alice = seed_actor(&engine, UserType::Employee).await;
    let bob = seed_actor(&engine, UserType::Employee).await;

    let company = engine
        .create_company(&alice, "Acme Feeds", None, None)
        .await
        .unwrap();

    let err = engine.company(&bob, company.id).await.unwrap_err();
    assert_eq!(err, EngineError::NotFound("company".to_string()));

    let err = engine
        .delete_companies(&bob, &[company.id])
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::NotFound("company".to_string()));
    assert!(engine.company(&alice, company.id).await.is_ok());
}

#[tokio::test]
async fn list_pages_through_cursor_without_overlap() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let mut expected = Vec::new();
    for name in ["One", "Two", "Three"] {
        expected.push(
            engine
                .create_company(&actor, name, None, None)
                .await
                .unwrap()
                .id,
        );
    }

    let mut seen = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let (page, next) = engine
            .list_companies(&actor, None, Some(1), cursor.as_deref())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        seen.push(page[0].id);
        match next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    seen.sort();
    expected.sort();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn account_update_snapshots_history() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let account = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();
    engine
        .update_account(
            &actor,
            account.id,
            "Petty Cash",
            Some("renamed"),
            GeneralLedgerType::Assets,
        )
        .await
        .unwrap();

    let (history, _) = engine
        .account_history(&actor, account.id, None, None)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].name, "Cash on Hand");
    assert_eq!(history[0].changed_by, actor.user_id);

    let fetched = engine.account(&actor, account.id).await.unwrap();
    assert_eq!(fetched.name, "Petty Cash");
}

#[tokio::test]
async fn referenced_accounts_cannot_be_deleted() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let referenced = engine
        .create_account(&actor, "Savings", None, GeneralLedgerType::Liabilities)
        .await
        .unwrap();
    let clean = engine
        .create_account(&actor, "Unused", None, GeneralLedgerType::Expenses)
        .await
        .unwrap();

    engine
        .start_transaction_batch(&actor, "Day 1", 0, 0)
        .await
        .unwrap();
    engine
        .create_adjustment_entry(&actor, &adjustment(referenced.id, "ADJ-1", 0, 100))
        .await
        .unwrap();

    let err = engine.delete_account(&actor, referenced.id).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("account has recorded entries".to_string())
    );

    // Bulk deletion is all-or-nothing: the clean account must survive too.
    let err = engine
        .delete_accounts(&actor, &[clean.id, referenced.id])
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("account has recorded entries".to_string())
    );
    assert!(engine.account(&actor, clean.id).await.is_ok());

    engine.delete_account(&actor, clean.id).await.unwrap();
}

#[tokio::test]
async fn voucher_release_posts_ledger_rows() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let cash = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();
    let payable = engine
        .create_account(&actor, "Accounts Payable", None, GeneralLedgerType::Liabilities)
        .await
        .unwrap();

    let (voucher, entries) = engine
        .create_cash_check_voucher(
            &actor,
            None,
            "Juan dela Cruz",
            Some("loan proceeds"),
            &[debit(payable.id, 5_000), credit(cash.id, 5_000)],
        )
        .await
        .unwrap();
    assert_eq!(voucher.status, VoucherStatus::Pending);
    assert_eq!(voucher.total_debit, 5_000);
    assert_eq!(voucher.total_credit, 5_000);
    assert_eq!(entries.len(), 2);

    engine
        .print_cash_check_voucher(&actor, voucher.id, "CV-0001")
        .await
        .unwrap();
    engine
        .approve_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap();

    let batch = engine
        .start_transaction_batch(&actor, "Day 1", 1_000, 0)
        .await
        .unwrap();

    let released = engine
        .release_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap();
    assert_eq!(released.status, VoucherStatus::Released);
    assert_eq!(released.transaction_batch_id, Some(batch.id));
    assert_eq!(released.released_by, Some(actor.user_id));

    let (rows, _) = engine
        .list_general_ledger(
            &actor,
            &LedgerFilter {
                transaction_batch_id: Some(batch.id),
                ..LedgerFilter::default()
            },
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows
        .iter()
        .all(|row| row.source == GeneralLedgerSource::CheckVoucher));
    assert!(rows.iter().all(|row| row.reference_number == "CV-0001"));
}

#[tokio::test]
async fn voucher_cannot_be_released_before_approval() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let cash = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();
    let (voucher, _) = engine
        .create_cash_check_voucher(&actor, None, "Juan", None, &[debit(cash.id, 100)])
        .await
        .unwrap();

    engine
        .start_transaction_batch(&actor, "Day 1", 0, 0)
        .await
        .unwrap();

    let err = engine
        .release_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::VoucherState("voucher must be approved before release".to_string())
    );
}

#[tokio::test]
async fn voucher_release_needs_an_open_batch() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let cash = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();
    let (voucher, _) = engine
        .create_cash_check_voucher(&actor, None, "Juan", None, &[debit(cash.id, 100)])
        .await
        .unwrap();
    engine
        .approve_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap();

    let err = engine
        .release_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound("open transaction batch".to_string())
    );
}

#[tokio::test]
async fn released_voucher_cannot_be_unapproved_or_deleted() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let cash = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();
    let payable = engine
        .create_account(&actor, "Accounts Payable", None, GeneralLedgerType::Liabilities)
        .await
        .unwrap();
    let (voucher, _) = engine
        .create_cash_check_voucher(
            &actor,
            None,
            "Juan",
            None,
            &[debit(payable.id, 300), credit(cash.id, 300)],
        )
        .await
        .unwrap();
    engine
        .approve_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap();
    engine
        .start_transaction_batch(&actor, "Day 1", 0, 0)
        .await
        .unwrap();
    engine
        .release_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap();

    let err = engine
        .undo_approve_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::VoucherState("cannot unapprove a released voucher".to_string())
    );

    let err = engine
        .delete_cash_check_voucher(&actor, voucher.id)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::VoucherState("released vouchers cannot be deleted".to_string())
    );
}

#[tokio::test]
async fn voucher_update_enforces_balance_and_ownership() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let cash = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();

    // Drafts may be lopsided.
    let (voucher, draft_entries) = engine
        .create_cash_check_voucher(&actor, None, "Juan", None, &[debit(cash.id, 100)])
        .await
        .unwrap();
    let (other, other_entries) = engine
        .create_cash_check_voucher(&actor, None, "Maria", None, &[debit(cash.id, 50)])
        .await
        .unwrap();

    // Updates must balance.
    let err = engine
        .update_cash_check_voucher(
            &actor,
            voucher.id,
            None,
            "Juan",
            None,
            &[debit(cash.id, 100)],
            &[],
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Unbalanced("debits 100 do not equal credits 0".to_string())
    );

    // Deleting an entry of another voucher is refused.
    let err = engine
        .update_cash_check_voucher(
            &actor,
            voucher.id,
            None,
            "Juan",
            None,
            &[debit(cash.id, 100), credit(cash.id, 100)],
            &[other_entries[0].id],
        )
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("entry does not belong to the voucher".to_string())
    );
    assert_eq!(
        engine
            .cash_check_voucher(&actor, other.id)
            .await
            .unwrap()
            .1
            .len(),
        1
    );

    // Replacing the draft line with a balanced pair goes through.
    let (updated, entries) = engine
        .update_cash_check_voucher(
            &actor,
            voucher.id,
            None,
            "Juan Jr",
            Some("balanced now"),
            &[debit(cash.id, 100), credit(cash.id, 100)],
            &[draft_entries[0].id],
        )
        .await
        .unwrap();
    assert_eq!(updated.pay_to, "Juan Jr");
    assert_eq!(updated.total_debit, 100);
    assert_eq!(updated.total_credit, 100);
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|entry| entry.id != draft_entries[0].id));
}

#[tokio::test]
async fn running_balance_follows_the_account_normal_side() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let cash = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();
    let savings = engine
        .create_account(&actor, "Member Savings", None, GeneralLedgerType::Liabilities)
        .await
        .unwrap();

    engine
        .start_transaction_batch(&actor, "Day 1", 0, 0)
        .await
        .unwrap();

    engine
        .create_adjustment_entry(&actor, &adjustment(cash.id, "ADJ-1", 1_000, 0))
        .await
        .unwrap();
    engine
        .create_adjustment_entry(&actor, &adjustment(cash.id, "ADJ-2", 0, 300))
        .await
        .unwrap();
    engine
        .create_adjustment_entry(&actor, &adjustment(savings.id, "ADJ-3", 0, 200))
        .await
        .unwrap();

    let (cash_rows, _) = engine
        .list_general_ledger(
            &actor,
            &LedgerFilter {
                account_id: Some(cash.id),
                ..LedgerFilter::default()
            },
            None,
            None,
        )
        .await
        .unwrap();
    // Newest first: the 300 credit lands after the 1000 debit.
    assert_eq!(cash_rows.len(), 2);
    assert_eq!(cash_rows[0].balance, 700);
    assert_eq!(cash_rows[1].balance, 1_000);

    let (savings_rows, _) = engine
        .list_general_ledger(
            &actor,
            &LedgerFilter {
                account_id: Some(savings.id),
                ..LedgerFilter::default()
            },
            None,
            None,
        )
        .await
        .unwrap();
    assert_eq!(savings_rows.len(), 1);
    assert_eq!(savings_rows[0].balance, 200);
    assert_eq!(savings_rows[0].source, GeneralLedgerSource::Adjustment);
}

#[tokio::test]
async fn adjustment_totals_summarize_the_branch() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let cash = engine
        .create_account(&actor, "Cash on Hand", None, GeneralLedgerType::Assets)
        .await
        .unwrap();
    engine
        .start_transaction_batch(&actor, "Day 1", 0, 0)
        .await
        .unwrap();
    engine
        .create_adjustment_entry(&actor, &adjustment(cash.id, "ADJ-1", 250, 0))
        .await
        .unwrap();
    engine
        .create_adjustment_entry(&actor, &adjustment(cash.id, "ADJ-2", 0, 100))
        .await
        .unwrap();

    let totals = engine.adjustment_totals(&actor).await.unwrap();
    assert_eq!(totals.total_debit, 250);
    assert_eq!(totals.total_credit, 100);
    assert_eq!(totals.balance, 150);
    assert!(!totals.is_balanced);
}

#[tokio::test]
async fn batch_balancing_tracks_remittances_and_cash_count() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let batch = engine
        .start_transaction_batch(&actor, "Day 1", 1_000, 500)
        .await
        .unwrap();
    assert_eq!(batch.total_cash_handled, 1_500);
    assert_eq!(batch.grand_total, 1_500);

    let err = engine
        .start_transaction_batch(&actor, "Day 1 again", 0, 0)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::AlreadyExists("open transaction batch".to_string())
    );

    engine
        .create_remittance(
            &actor,
            RemittanceKind::Check,
            &RemittanceInput {
                reference_number: "CHK-1".to_string(),
                account_name: "BDO 1234".to_string(),
                amount: 800,
                date_entry: chrono::Utc::now(),
                description: None,
            },
        )
        .await
        .unwrap();
    engine
        .create_remittance(
            &actor,
            RemittanceKind::Online,
            &RemittanceInput {
                reference_number: "GC-1".to_string(),
                account_name: "GCash".to_string(),
                amount: 200,
                date_entry: chrono::Utc::now(),
                description: None,
            },
        )
        .await
        .unwrap();

    let current = engine.current_transaction_batch(&actor).await.unwrap();
    assert_eq!(current.id, batch.id);
    assert_eq!(current.total_check_remittance, 800);
    assert_eq!(current.total_online_remittance, 200);

    let ended = engine
        .end_transaction_batch(&actor, batch.id, 1_500)
        .await
        .unwrap();
    assert!(ended.is_closed);
    assert_eq!(ended.total_cash_on_hand, 1_500);
    assert_eq!(ended.total_supposed_remittance, 1_500);
    // 800 check + 200 online + 1500 cash + 500 bank deposit.
    assert_eq!(ended.total_actual_remittance, 3_000);
    assert_eq!(ended.total_actual_supposed_comparison, 1_500);
    assert_eq!(ended.grand_total, 3_000);

    let err = engine
        .end_transaction_batch(&actor, batch.id, 1_500)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("transaction batch already ended".to_string())
    );

    let err = engine.current_transaction_batch(&actor).await.unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound("open transaction batch".to_string())
    );
}

#[tokio::test]
async fn remittance_writes_require_staff_and_open_batch() {
    let (engine, _db) = engine_with_db().await;
    let staff = seed_actor(&engine, UserType::Employee).await;
    let member = seed_actor(&engine, UserType::Member).await;

    let input = RemittanceInput {
        reference_number: "CHK-1".to_string(),
        account_name: "BDO 1234".to_string(),
        amount: 100,
        date_entry: chrono::Utc::now(),
        description: None,
    };

    let err = engine
        .create_remittance(&member, RemittanceKind::Check, &input)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("operation requires an owner or employee".to_string())
    );

    let err = engine
        .create_remittance(&staff, RemittanceKind::Check, &input)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound("open transaction batch".to_string())
    );
}

#[tokio::test]
async fn ratings_validate_and_footsteps_accumulate() {
    let (engine, _db) = engine_with_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;
    let other = seed_actor(&engine, UserType::Member).await;

    let err = engine
        .create_user_rating(&actor, actor.user_id, 5, "great")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidInput("users cannot rate themselves".to_string())
    );

    let rating = engine
        .create_user_rating(&actor, other.user_id, 4, "reliable teller")
        .await
        .unwrap();
    let (ratings, _) = engine
        .list_user_ratings(&actor, Some(other.user_id), None, None)
        .await
        .unwrap();
    assert_eq!(ratings.len(), 1);
    assert_eq!(ratings[0].id, rating.id);

    engine
        .record_footstep(&actor, "user-rating", "create", "rated a user")
        .await
        .unwrap();
    let (mine, _) = engine.list_footsteps_me(&actor, None, None).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].module, "user-rating");

    // Branch trail requires staff.
    let err = engine
        .list_footsteps_branch(&other, None, None)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Forbidden("operation requires an owner or employee".to_string())
    );
    let (branch_trail, _) = engine
        .list_footsteps_branch(&actor, None, None)
        .await
        .unwrap();
    assert_eq!(branch_trail.len(), 1);
}

#[tokio::test]
async fn restart_engine_reads_same_state() {
    let (engine, db, url, path) = engine_with_file_db().await;
    let actor = seed_actor(&engine, UserType::Employee).await;

    let company = engine
        .create_company(&actor, "Acme Feeds", None, None)
        .await
        .unwrap();

    drop(engine);
    drop(db);

    let db2 = Database::connect(&url).await.unwrap();
    let engine2 = Engine::builder().database(db2.clone()).build().await.unwrap();

    let fetched = engine2.company(&actor, company.id).await.unwrap();
    assert_eq!(fetched.id, company.id);
    assert_eq!(fetched.name, "Acme Feeds");

    drop(db2);
    let _ = std::fs::remove_file(path);
}
