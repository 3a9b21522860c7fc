//! Participation aggregates and CSV exports

mod common;

use crate::common::{
    create_test_event, create_test_event_with_notes, create_test_member, TestHarness,
};
use axum::http::{header, StatusCode};
use guild_core::common::MemberId;
use serde_json::Value;
use test_context::test_context;

/// Alice(1), Bob(2), Carl(3) across three tasks:
///
/// - 城池争夺: Bob x2, Alice x1, Carl x1
/// - 防守战:   Alice x1
/// - (no task): Carl x1, ignored by the aggregates
async fn seed_season(ctx: &TestHarness) -> (MemberId, MemberId, MemberId) {
    let pool = &ctx.db_pool;
    let alice = create_test_member(pool, "Alice").await.unwrap();
    let bob = create_test_member(pool, "Bob").await.unwrap();
    let carl = create_test_member(pool, "Carl").await.unwrap();

    create_test_event(pool, "2024-01-10", "Siege week 1", "城池争夺", &[bob, carl])
        .await
        .unwrap();
    create_test_event(pool, "2024-02-10", "Siege week 2", "城池争夺", &[alice, bob])
        .await
        .unwrap();
    create_test_event(pool, "2024-03-10", "Hold the wall", "防守战", &[alice])
        .await
        .unwrap();
    create_test_event(pool, "2024-04-10", "Chat night", "", &[carl])
        .await
        .unwrap();

    (alice, bob, carl)
}

fn column(rows: &Value, key: &str) -> Vec<Value> {
    rows.as_array()
        .unwrap()
        .iter()
        .map(|r| r[key].clone())
        .collect()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn stats_counts_rows(ctx: &TestHarness) {
    let token = ctx.login().await;
    seed_season(ctx).await;

    let resp = ctx.get("/api/reports/stats", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["totalMembers"], 3);
    assert_eq!(body["totalEvents"], 4);
}

// ============================================================================
// Task participation
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn task_participation_orders_by_task_then_count_then_name(ctx: &TestHarness) {
    let token = ctx.login().await;
    seed_season(ctx).await;

    let resp = ctx.get("/api/reports/task-participation", Some(&token)).await;
    assert_eq!(resp.status, StatusCode::OK);
    let rows = resp.json();

    assert_eq!(
        column(&rows, "task"),
        vec!["城池争夺", "城池争夺", "城池争夺", "防守战"]
    );
    assert_eq!(
        column(&rows, "member_name"),
        vec!["Bob", "Alice", "Carl", "Alice"]
    );
    assert_eq!(column(&rows, "participation_count"), vec![2, 1, 1, 1]);
    assert_eq!(rows[0]["first_date"], "2024-01-10");
    assert_eq!(rows[0]["last_date"], "2024-02-10");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn task_name_filter_is_exact(ctx: &TestHarness) {
    let token = ctx.login().await;
    seed_season(ctx).await;

    let resp = ctx
        // taskName=防守战
        .get(
            "/api/reports/task-participation?taskName=%E9%98%B2%E5%AE%88%E6%88%98",
            Some(&token),
        )
        .await;
    assert_eq!(resp.json().as_array().unwrap().len(), 1);

    let resp = ctx
        // taskName=防守
        .get(
            "/api/reports/task-participation?taskName=%E9%98%B2%E5%AE%88",
            Some(&token),
        )
        .await;
    assert!(resp.json().as_array().unwrap().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn member_filter_drops_malformed_ids(ctx: &TestHarness) {
    let token = ctx.login().await;
    let (alice, _bob, _carl) = seed_season(ctx).await;

    let resp = ctx
        .get(
            &format!("/api/reports/task-participation?memberIds={},abc,,%20", alice),
            Some(&token),
        )
        .await;
    let rows = resp.json();
    assert_eq!(column(&rows, "member_name"), vec!["Alice", "Alice"]);

    // Nothing parseable means no member filter at all
    let resp = ctx
        .get("/api/reports/task-participation?memberIds=x,y", Some(&token))
        .await;
    assert_eq!(resp.json().as_array().unwrap().len(), 4);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn date_range_limits_aggregates(ctx: &TestHarness) {
    let token = ctx.login().await;
    seed_season(ctx).await;

    let resp = ctx
        .get(
            "/api/reports/task-participation?from=2024-02-01&to=2024-02-28",
            Some(&token),
        )
        .await;
    let rows = resp.json();
    assert_eq!(column(&rows, "member_name"), vec!["Alice", "Bob"]);

    let resp = ctx
        .get("/api/reports/task-participation?from=2024-13-01", Some(&token))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn task_participation_csv(ctx: &TestHarness) {
    let token = ctx.login().await;
    seed_season(ctx).await;

    let resp = ctx
        .get(
            "/api/reports/export-task-participation-csv?taskName=%E9%98%B2%E5%AE%88%E6%88%98",
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.header(header::CONTENT_TYPE), "text/csv; charset=utf-8");
    assert_eq!(
        resp.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"task_participation_all_all.csv\""
    );
    assert_eq!(
        resp.text(),
        "\u{FEFF}task,member_id,member_name,participation_count,first_date,last_date\n\
         \"防守战\",1,\"Alice\",1,2024-03-10,2024-03-10\n"
    );

    let resp = ctx
        .get(
            "/api/reports/export-task-participation-csv?from=2024-01-01&to=2024-06-30",
            Some(&token),
        )
        .await;
    assert_eq!(
        resp.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"task_participation_2024-01-01_2024-06-30.csv\""
    );
}

// ============================================================================
// Member summary
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn member_summary_is_long_format(ctx: &TestHarness) {
    let token = ctx.login().await;
    seed_season(ctx).await;

    let resp = ctx
        .get("/api/reports/member-participation-summary", Some(&token))
        .await;
    let rows = resp.json();

    assert_eq!(column(&rows, "member_id"), vec![1, 1, 2, 3]);
    assert_eq!(
        column(&rows, "task"),
        vec!["城池争夺", "防守战", "城池争夺", "城池争夺"]
    );
    assert_eq!(column(&rows, "task_count"), vec![1, 1, 2, 1]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn member_summary_csv_pivots_tasks(ctx: &TestHarness) {
    let token = ctx.login().await;
    seed_season(ctx).await;

    let resp = ctx
        .get(
            "/api/reports/export-member-summary-csv?from=2024-01-01&to=2024-12-31",
            Some(&token),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"member_summary_2024-01-01_2024-12-31.csv\""
    );
    // Alice and Bob tie on 2; member id breaks the tie
    assert_eq!(
        resp.text(),
        "\u{FEFF}ID,name,\"城池争夺\",\"防守战\",total\n\
         1,\"Alice\",1,1,2\n\
         2,\"Bob\",2,0,2\n\
         3,\"Carl\",1,0,1\n"
    );
}

// ============================================================================
// Flat report
// ============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn flat_csv_escapes_and_filters(ctx: &TestHarness) {
    let token = ctx.login().await;
    let pool = &ctx.db_pool;
    let alice = create_test_member(pool, "Alice \"Ace\"").await.unwrap();
    let bob = create_test_member(pool, "Bob").await.unwrap();

    create_test_event_with_notes(
        pool,
        "2024-05-01",
        "Siege, east",
        "城池争夺",
        &[(bob, "late"), (alice, "lead")],
    )
    .await
    .unwrap();
    create_test_event(pool, "2024-06-01", "Raid", "副本推进", &[bob])
        .await
        .unwrap();

    let resp = ctx
        .get("/api/reports/export-csv?titleLike=Siege", Some(&token))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.header(header::CONTENT_DISPOSITION),
        "attachment; filename=\"report.csv\""
    );
    assert_eq!(
        resp.text(),
        "\u{FEFF}date,title,task,event_remark,member_id,member_name,member_note\n\
         \"2024-05-01\",\"Siege, east\",\"城池争夺\",\"\",1,\"Alice \"\"Ace\"\"\",\"lead\"\n\
         \"2024-05-01\",\"Siege, east\",\"城池争夺\",\"\",2,\"Bob\",\"late\"\n"
    );

    let resp = ctx
        .get(&format!("/api/reports/export-csv?memberIds={}", bob), Some(&token))
        .await;
    let text = resp.text();
    assert_eq!(text.lines().count(), 3);
    assert!(!text.contains("Alice"));
}
