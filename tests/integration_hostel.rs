mod common;

use axum::http::StatusCode;
use campusgate_store::Collection;
use common::{get, post_json, seed, setup_test_app};
use serde_json::json;

async fn seed_ledger(store: &campusgate_store::MemoryStore, student_id: &str) {
    seed(
        store,
        Collection::HostelFee,
        json!({
            "StudentID": student_id,
            "Fees": [
                {"Item": "Mess", "Amount": 3000, "Status": "Unpaid"},
                {"Item": "Rent", "Amount": 5000, "Status": "Unpaid"},
                {"Item": "Laundry", "Amount": 400, "Status": "Paid"}
            ]
        }),
    )
    .await;
}

#[tokio::test]
async fn test_hostel_view_merges_assignment_and_hostel() {
    let app = setup_test_app();
    seed(
        &app.store,
        Collection::HostelAssigned,
        json!({"StudentID": "S1", "HostelID": "H001", "RoomNo": "12", "CheckInDate": "2024-07-01", "Floor": "2"}),
    )
    .await;
    seed(
        &app.store,
        Collection::Hostel,
        json!({"HostelID": "H001", "HostelName": "Ganga", "MonthlyFee": 4500, "WardenName": "R. Iyer", "Floor": "1", "RoomType": "Double"}),
    )
    .await;

    let (status, body) = get(&app.router, "/api/hostel-assigned/S1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["HostelName"], "Ganga");
    assert_eq!(body["RoomNumber"], "12");
    assert_eq!(body["MonthlyFee"], "4500");
    assert_eq!(body["Floor"], "2");
    assert_eq!(body["RoomType"], "Double");
    assert_eq!(body["WardenPhone"], "");
}

#[tokio::test]
async fn test_hostel_view_unassigned_student() {
    let app = setup_test_app();

    let (status, body) = get(&app.router, "/api/hostel-assigned/S404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_pay_fee_marks_only_that_line() {
    let app = setup_test_app();
    seed_ledger(&app.store, "S1").await;

    let (status, body) = post_json(
        &app.router,
        "/api/hostel-fee/pay",
        json!({"studentId": "S1", "item": "Mess"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, ledger) = get(&app.router, "/api/hostel-fee/S1").await;
    assert_eq!(status, StatusCode::OK);
    let fees = ledger["Fees"].as_array().unwrap();
    assert_eq!(fees[0]["Status"], "Paid");
    assert_eq!(fees[0]["Amount"], 3000);
    assert_eq!(fees[1]["Status"], "Unpaid");
    assert_eq!(fees[2]["Status"], "Paid");
}

#[tokio::test]
async fn test_pay_fee_twice_is_idempotent() {
    let app = setup_test_app();
    seed_ledger(&app.store, "S1").await;

    for _ in 0..2 {
        let (status, _) = post_json(
            &app.router,
            "/api/hostel-fee/pay",
            json!({"studentId": "S1", "item": "Rent"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, ledger) = get(&app.router, "/api/hostel-fee/S1").await;
    assert_eq!(ledger["Fees"][1]["Status"], "Paid");
    assert_eq!(ledger["Fees"][0]["Status"], "Unpaid");
}

#[tokio::test]
async fn test_pay_fee_unknown_item_or_ledger() {
    let app = setup_test_app();
    seed_ledger(&app.store, "S1").await;

    let (status, _) = post_json(
        &app.router,
        "/api/hostel-fee/pay",
        json!({"studentId": "S1", "item": "Gym"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(
        &app.router,
        "/api/hostel-fee/pay",
        json!({"studentId": "S2", "item": "Mess"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_pay_fee_requires_item() {
    let app = setup_test_app();

    let (status, body) =
        post_json(&app.router, "/api/hostel-fee/pay", json!({"studentId": "S1"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "item is required");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_payments_keep_every_line() {
    let app = setup_test_app();
    seed_ledger(&app.store, "S1").await;

    let router = app.router.clone();
    let mess = tokio::spawn({
        let router = router.clone();
        async move {
            post_json(
                &router,
                "/api/hostel-fee/pay",
                json!({"studentId": "S1", "item": "Mess"}),
            )
            .await
        }
    });
    let rent = tokio::spawn(async move {
        post_json(
            &router,
            "/api/hostel-fee/pay",
            json!({"studentId": "S1", "item": "Rent"}),
        )
        .await
    });

    assert_eq!(mess.await.unwrap().0, StatusCode::OK);
    assert_eq!(rent.await.unwrap().0, StatusCode::OK);

    let (_, ledger) = get(&app.router, "/api/hostel-fee/S1").await;
    let fees = ledger["Fees"].as_array().unwrap();
    assert!(fees.iter().all(|line| line["Status"] == "Paid"));
}

#[tokio::test]
async fn test_missing_fee_ledger() {
    let app = setup_test_app();

    let (status, body) = get(&app.router, "/api/hostel-fee/S9").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No fee record found");
}

#[tokio::test]
async fn test_complaint_created_and_listed() {
    let app = setup_test_app();

    let (status, body) = post_json(
        &app.router,
        "/api/hostel-complaint",
        json!({
            "StudentID": "S1",
            "Category": "Plumbing",
            "Description": "Tap leaking"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["complaint"]["Status"], "Open");
    let complaint_id = body["complaint"]["ComplaintID"].as_str().unwrap();
    assert!(complaint_id.starts_with('C'));

    let (status, list) = get(&app.router, "/api/hostel-complaint/S1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["Description"], "Tap leaking");
}

#[tokio::test]
async fn test_complaint_with_reused_id_conflicts() {
    let app = setup_test_app();
    let complaint = json!({
        "StudentID": "S1",
        "ComplaintID": "C1",
        "Description": "Fan broken"
    });

    let (status, _) = post_json(&app.router, "/api/hostel-complaint", complaint.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = post_json(&app.router, "/api/hostel-complaint", complaint).await;
    assert_eq!(status, StatusCode::CONFLICT);
}
