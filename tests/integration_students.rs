mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusgate_store::Collection;
use common::{get, json_request, post_json, seed, send, setup_test_app};
use serde_json::json;

const BOUNDARY: &str = "campusgate-test-boundary";

fn multipart_request(uri: &str, field: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"me.jpg\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: image/jpeg\r\n\r\n");
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_create_students_get_sequential_rooms() {
    let app = setup_test_app();

    let (status, first) = post_json(
        &app.router,
        "/students",
        json!({"StudentID": "S1", "Name": "Asha", "PhoneNo": "9876543210"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["StudentID"], "S1");
    assert_eq!(first["hostelAssignment"]["HostelID"], "H001");
    assert_eq!(first["hostelAssignment"]["RoomNo"], "1");
    assert_eq!(first["hostelAssignment"]["StudentPhoneNo"], "9876543210");

    let (status, second) =
        post_json(&app.router, "/students", json!({"StudentID": "S2", "Name": "Ravi"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["hostelAssignment"]["RoomNo"], "2");

    let (status, view) = get(&app.router, "/api/hostel-assigned/S2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["RoomNumber"], "2");
}

#[tokio::test]
async fn test_create_student_continues_after_existing_rooms() {
    let app = setup_test_app();
    seed(
        &app.store,
        Collection::HostelAssigned,
        json!({"StudentID": "OLD", "HostelID": "H002", "RoomNo": "7"}),
    )
    .await;

    let (status, created) = post_json(
        &app.router,
        "/students",
        json!({"StudentID": "S3", "HostelID": "H002"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["hostelAssignment"]["RoomNo"], "8");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creations_get_distinct_rooms() {
    let app = setup_test_app();

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let router = app.router.clone();
            tokio::spawn(async move {
                post_json(&router, "/students", json!({"StudentID": format!("S{i}")})).await
            })
        })
        .collect();

    let mut rooms = Vec::new();
    for handle in handles {
        let (status, body) = handle.await.unwrap();
        assert_eq!(status, StatusCode::OK);
        rooms.push(body["hostelAssignment"]["RoomNo"].as_str().unwrap().to_string());
    }
    rooms.sort();
    rooms.dedup();
    assert_eq!(rooms.len(), 6);
}

#[tokio::test]
async fn test_create_student_requires_id() {
    let app = setup_test_app();

    let (status, body) = post_json(&app.router, "/students", json!({"Name": "Asha"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "StudentID is required");
}

#[tokio::test]
async fn test_replace_and_delete_student() {
    let app = setup_test_app();
    post_json(&app.router, "/students", json!({"StudentID": "S1", "Name": "Asha"})).await;

    let (status, body) = json_request(
        &app.router,
        "PUT",
        "/students/S1",
        json!({"Name": "Asha K", "Section": "B"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["StudentID"], "S1");
    assert_eq!(body["Name"], "Asha K");

    let request = Request::builder()
        .method("DELETE")
        .uri("/students/S1")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, list) = get(&app.router, "/students").await;
    assert!(list.as_array().unwrap().is_empty());

    // The hostel assignment outlives the student record.
    let (status, _) = get(&app.router, "/api/hostel-assigned/S1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_filter_students_and_roster() {
    let app = setup_test_app();
    for (id, section, roll) in [("S1", "A", "10"), ("S2", "a", "2"), ("S3", "B", "1")] {
        seed(
            &app.store,
            Collection::Student,
            json!({
                "StudentID": id,
                "CourseID": "BTECH",
                "Branch": "CSE",
                "CurrentSem": 3,
                "Section": section,
                "ClassRollNo": roll
            }),
        )
        .await;
    }

    let (status, all) = get(&app.router, "/api/students?courseId=all&branch=CSE").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, section_a) = get(&app.router, "/api/students?semester=3&section=A").await;
    assert_eq!(section_a.as_array().unwrap().len(), 2);

    let (status, roster) = get(
        &app.router,
        "/api/students/roster?courseId=BTECH&semester=3&section=A",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let roster = roster.as_array().unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0]["StudentID"], "S1");

    let (status, _) = get(&app.router, "/api/students/roster?courseId=BTECH&section=A").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_photo() {
    let app = setup_test_app();

    let request = multipart_request("/upload-photo/S1", "photo", b"\xFF\xD8\xFFfake-jpeg");
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["url"], "http://localhost:3000/uploads/S1.jpg");
    assert!(app.upload_dir.path().join("S1.jpg").exists());
}

#[tokio::test]
async fn test_upload_without_photo_field() {
    let app = setup_test_app();

    let request = multipart_request("/upload-photo/S1", "document", b"data");
    let (status, body) = send(&app.router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No file uploaded.");
}
