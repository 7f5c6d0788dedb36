//! Demo data seeding.
//!
//! Generates hostels, students, room assignments, room counters and hostel
//! fee ledgers, then writes them through [`DocumentStore::batch_put`].
//! Generation runs on Rayon; room numbers are dense per hostel and the
//! counter documents are written with the highest room handed out so later
//! allocations continue from there.

pub mod models;

pub use models::{SeedConfig, SeedReport};

use campusgate_store::{Collection, Document, DocumentStore, StoreResult};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::faker::phone_number::en::CellNumber;
use rayon::prelude::*;
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{info, warn};

const HOSTEL_NAMES: [&str; 6] = ["Ganga", "Yamuna", "Kaveri", "Narmada", "Godavari", "Krishna"];

pub fn hostel_id(index: usize) -> String {
    format!("H{:03}", index + 1)
}

pub fn student_id(index: usize) -> String {
    format!("S{:05}", index + 1)
}

fn object(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        _ => Document::new(),
    }
}

pub fn generate_hostels(count: usize) -> Vec<Document> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let name = HOSTEL_NAMES
                .get(i)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("Block {}", i + 1));
            let warden: String = Name().fake();
            let phone: String = CellNumber().fake();
            object(json!({
                "HostelID": hostel_id(i),
                "HostelName": name,
                "MonthlyFee": "4500",
                "WardenName": warden,
                "WardenPhone": phone,
                "Floor": "1",
                "RoomType": "Double",
                "Capacity": 200,
            }))
        })
        .collect()
}

fn pick(values: &[String], index: usize) -> &str {
    values
        .get(index % values.len().max(1))
        .map(String::as_str)
        .unwrap_or_default()
}

pub fn generate_students(config: &SeedConfig) -> Vec<Document> {
    (0..config.students)
        .into_par_iter()
        .map(|i| {
            let name: String = Name().fake();
            let email: String = SafeEmail().fake();
            let phone: String = CellNumber().fake();
            let branch = pick(&config.branches, i);
            let section = pick(&config.sections, i / 2);
            let semester = (i as u32 % config.semesters.max(1)) + 1;
            object(json!({
                "StudentID": student_id(i),
                "Name": name,
                "Email": email,
                "PhoneNo": phone,
                "CourseID": config.course_id,
                "Branch": branch,
                "CurrentSem": semester,
                "Section": section,
                "ClassRollNo": (i + 1).to_string(),
            }))
        })
        .collect()
}

/// Round-robins students over hostels. Returns the assignment documents and
/// the last room number handed out per hostel.
pub fn generate_assignments(students: &[Document], hostels: usize) -> (Vec<Document>, Vec<i64>) {
    let hostels = hostels.max(1);
    let mut last_room = vec![0i64; hostels];

    let assignments = students
        .iter()
        .enumerate()
        .map(|(i, student)| {
            let slot = i % hostels;
            last_room[slot] += 1;
            object(json!({
                "StudentID": student.get("StudentID").cloned().unwrap_or(Value::Null),
                "HostelID": hostel_id(slot),
                "RoomNo": last_room[slot].to_string(),
                "StudentPhoneNo": student.get("PhoneNo").cloned().unwrap_or(Value::Null),
                "CheckInDate": "2024-07-15",
            }))
        })
        .collect();

    (assignments, last_room)
}

pub fn generate_counters(last_room: &[i64]) -> Vec<Document> {
    last_room
        .iter()
        .enumerate()
        .map(|(i, last)| {
            object(json!({
                "HostelID": hostel_id(i),
                "LastRoomNo": last,
                "Version": 1,
            }))
        })
        .collect()
}

pub fn generate_fee_ledgers(students: &[Document]) -> Vec<Document> {
    students
        .par_iter()
        .filter_map(|student| student.get("StudentID").cloned())
        .map(|id| {
            object(json!({
                "StudentID": id,
                "Fees": [
                    {"Item": "Room Rent", "Status": "Unpaid", "Amount": 27000},
                    {"Item": "Mess", "Status": "Unpaid", "Amount": 18000},
                    {"Item": "Security Deposit", "Status": "Paid", "Amount": 5000},
                ],
                "Version": 0,
            }))
        })
        .collect()
}

async fn write(
    store: &dyn DocumentStore,
    collection: Collection,
    documents: Vec<Document>,
) -> StoreResult<(usize, usize)> {
    let outcome = store.batch_put(collection, documents).await?;
    if !outcome.is_complete() {
        warn!(
            collection = %collection,
            unprocessed = outcome.unprocessed.len(),
            "Some documents were not written"
        );
    }
    Ok((outcome.written, outcome.unprocessed.len()))
}

pub async fn seed_all(store: &dyn DocumentStore, config: &SeedConfig) -> StoreResult<SeedReport> {
    let start = Instant::now();
    info!(
        students = config.students,
        hostels = config.hostels,
        course = %config.course_id,
        "Seeding demo data"
    );

    let hostels = generate_hostels(config.hostels);
    let students = generate_students(config);
    let (assignments, last_room) = generate_assignments(&students, config.hostels);
    let counters = generate_counters(&last_room);
    let ledgers = generate_fee_ledgers(&students);

    let mut report = SeedReport::default();
    let mut record = |written: (usize, usize)| {
        report.unprocessed += written.1;
        written.0
    };

    let hostels_written = record(write(store, Collection::Hostel, hostels).await?);
    let students_written = record(write(store, Collection::Student, students).await?);
    let assigned = record(write(store, Collection::HostelAssigned, assignments).await?);
    record(write(store, Collection::HostelRoomCounter, counters).await?);
    let ledgers_written = record(write(store, Collection::HostelFee, ledgers).await?);

    report.hostels = hostels_written;
    report.students = students_written;
    report.assignments = assigned;
    report.fee_ledgers = ledgers_written;

    info!(elapsed = ?start.elapsed(), ?report, "Seeding complete");
    Ok(report)
}
