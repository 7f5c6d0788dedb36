use campusgate_core::AppError;
use campusgate_core::derived::{sort_newest_first, today};
use campusgate_store::{Collection, Document, DocumentStore, KeyValue, QueryEngine, encode};
use tracing::instrument;

use super::model::{CreateGrievanceDto, Grievance};

pub struct GrievanceService;

impl GrievanceService {
    /// Grievances of a student, most recently submitted first.
    #[instrument(skip(store))]
    pub async fn list(store: &dyn DocumentStore, student_id: &str) -> Result<Vec<Document>, AppError> {
        let mut grievances = QueryEngine::query_by_partition(
            store,
            Collection::Grievances,
            &KeyValue::from(student_id),
        )
        .await?;
        sort_newest_first(&mut grievances, "SubmittedAt");
        Ok(grievances)
    }

    #[instrument(skip(store, dto))]
    pub async fn create(store: &dyn DocumentStore, dto: CreateGrievanceDto) -> Result<Grievance, AppError> {
        let grievance_id = format!("G{}", chrono::Utc::now().timestamp_millis());
        let grievance = Grievance::open(dto, grievance_id, today());

        store
            .put(Collection::Grievances, encode(&grievance)?, None)
            .await?;
        Ok(grievance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusgate_store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_sorted_newest_first() {
        let store = MemoryStore::new();
        let rows = [
            ("G1", "2024-01-10"),
            ("G2", "2024-03-02"),
            ("G3", "2024-02-15"),
        ];
        for (id, submitted) in rows {
            let doc = json!({"StudentID": "S1", "GrievanceID": id, "SubmittedAt": submitted})
                .as_object()
                .cloned()
                .unwrap();
            store.put(Collection::Grievances, doc, None).await.unwrap();
        }

        let grievances = GrievanceService::list(&store, "S1").await.unwrap();
        let ids: Vec<&str> = grievances
            .iter()
            .map(|g| g["GrievanceID"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["G2", "G3", "G1"]);
    }

    #[tokio::test]
    async fn test_create_stamps_id_and_status() {
        let store = MemoryStore::new();
        let dto: CreateGrievanceDto = serde_json::from_value(json!({
            "StudentID": "S1",
            "Title": "Library",
            "Category": "Academics",
            "Priority": "Low",
            "Description": "Reference section closes early"
        }))
        .unwrap();

        let grievance = GrievanceService::create(&store, dto).await.unwrap();
        assert!(grievance.grievance_id.starts_with('G'));
        assert_eq!(grievance.status, "Under Review");
        assert_eq!(GrievanceService::list(&store, "S1").await.unwrap().len(), 1);
    }
}
