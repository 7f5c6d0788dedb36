//! Exam schedule, admit cards and semester results.

use campusgate_core::AppError;
use campusgate_store::{
    Collection, Document, DocumentStore, Key, KeyValue, QueryEngine, UpdateSet,
};
use tracing::instrument;

use super::model::ResultsView;

pub struct ExamService;

impl ExamService {
    /// Exams of one semester. The schedule's sort key is
    /// `<semester>#<examDateTime>`, so results come back in date order.
    #[instrument(skip(store))]
    pub async fn get_upcoming(
        store: &dyn DocumentStore,
        course_id: &str,
        semester: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition_and_sort_prefix(
            store,
            Collection::ExamSchedule,
            &KeyValue::from(course_id),
            semester,
        )
        .await?)
    }

    #[instrument(skip(store))]
    pub async fn get_admit_cards(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition(
            store,
            Collection::AdmitCards,
            &KeyValue::from(student_id),
        )
        .await?)
    }

    /// Flags an admit card as downloaded.
    #[instrument(skip(store))]
    pub async fn mark_admit_card_downloaded(
        store: &dyn DocumentStore,
        student_id: &str,
        semester: i64,
    ) -> Result<(), AppError> {
        let key = Key::partition(student_id).with_sort(semester);
        let update = UpdateSet::new().set("Downloaded", true);
        store
            .update(Collection::AdmitCards, &key, &update, None)
            .await?;
        Ok(())
    }

    /// Subject results for a semester alongside the semester summary. The
    /// two reads are independent and neither is checked against the other.
    #[instrument(skip(store))]
    pub async fn compose_results_view(
        store: &dyn DocumentStore,
        student_id: &str,
        semester: i64,
    ) -> Result<ResultsView, AppError> {
        let partition = KeyValue::from(student_id);
        let prefix = semester.to_string();
        let summary_key = Key::partition(student_id).with_sort(semester);

        let (subjects, summary) = tokio::try_join!(
            QueryEngine::query_by_partition_and_sort_prefix(
                store,
                Collection::Results,
                &partition,
                &prefix,
            ),
            QueryEngine::get_by_key(store, Collection::SemesterSummary, &summary_key),
        )?;

        Ok(ResultsView { subjects, summary })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusgate_store::MemoryStore;
    use serde_json::{Value, json};

    async fn seed(store: &MemoryStore, collection: Collection, rows: Value) {
        let docs = rows
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row.as_object().cloned().unwrap())
            .collect();
        store.batch_put(collection, docs).await.unwrap();
    }

    #[tokio::test]
    async fn test_upcoming_does_not_leak_semester_ten() {
        let store = MemoryStore::new();
        seed(
            &store,
            Collection::ExamSchedule,
            json!([
                {"CourseID": "BTECH", "Semester#ExamDateTime": "1#2024-05-02T10:00"},
                {"CourseID": "BTECH", "Semester#ExamDateTime": "10#2024-05-01T10:00"},
                {"CourseID": "BTECH", "Semester#ExamDateTime": "1#2024-05-04T10:00"}
            ]),
        )
        .await;

        let exams = ExamService::get_upcoming(&store, "BTECH", "1").await.unwrap();
        let keys: Vec<&str> = exams
            .iter()
            .map(|e| e["Semester#ExamDateTime"].as_str().unwrap())
            .collect();
        assert_eq!(keys, vec!["1#2024-05-02T10:00", "1#2024-05-04T10:00"]);
    }

    #[tokio::test]
    async fn test_empty_results_view() {
        let store = MemoryStore::new();
        let view = ExamService::compose_results_view(&store, "S1", 3).await.unwrap();
        assert_eq!(
            serde_json::to_value(view).unwrap(),
            json!({"subjects": [], "summary": null})
        );
    }

    #[tokio::test]
    async fn test_results_view_with_summary() {
        let store = MemoryStore::new();
        seed(
            &store,
            Collection::Results,
            json!([
                {"StudentID": "S1", "Semester#SubjectCode": "3#CS301", "Grade": "A"},
                {"StudentID": "S1", "Semester#SubjectCode": "3#CS302", "Grade": "B"},
                {"StudentID": "S1", "Semester#SubjectCode": "4#CS401", "Grade": "A"}
            ]),
        )
        .await;
        seed(
            &store,
            Collection::SemesterSummary,
            json!([{"StudentID": "S1", "Semester": 3, "SGPA": 8.4}]),
        )
        .await;

        let view = ExamService::compose_results_view(&store, "S1", 3).await.unwrap();
        assert_eq!(view.subjects.len(), 2);
        assert_eq!(view.summary.unwrap()["SGPA"], json!(8.4));
    }

    #[tokio::test]
    async fn test_downloaded_flag_set() {
        let store = MemoryStore::new();
        seed(
            &store,
            Collection::AdmitCards,
            json!([{"StudentID": "S1", "Semester": 2, "Hall": "B-12"}]),
        )
        .await;

        ExamService::mark_admit_card_downloaded(&store, "S1", 2)
            .await
            .unwrap();
        let cards = ExamService::get_admit_cards(&store, "S1").await.unwrap();
        assert_eq!(cards[0]["Downloaded"], json!(true));
        assert_eq!(cards[0]["Hall"], "B-12");
    }
}
