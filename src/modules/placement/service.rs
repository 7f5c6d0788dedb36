use anyhow::anyhow;
use campusgate_core::AppError;
use campusgate_core::derived::today;
use campusgate_observability::track_placement_application;
use campusgate_store::{
    Collection, Condition, Document, DocumentStore, Key, KeyValue, QueryEngine, encode,
};
use tracing::{info, instrument};

use super::model::{ApplyRequest, PlacementApplication};

pub struct PlacementService;

impl PlacementService {
    /// Placement statistics of a course; empty when none are published.
    #[instrument(skip(store))]
    pub async fn get_stats(store: &dyn DocumentStore, course_id: &str) -> Result<Document, AppError> {
        Ok(QueryEngine::get_by_key(store, Collection::PlacementStats, &Key::partition(course_id))
            .await?
            .unwrap_or_default())
    }

    #[instrument(skip(store))]
    pub async fn get_drives(
        store: &dyn DocumentStore,
        course_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition(
            store,
            Collection::PlacementDrives,
            &KeyValue::from(course_id),
        )
        .await?)
    }

    #[instrument(skip(store))]
    pub async fn get_profile(store: &dyn DocumentStore, student_id: &str) -> Result<Document, AppError> {
        QueryEngine::get_by_key(
            store,
            Collection::StudentPlacementProfile,
            &Key::partition(student_id),
        )
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Placement profile not found")))
    }

    /// Records an application once per (student, company). A repeat is
    /// rejected with a conflict and leaves the first application untouched.
    #[instrument(skip(store))]
    pub async fn apply(
        store: &dyn DocumentStore,
        request: ApplyRequest,
    ) -> Result<PlacementApplication, AppError> {
        let application = PlacementApplication::submitted(request, today());

        let result = store
            .put(
                Collection::PlacementApplications,
                encode(&application)?,
                Some(&Condition::ItemNotExists),
            )
            .await;

        match result {
            Ok(()) => {
                info!(company_id = %application.company_id, "placement application recorded");
                track_placement_application("applied");
                Ok(application)
            }
            Err(err) if err.is_condition_failed() => {
                track_placement_application("duplicate");
                Err(AppError::conflict(anyhow!("Already applied to this company")))
            }
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(store))]
    pub async fn get_applications(
        store: &dyn DocumentStore,
        student_id: &str,
    ) -> Result<Vec<Document>, AppError> {
        Ok(QueryEngine::query_by_partition(
            store,
            Collection::PlacementApplications,
            &KeyValue::from(student_id),
        )
        .await?)
    }
}
