use anyhow::anyhow;
use campusgate_core::AppError;
use campusgate_store::{Collection, DocumentStore, KeyValue, QueryEngine};
use tracing::instrument;

use super::model::{LoginResponse, LoginUser, STUDENT_USER_TYPE};

pub struct AuthService;

impl AuthService {
    /// Looks the user up among students. There is no credential check; an
    /// unknown id is the only rejection.
    #[instrument(skip(store))]
    pub async fn login(store: &dyn DocumentStore, user_id: &str) -> Result<LoginResponse, AppError> {
        let student = QueryEngine::query_by_partition(
            store,
            Collection::Student,
            &KeyValue::from(user_id),
        )
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::unauthorized(anyhow!("User not found")))?;

        let id = student
            .get("StudentID")
            .and_then(|v| v.as_str())
            .unwrap_or(user_id)
            .to_string();

        Ok(LoginResponse {
            user: LoginUser {
                user_type: STUDENT_USER_TYPE,
                id,
            },
            student_data: student,
            success: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusgate_store::MemoryStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_login_known_and_unknown_student() {
        let store = MemoryStore::new();
        let doc = json!({"StudentID": "S1", "Name": "Asha"})
            .as_object()
            .cloned()
            .unwrap();
        store.put(Collection::Student, doc, None).await.unwrap();

        let response = AuthService::login(&store, "S1").await.unwrap();
        assert_eq!(response.user.id, "S1");
        assert_eq!(response.student_data["Name"], "Asha");

        let err = AuthService::login(&store, "S2").await.unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
