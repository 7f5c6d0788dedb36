use crate::modules::hostel::model::{
    CreateHostelComplaintDto, FeePayment, HostelComplaint, HostelComplaintCreated, HostelView,
    PayFeeRequest,
};
use crate::modules::hostel::service::HostelService;
use crate::state::AppState;
use crate::validator::ValidatedJson;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use campusgate_core::{AppError, ErrorResponse};
use campusgate_models::SuccessResponse;
use campusgate_store::Document;
use tracing::{info, instrument};

#[utoipa::path(
    get,
    path = "/api/hostel-assigned/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Assignment merged with hostel details", body = HostelView),
        (status = 404, description = "Student has no hostel assignment", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Hostel"
)]
#[instrument(skip(state))]
pub async fn get_hostel_view(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<HostelView>, AppError> {
    let view = HostelService::compose_hostel_view(state.store.as_ref(), &student_id).await?;
    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/api/hostel-fee/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Hostel fee ledger", body = Object),
        (status = 404, description = "No fee record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Hostel"
)]
#[instrument(skip(state))]
pub async fn get_hostel_fee(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Document>, AppError> {
    let ledger = HostelService::get_fee_ledger(state.store.as_ref(), &student_id).await?;
    Ok(Json(ledger))
}

#[utoipa::path(
    post,
    path = "/api/hostel-fee/pay",
    request_body = PayFeeRequest,
    responses(
        (status = 200, description = "Fee line is paid", body = SuccessResponse),
        (status = 400, description = "Missing studentId or item", body = ErrorResponse),
        (status = 404, description = "No ledger or no such item", body = ErrorResponse),
        (status = 409, description = "Ledger kept changing, retry", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Hostel"
)]
#[instrument(skip(state))]
pub async fn pay_hostel_fee(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<PayFeeRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    let outcome = HostelService::mark_fee_item_paid(
        state.store.as_ref(),
        &dto.student_id,
        &dto.item,
        state.cas_max_attempts,
    )
    .await?;

    if outcome == FeePayment::AlreadyPaid {
        info!(item = %dto.item, "fee line was already paid");
    }
    Ok(Json(SuccessResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/api/hostel-complaint/{student_id}",
    params(("student_id" = String, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Complaints raised by the student", body = Vec<HostelComplaint>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Hostel"
)]
#[instrument(skip(state))]
pub async fn get_hostel_complaints(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<Document>>, AppError> {
    let complaints = HostelService::get_complaints(state.store.as_ref(), &student_id).await?;
    Ok(Json(complaints))
}

#[utoipa::path(
    post,
    path = "/api/hostel-complaint",
    request_body = CreateHostelComplaintDto,
    responses(
        (status = 201, description = "Complaint recorded", body = HostelComplaintCreated),
        (status = 400, description = "Missing required field", body = ErrorResponse),
        (status = 409, description = "Complaint ID already used", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Hostel"
)]
#[instrument(skip(state, dto))]
pub async fn create_hostel_complaint(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateHostelComplaintDto>,
) -> Result<(StatusCode, Json<HostelComplaintCreated>), AppError> {
    let complaint = HostelService::create_complaint(state.store.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(HostelComplaintCreated {
            success: true,
            complaint,
        }),
    ))
}
