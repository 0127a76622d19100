//! Ledger entry routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use ledger_db::{CreateLedgerEntryInput, LedgerEntryRepository, UpdateLedgerEntryInput};
use ledger_shared::AppError;

/// Creates the ledger entry routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/ledger", get(list_ledger_entries))
        .route("/api/ledger", post(create_ledger_entry))
        .route("/api/ledger/{id}", get(get_ledger_entry))
        .route("/api/ledger/{id}", put(update_ledger_entry))
        .route("/api/ledger/{id}", delete(delete_ledger_entry))
}

/// Request body for creating a ledger entry.
///
/// Only `ledgerName` is required; everything else falls back to the
/// documented defaults. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLedgerEntryRequest {
    /// Account name (required, non-empty).
    pub ledger_name: Option<String>,
    /// Name used on printed documents; defaults to `ledgerName`.
    pub print_name: Option<String>,
    /// Free-form account classification.
    pub ledger_type: Option<String>,
    /// Address line 1.
    pub address1: Option<String>,
    /// Address line 2.
    pub address2: Option<String>,
    /// Address line 3.
    pub address3: Option<String>,
    /// State / region.
    pub state: Option<String>,
    /// Postal code.
    pub pin_code: Option<String>,
    /// GST registration number.
    pub gst_number: Option<String>,
    /// Contact person.
    pub contact: Option<String>,
    /// Mobile number.
    pub mobile_number: Option<String>,
    /// Landline number.
    pub phone_number: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Opening balance; non-numeric input coerces to 0.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub opening_balance: Option<Decimal>,
    /// Debit ("Dr") or credit ("Cr"); defaults to "Dr".
    pub balance_type: Option<String>,
}

impl CreateLedgerEntryRequest {
    /// Applies the defaulting rules, yielding a fully concrete input.
    ///
    /// Returns `None` when `ledgerName` is missing or empty.
    fn into_input(self) -> Option<CreateLedgerEntryInput> {
        let ledger_name = self.ledger_name.filter(|name| !name.is_empty())?;
        let print_name = self
            .print_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| ledger_name.clone());
        Some(CreateLedgerEntryInput {
            ledger_name,
            print_name,
            ledger_type: self.ledger_type.unwrap_or_default(),
            address1: self.address1.unwrap_or_default(),
            address2: self.address2.unwrap_or_default(),
            address3: self.address3.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            pin_code: self.pin_code.unwrap_or_default(),
            gst_number: self.gst_number.unwrap_or_default(),
            contact: self.contact.unwrap_or_default(),
            mobile_number: self.mobile_number.unwrap_or_default(),
            phone_number: self.phone_number.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            opening_balance: self.opening_balance.unwrap_or_default(),
            balance_type: self
                .balance_type
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| "Dr".to_string()),
        })
    }
}

/// Request body for partially updating a ledger entry.
///
/// Explicit allow-list: `id`, `isActive`, `createdAt` and any unrecognized
/// key are rejected at deserialization rather than silently dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateLedgerEntryRequest {
    /// Account name.
    pub ledger_name: Option<String>,
    /// Name used on printed documents.
    pub print_name: Option<String>,
    /// Free-form account classification.
    pub ledger_type: Option<String>,
    /// Address line 1.
    pub address1: Option<String>,
    /// Address line 2.
    pub address2: Option<String>,
    /// Address line 3.
    pub address3: Option<String>,
    /// State / region.
    pub state: Option<String>,
    /// Postal code.
    pub pin_code: Option<String>,
    /// GST registration number.
    pub gst_number: Option<String>,
    /// Contact person.
    pub contact: Option<String>,
    /// Mobile number.
    pub mobile_number: Option<String>,
    /// Landline number.
    pub phone_number: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Opening balance; non-numeric input coerces to 0.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub opening_balance: Option<Decimal>,
    /// Debit ("Dr") or credit ("Cr").
    pub balance_type: Option<String>,
}

impl From<UpdateLedgerEntryRequest> for UpdateLedgerEntryInput {
    fn from(request: UpdateLedgerEntryRequest) -> Self {
        Self {
            ledger_name: request.ledger_name,
            print_name: request.print_name,
            ledger_type: request.ledger_type,
            address1: request.address1,
            address2: request.address2,
            address3: request.address3,
            state: request.state,
            pin_code: request.pin_code,
            gst_number: request.gst_number,
            contact: request.contact,
            mobile_number: request.mobile_number,
            phone_number: request.phone_number,
            email: request.email,
            opening_balance: request.opening_balance,
            balance_type: request.balance_type,
        }
    }
}

/// Lenient numeric deserializer for `openingBalance`.
///
/// Accepts JSON numbers and numeric strings; anything else coerces to 0,
/// so the persisted value is always a concrete number.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(Some(coerce_decimal(&value)))
}

fn coerce_decimal(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(n) => n.to_string().parse().unwrap_or_default(),
        serde_json::Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

/// Builds the JSON error response for an application error.
fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.message() }))).into_response()
}

/// GET `/api/ledger` - List active ledger entries, newest first.
async fn list_ledger_entries(State(state): State<AppState>) -> impl IntoResponse {
    let repo = LedgerEntryRepository::new(state.db.clone());

    match repo.list_active().await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list ledger entries");
            error_response(&AppError::Database(
                "Failed to retrieve ledger entries".into(),
            ))
        }
    }
}

/// GET `/api/ledger/{id}` - Get a single active ledger entry.
async fn get_ledger_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = LedgerEntryRepository::new(state.db.clone());

    match repo.find_active_by_id(id).await {
        Ok(Some(entry)) => (StatusCode::OK, Json(entry)).into_response(),
        Ok(None) => error_response(&AppError::NotFound("Ledger entry not found".into())),
        Err(e) => {
            error!(error = %e, id, "Failed to get ledger entry");
            error_response(&AppError::Database("Failed to retrieve ledger entry".into()))
        }
    }
}

/// POST `/api/ledger` - Create a ledger entry.
async fn create_ledger_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateLedgerEntryRequest>,
) -> impl IntoResponse {
    let Some(input) = payload.into_input() else {
        return error_response(&AppError::Validation("Ledger name is required".into()));
    };

    let repo = LedgerEntryRepository::new(state.db.clone());

    match repo.create(input).await {
        Ok(entry) => {
            info!(id = entry.id, ledger_name = %entry.ledger_name, "Ledger entry created");
            (
                StatusCode::CREATED,
                Json(json!({
                    "success": true,
                    "id": entry.id,
                    "message": "Ledger entry created successfully"
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create ledger entry");
            error_response(&AppError::Database("Failed to create ledger entry".into()))
        }
    }
}

/// PUT `/api/ledger/{id}` - Partially update an active ledger entry.
async fn update_ledger_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateLedgerEntryRequest>,
) -> impl IntoResponse {
    let repo = LedgerEntryRepository::new(state.db.clone());

    // Best-effort existence check, not a concurrency guard
    match repo.find_active_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(&AppError::NotFound("Ledger entry not found".into())),
        Err(e) => {
            error!(error = %e, id, "Failed to find ledger entry");
            return error_response(&AppError::Database("Failed to update ledger entry".into()));
        }
    }

    let input = UpdateLedgerEntryInput::from(payload);
    if input.is_empty() {
        return error_response(&AppError::Validation("No valid fields to update".into()));
    }

    match repo.update_by_id(id, input).await {
        Ok(rows_affected) => {
            info!(id, rows_affected, "Ledger entry updated");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "rowsAffected": rows_affected,
                    "message": "Ledger entry updated successfully"
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, id, "Failed to update ledger entry");
            error_response(&AppError::Database("Failed to update ledger entry".into()))
        }
    }
}

/// DELETE `/api/ledger/{id}` - Soft-delete an active ledger entry.
async fn delete_ledger_entry(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let repo = LedgerEntryRepository::new(state.db.clone());

    // Best-effort existence check, not a concurrency guard
    match repo.find_active_by_id(id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(&AppError::NotFound("Ledger entry not found".into())),
        Err(e) => {
            error!(error = %e, id, "Failed to find ledger entry");
            return error_response(&AppError::Database("Failed to delete ledger entry".into()));
        }
    }

    match repo.soft_delete_by_id(id).await {
        Ok(rows_affected) => {
            info!(id, rows_affected, "Ledger entry soft-deleted");
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "rowsAffected": rows_affected,
                    "message": "Ledger entry deleted successfully"
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, id, "Failed to delete ledger entry");
            error_response(&AppError::Database("Failed to delete ledger entry".into()))
        }
    }
}
