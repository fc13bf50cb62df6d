use axum::response::{IntoResponse, Json};

use crate::models::client::CLIENT_STATUSES;

// Brazilian tax-regime vocabulary; regime names are proper nouns and stay
// untranslated.
pub const TAX_REGIMES: [&str; 4] = [
    "Simples Nacional",
    "Lucro Presumido",
    "Lucro Real",
    "Imune",
];

pub const LEGAL_NATURES: [&str; 5] = ["MEI", "LTDA", "SA", "EIRELI", "Other"];

pub const COMPANY_SIZES: [&str; 5] = ["MEI", "Micro", "Small", "Medium", "Large"];

#[utoipa::path(
    get,
    path = "/api/options/tax-regimes",
    responses((status = 200, description = "Supported tax regimes"))
)]
#[axum::debug_handler]
pub async fn list_tax_regimes() -> impl IntoResponse {
    Json(TAX_REGIMES)
}

#[utoipa::path(
    get,
    path = "/api/options/legal-natures",
    responses((status = 200, description = "Supported legal natures"))
)]
#[axum::debug_handler]
pub async fn list_legal_natures() -> impl IntoResponse {
    Json(LEGAL_NATURES)
}

#[utoipa::path(
    get,
    path = "/api/options/company-sizes",
    responses((status = 200, description = "Supported company sizes"))
)]
#[axum::debug_handler]
pub async fn list_company_sizes() -> impl IntoResponse {
    Json(COMPANY_SIZES)
}

#[utoipa::path(
    get,
    path = "/api/options/statuses",
    responses((status = 200, description = "Supported client statuses"))
)]
#[axum::debug_handler]
pub async fn list_statuses() -> impl IntoResponse {
    Json(CLIENT_STATUSES)
}
