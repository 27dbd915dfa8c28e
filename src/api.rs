// 🌐 REST API - axum routes over the shared ledger
//
// The HTTP front-end is just another presentation collaborator: every
// handler is a thin call into SharedLedger.

use crate::contacts::Contact;
use crate::error::{Field, LedgerError};
use crate::ledger::{today, Sale, SaleInput};
use crate::money::Money;
use crate::report::Report;
use crate::session::SharedLedger;
use crate::tickets::TicketType;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// API Response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PriceEntry {
    pub ticket_type: TicketType,
    pub unit_price: Money,
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        let status = match self {
            LedgerError::InvalidInput { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            LedgerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(ApiResponse::<()>::error(self.to_string()))).into_response()
    }
}

// ============================================================================
// Sale body
// ============================================================================

fn text_field(body: &Map<String, Value>, key: &str, field: Field) -> Result<String, LedgerError> {
    match body.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        None | Some(Value::Null) => Err(LedgerError::invalid(field, format!("{} is required", key))),
        Some(other) => Err(LedgerError::invalid(field, format!("{} must be text, got {}", key, other))),
    }
}

/// Field-by-field read of a POST /api/sales body, so a bad value is
/// reported against the field it belongs to
fn sale_input_from_json(body: Value) -> Result<SaleInput, LedgerError> {
    let body = match body {
        Value::Object(map) => map,
        other => {
            return Err(LedgerError::invalid(
                Field::Body,
                format!("expected a JSON object, got {}", other),
            ))
        }
    };

    let quantity = match body.get("quantity") {
        None | Some(Value::Null) => 1,
        Some(value) => value.as_i64().ok_or_else(|| {
            LedgerError::invalid(
                Field::Quantity,
                format!("quantity must be a positive integer, got {}", value),
            )
        })?,
    };

    let date = match body.get("date") {
        None | Some(Value::Null) => today(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(LedgerError::invalid(
                Field::Body,
                format!("date must be text, got {}", other),
            ))
        }
    };

    Ok(SaleInput {
        customer_name: text_field(&body, "customer_name", Field::CustomerName)?,
        phone: text_field(&body, "phone", Field::Phone)?,
        ticket_type: text_field(&body, "ticket_type", Field::TicketType)?,
        quantity,
        seller: text_field(&body, "seller", Field::Seller)?,
        date,
    })
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/contacts?q= - Search contacts by name
async fn search_contacts(
    State(ledger): State<SharedLedger>,
    Query(query): Query<ContactQuery>,
) -> Json<ApiResponse<Vec<Contact>>> {
    Json(ApiResponse::ok(ledger.search_contacts(&query.q)))
}

/// POST /api/contacts - Add a contact without a sale
async fn append_contact(
    State(ledger): State<SharedLedger>,
    Json(body): Json<NewContact>,
) -> impl IntoResponse {
    let contact = ledger.append_contact(body.name, body.phone);
    (StatusCode::CREATED, Json(ApiResponse::ok(contact)))
}

/// GET /api/sales - Every sale in recording order
async fn list_sales(State(ledger): State<SharedLedger>) -> Json<ApiResponse<Vec<Sale>>> {
    Json(ApiResponse::ok(ledger.sales()))
}

/// POST /api/sales - Record a sale
async fn record_sale(
    State(ledger): State<SharedLedger>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, LedgerError> {
    let Json(body) = body.map_err(|rejection| LedgerError::invalid(Field::Body, rejection.body_text()))?;
    let input = sale_input_from_json(body)?;
    let sale = ledger.record(input)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(sale))))
}

/// GET /api/report - Aggregate report
async fn get_report(State(ledger): State<SharedLedger>) -> Json<ApiResponse<Report>> {
    Json(ApiResponse::ok(ledger.report()))
}

/// GET /api/sellers - Seller roster
async fn list_sellers(State(ledger): State<SharedLedger>) -> Json<ApiResponse<Vec<String>>> {
    Json(ApiResponse::ok(ledger.sellers()))
}

/// GET /api/prices - Unit price per ticket type
async fn list_prices(State(ledger): State<SharedLedger>) -> Json<ApiResponse<Vec<PriceEntry>>> {
    let prices = ledger
        .prices()
        .iter()
        .map(|(ticket_type, unit_price)| PriceEntry {
            ticket_type,
            unit_price,
        })
        .collect();

    Json(ApiResponse::ok(prices))
}

/// All routes, nested under /api
pub fn router(ledger: SharedLedger) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/contacts", get(search_contacts).post(append_contact))
        .route("/sales", get(list_sales).post(record_sale))
        .route("/report", get(get_report))
        .route("/sellers", get(list_sellers))
        .route("/prices", get(list_prices))
        .with_state(ledger);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        router(SharedLedger::from_config(Config::default()).unwrap())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get_req("/api/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");
    }

    #[tokio::test]
    async fn test_record_sale_then_report() {
        let app = app();
        let (status, body) = send(
            &app,
            post_json(
                "/api/sales",
                json!({
                    "customer_name": "João",
                    "phone": "34988885555",
                    "ticket_type": "Casal",
                    "seller": "Pedro",
                    "date": "19/10/2026"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["customer_phone"], "(34) 98888-5555");
        assert_eq!(body["data"]["total"], "120.00");

        let (_, report) = send(&app, get_req("/api/report")).await;
        assert_eq!(report["data"]["sale_count"], 1);
        assert_eq!(report["data"]["total_revenue"], "120.00");
        assert_eq!(report["data"]["revenue_by_seller"][0]["seller"], "Pedro");
        assert_eq!(report["data"]["recent_sales"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_sale_is_unprocessable() {
        let app = app();
        let (status, body) = send(
            &app,
            post_json(
                "/api/sales",
                json!({
                    "customer_name": "João",
                    "phone": "123456789",
                    "ticket_type": "Casal",
                    "seller": "Pedro"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("phone"));

        let (_, sales) = send(&app, get_req("/api/sales")).await;
        assert!(sales["data"].as_array().unwrap().is_empty());
    }

    async fn post_sale(app: &Router, body: Value) -> (StatusCode, Value) {
        send(app, post_json("/api/sales", body)).await
    }

    #[tokio::test]
    async fn test_non_integer_quantity_is_invalid_input() {
        let app = app();

        for quantity in [json!(1.5), json!("2"), json!(true)] {
            let (status, body) = post_sale(
                &app,
                json!({
                    "customer_name": "João",
                    "phone": "34988885555",
                    "ticket_type": "Casal",
                    "quantity": quantity,
                    "seller": "Pedro"
                }),
            )
            .await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert_eq!(body["success"], false);
            assert!(body["error"].as_str().unwrap().starts_with("Invalid quantity"));
        }

        let (_, report) = send(&app, get_req("/api/report")).await;
        assert_eq!(report["data"]["sale_count"], 0);
    }

    #[tokio::test]
    async fn test_missing_field_is_invalid_input() {
        let app = app();
        let (status, body) = post_sale(
            &app,
            json!({
                "customer_name": "João",
                "phone": "34988885555",
                "seller": "Pedro"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid ticket_type: ticket_type is required");

        let (_, contacts) = send(&app, get_req("/api/contacts")).await;
        assert_eq!(contacts["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_body_gets_error_envelope() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/sales")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid body"));

        let (status, body) = post_sale(&app, json!(["Casal"])).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid body"));
    }

    #[tokio::test]
    async fn test_ticket_type_must_match_exactly() {
        let app = app();

        for ticket_type in ["casal", " Casal ", "CASAL"] {
            let (status, body) = post_sale(
                &app,
                json!({
                    "customer_name": "João",
                    "phone": "34988885555",
                    "ticket_type": ticket_type,
                    "seller": "Pedro"
                }),
            )
            .await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
            assert!(body["error"].as_str().unwrap().starts_with("Invalid ticket_type"));
        }
    }

    #[tokio::test]
    async fn test_search_contacts() {
        let app = app();
        let (status, body) = send(&app, get_req("/api/contacts?q=an")).await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Ana", "Mariana"]);

        let (_, all) = send(&app, get_req("/api/contacts")).await;
        assert_eq!(all["data"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_append_contact() {
        let app = app();
        let (status, body) = send(
            &app,
            post_json("/api/contacts", json!({"name": "Bia", "phone": "(34) 91234-5678"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["data"]["name"], "Bia");

        let (_, found) = send(&app, get_req("/api/contacts?q=bia")).await;
        assert_eq!(found["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sellers_and_prices() {
        let app = app();

        let (_, sellers) = send(&app, get_req("/api/sellers")).await;
        assert_eq!(sellers["data"], json!(["Ana", "Pedro", "Mariana"]));

        let (_, prices) = send(&app, get_req("/api/prices")).await;
        assert_eq!(prices["data"][0]["ticket_type"], "Casal");
        assert_eq!(prices["data"][0]["unit_price"], "120.00");
        assert_eq!(prices["data"][3]["unit_price"], "30.00");
    }
}
