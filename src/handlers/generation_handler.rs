use actix_web::{get, post, web, HttpRequest, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::ItemType,
        dto::{request::GenerateRequest, response::ParsedItemDto},
    },
};

#[get("/")]
async fn engine_status(state: web::Data<AppState>) -> HttpResponse {
    let status = state.completion_service.status();
    let message = if status.loaded {
        "Quiz generation API is running, model loaded"
    } else {
        "Quiz generation API is running, model not loaded yet"
    };

    HttpResponse::Ok().json(serde_json::json!({
        "message": message,
        "engine": status,
    }))
}

#[post("/generate_qcm")]
async fn generate_qcm(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    generate(&state, &req, request.into_inner(), ItemType::Mcq).await
}

#[post("/generate_fitb")]
async fn generate_fitb(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    generate(&state, &req, request.into_inner(), ItemType::FillBlank).await
}

async fn generate(
    state: &AppState,
    req: &HttpRequest,
    request: GenerateRequest,
    item_type: ItemType,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(req).unwrap_or_default();
    log::info!(
        "[{}] {} generation requested ({} bytes of context)",
        request_id,
        item_type,
        request.texte.len()
    );

    let generated = state
        .generation_service
        .generate(&request.texte, item_type)
        .await?;

    let response = ParsedItemDto::from(&generated);
    if !response.unparsed_fields.is_empty() {
        log::warn!(
            "[{}] {} item partially parsed, missing: {}",
            request_id,
            item_type,
            response.unparsed_fields.join(", ")
        );
    }

    Ok(HttpResponse::Ok().json(response))
}
