use actix_web::{delete, get, post, put, web, HttpResponse};
use uuid::Uuid;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{CreateSessionRequest, PrepareSessionRequest, SetItemTypeRequest},
};

#[post("/api/sessions")]
async fn create_session(
    state: web::Data<AppState>,
    request: Option<web::Json<CreateSessionRequest>>,
) -> Result<HttpResponse, AppError> {
    let item_type = request
        .and_then(|r| r.into_inner().item_type)
        .unwrap_or_default();
    let session = state.generation_service.create_session(item_type).await;
    Ok(HttpResponse::Created().json(session))
}

#[get("/api/sessions/{id}")]
async fn get_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.generation_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/api/sessions/{id}/prepare")]
async fn prepare_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<PrepareSessionRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    let document = match (request.document, request.text_id) {
        (Some(document), _) => document,
        (None, Some(text_id)) => state.text_service.get_text(&text_id).await?.content,
        (None, None) => {
            return Err(AppError::EmptyInput(
                "either 'document' or 'text_id' is required".to_string(),
            ))
        }
    };

    let session = state.generation_service.prepare(&id, &document).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/api/sessions/{id}/advance")]
async fn advance_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.generation_service.advance(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/api/sessions/{id}/regenerate")]
async fn regenerate_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let session = state.generation_service.regenerate(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}

#[post("/api/sessions/{id}/save")]
async fn save_session_item(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let outcome = state.generation_service.save(&id).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

#[put("/api/sessions/{id}/item-type")]
async fn set_session_item_type(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
    request: web::Json<SetItemTypeRequest>,
) -> Result<HttpResponse, AppError> {
    let session = state
        .generation_service
        .set_item_type(&id, request.item_type)
        .await?;
    Ok(HttpResponse::Ok().json(session))
}

#[delete("/api/sessions/{id}")]
async fn reset_session(
    state: web::Data<AppState>,
    id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    state.generation_service.reset_session(&id).await?;
    Ok(HttpResponse::NoContent().finish())
}
