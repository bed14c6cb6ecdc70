use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{CreateTextRequest, PaginationParams, UpdateTextRequest},
};

#[get("/api/texts")]
async fn list_texts(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let page = state.text_service.list_texts(&query).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[post("/api/texts")]
async fn create_text(
    state: web::Data<AppState>,
    request: web::Json<CreateTextRequest>,
) -> Result<HttpResponse, AppError> {
    let text = state.text_service.create_text(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(text))
}

#[get("/api/texts/{id}")]
async fn get_text(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let text = state.text_service.get_text(&id).await?;
    Ok(HttpResponse::Ok().json(text))
}

#[put("/api/texts/{id}")]
async fn update_text(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateTextRequest>,
) -> Result<HttpResponse, AppError> {
    let text = state
        .text_service
        .update_text(&id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(text))
}

#[delete("/api/texts/{id}")]
async fn delete_text(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let response = state.text_service.delete_text(&id).await?;
    Ok(HttpResponse::Ok().json(response))
}
