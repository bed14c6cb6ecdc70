use actix_web::{delete, get, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::ItemType,
        dto::request::{PaginationParams, UpdateQuestionRequest},
    },
};

fn parse_item_type(segment: &str) -> Result<ItemType, AppError> {
    ItemType::from_path_segment(segment)
        .ok_or_else(|| AppError::ValidationError(format!("unknown item type '{}'", segment)))
}

#[get("/api/questions/{item_type}")]
async fn list_questions(
    state: web::Data<AppState>,
    item_type: web::Path<String>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let item_type = parse_item_type(&item_type)?;
    let page = state
        .question_service
        .list_questions(item_type, &query)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

#[get("/api/questions/{item_type}/{id}")]
async fn get_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (item_type, id) = path.into_inner();
    let question = state
        .question_service
        .get_question(parse_item_type(&item_type)?, &id)
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[put("/api/questions/{item_type}/{id}")]
async fn update_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    request: web::Json<UpdateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    let (item_type, id) = path.into_inner();
    let question = state
        .question_service
        .update_question(parse_item_type(&item_type)?, &id, request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(question))
}

#[delete("/api/questions/{item_type}/{id}")]
async fn delete_question(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (item_type, id) = path.into_inner();
    let response = state
        .question_service
        .delete_question(parse_item_type(&item_type)?, &id)
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
