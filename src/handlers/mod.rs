pub mod generation_handler;
pub mod health_handler;
pub mod question_handler;
pub mod session_handler;
pub mod text_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::errors::AppError;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_handler::health_check)
        .service(health_handler::health_check_ready)
        .service(generation_handler::engine_status)
        .service(generation_handler::generate_qcm)
        .service(generation_handler::generate_fitb)
        .service(session_handler::create_session)
        .service(session_handler::get_session)
        .service(session_handler::prepare_session)
        .service(session_handler::advance_session)
        .service(session_handler::regenerate_session)
        .service(session_handler::save_session_item)
        .service(session_handler::set_session_item_type)
        .service(session_handler::reset_session)
        .service(question_handler::list_questions)
        .service(question_handler::get_question)
        .service(question_handler::update_question)
        .service(question_handler::delete_question)
        .service(text_handler::list_texts)
        .service(text_handler::create_text)
        .service(text_handler::get_text)
        .service(text_handler::update_text)
        .service(text_handler::delete_text);
}

/// Malformed JSON bodies get the same error envelope as every other 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        AppError::ValidationError(err.to_string()).into()
    })
}
