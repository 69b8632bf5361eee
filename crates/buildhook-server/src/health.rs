use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::server::AppContext;

pub(crate) async fn health_check_route(ctx: web::Data<AppContext>) -> impl Responder {
    let controller_status = ctx
        .controller_service
        .health_check(&ctx.dispatch_target.address)
        .await
        .is_ok();

    let status_code = if controller_status {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    HttpResponse::build(status_code).json(serde_json::json!({
        "controller": controller_status,
    }))
}
