//! Change hook handlers.

use actix_web::{web, HttpResponse};
use buildhook_core::use_cases::changes::{dispatch_changes, extract_changes};
use buildhook_models::{types::GhPushEvent, ChangeRecord};
use tracing::{error, info};

use crate::{
    metrics::{CHANGES_DISPATCHED, CHANGES_EXTRACTED, CHANGE_HOOKS_RECEIVED, DISPATCH_FAILURES},
    server::AppContext,
    utils::{convert_payload_to_bytes, extract_form_field},
    Result, ServerError,
};

pub(crate) fn parse_push_event(body: &[u8], field: &str) -> Result<GhPushEvent> {
    let payload = extract_form_field(body, field)?;
    serde_json::from_str(&payload).map_err(|e| ServerError::EventParseError { source: e })
}

async fn read_changes(payload: &mut web::Payload, field: &str) -> Result<Vec<ChangeRecord>> {
    let body = convert_payload_to_bytes(payload).await?;
    let event = parse_push_event(&body, field)?;

    Ok(extract_changes(&event)?)
}

/// Submit changes in the background, one connection per call.
fn spawn_dispatch(ctx: web::Data<AppContext>, changes: Vec<ChangeRecord>) {
    tokio::spawn(async move {
        match dispatch_changes(
            ctx.controller_service.as_ref(),
            &ctx.dispatch_target,
            &changes,
        )
        .await
        {
            Ok(count) => CHANGES_DISPATCHED.inc_by(count as u64),
            Err(_) => DISPATCH_FAILURES.inc(),
        }
    });
}

/// Always answers an empty 200: errors are logged, dispatch is not awaited.
#[tracing::instrument(skip_all)]
pub(crate) async fn github_change_hook(
    mut payload: web::Payload,
    ctx: web::Data<AppContext>,
) -> HttpResponse {
    CHANGE_HOOKS_RECEIVED.inc();

    match read_changes(&mut payload, &ctx.config.server.payload_field).await {
        Ok(changes) => {
            info!(count = changes.len(), message = "Received changes");
            CHANGES_EXTRACTED.inc_by(changes.len() as u64);
            spawn_dispatch(ctx, changes);
        }
        Err(e) => {
            error!(error = %e, message = "Could not process change hook");
        }
    }

    HttpResponse::Ok().finish()
}

/// Configure change hook handlers.
pub fn configure_webhook_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource(["/github", "/github/"]).route(web::post().to(github_change_hook)));
}
