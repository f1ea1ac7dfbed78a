use actix_web::web::{self, Json};
use actix_web::HttpResponse;

use crate::http::{Error, ResultExt};
use crate::types::form::reports;
use crate::App;

#[tracing::instrument(skip_all, fields(post_id))]
pub async fn submit(app: web::Data<App>, form: Json<reports::Request>) -> Result<HttpResponse, Error> {
    let (post_id, reason) = form.require()?;
    tracing::Span::current().record("post_id", post_id);

    let report = app
        .backend
        .reports
        .submit_report(post_id.to_string(), reason.to_string())
        .await
        .or_internal("Failed to save report")?;

    tracing::info!(report_id = %report.id, "post reported");
    Ok(HttpResponse::Ok().json(reports::Response {
        success: true,
        report_id: report.id,
    }))
}
