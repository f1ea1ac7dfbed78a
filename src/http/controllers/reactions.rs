use actix_web::web::{self, Json};
use actix_web::HttpResponse;

use crate::http::{Error, ResultExt};
use crate::types::{self, form::reactions};
use crate::App;

#[tracing::instrument(skip_all, fields(post_id, kind))]
pub async fn add(app: web::Data<App>, form: Json<reactions::Request>) -> Result<HttpResponse, Error> {
    let (post_id, kind) = form.require()?;

    let span = tracing::Span::current();
    span.record("post_id", post_id);
    span.record("kind", kind.as_str());

    let post = app
        .backend
        .posts
        .add_reaction(post_id, kind)
        .await
        .or_internal("Failed to add reaction")?
        .ok_or_else(|| Error::from_type(types::Error::NotFound))?;

    Ok(HttpResponse::Ok().json(post))
}
