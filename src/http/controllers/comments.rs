use actix_web::web::{self, Json};
use actix_web::HttpResponse;
use validator::Validate;

use crate::http::{Error, ResultExt};
use crate::types::{self, form::comments};
use crate::App;

#[tracing::instrument(skip_all, fields(post_id))]
pub async fn add(app: web::Data<App>, form: Json<comments::Request>) -> Result<HttpResponse, Error> {
    let (post_id, content) = form.require()?;
    form.validate()?;
    tracing::Span::current().record("post_id", post_id);

    if app.moderation.is_banned(content) {
        tracing::info!("comment rejected by the banned-word filter");
        return Err(Error::from_type(types::Error::Moderated));
    }

    let post = app
        .backend
        .posts
        .add_comment(post_id, content.to_string())
        .await
        .or_internal("Failed to add comment")?
        .ok_or_else(|| Error::from_type(types::Error::NotFound))?;

    Ok(HttpResponse::Ok().json(post))
}
