use actix_web::web::{self, Json};
use actix_web::HttpResponse;
use validator::Validate;

use crate::http::{Error, ResultExt};
use crate::types::form::posts;
use crate::App;

#[tracing::instrument(skip_all)]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse, Error> {
    let posts = app
        .backend
        .posts
        .list_posts()
        .await
        .or_internal("Failed to get posts")?;

    Ok(HttpResponse::Ok().json(posts))
}

#[tracing::instrument(skip_all)]
pub async fn create(app: web::Data<App>, form: Json<posts::Request>) -> Result<HttpResponse, Error> {
    form.validate()?;
    let form = form.into_inner().require()?;

    let post = app
        .backend
        .posts
        .create_post(form.content, form.image_url, form.mood)
        .await
        .or_internal("Failed to create post")?;

    tracing::info!(id = %post.id, mood = %post.mood, "new post");
    Ok(HttpResponse::Created().json(post))
}
