use actix_web::web;

pub mod comments;
pub mod posts;
pub mod reactions;
pub mod reports;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts")
            .route(web::get().to(posts::list))
            .route(web::post().to(posts::create)),
    )
    .route("/reactions", web::post().to(reactions::add))
    .route("/comments", web::post().to(comments::add))
    .route("/reports", web::post().to(reports::submit));
}
