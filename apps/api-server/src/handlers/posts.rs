//! Post handlers - thin dispatch onto the post repository.

use actix_web::{HttpResponse, web};

use masterblog_core::domain::Fields;
use masterblog_core::query::ListParams;
use masterblog_shared::MessageResponse;
use masterblog_shared::dto::ListQuery;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts?sort=&direction=&page=&per_page=
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let params = ListParams::parse(
        query.sort.as_deref(),
        query.direction.as_deref(),
        query.page,
        query.per_page,
    )?;

    let posts = state.posts.list(&params).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<Fields>,
) -> AppResult<HttpResponse> {
    let post = state.posts.add(&body).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts/{id}
pub async fn get(state: web::Data<AppState>, path: web::Path<u64>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<Fields>,
) -> AppResult<HttpResponse> {
    let post = state.posts.update(path.into_inner(), &body).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete(state: web::Data<AppState>, path: web::Path<u64>) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.posts.delete(id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new(format!(
        "Post with id <{}> deleted.",
        id
    ))))
}

/// POST /api/posts/{id} - attach a comment, category or tag
pub async fn attach(
    state: web::Data<AppState>,
    path: web::Path<u64>,
    body: web::Json<Fields>,
) -> AppResult<HttpResponse> {
    let post = state.posts.attach(path.into_inner(), &body).await?;
    Ok(HttpResponse::Created().json(post))
}

/// GET /api/posts/search?<field>=<substring>...
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<Vec<(String, String)>>,
) -> AppResult<HttpResponse> {
    let posts = state.posts.search(&query).await?;
    Ok(HttpResponse::Ok().json(posts))
}
