//! Blog CRUD handlers.
//!
//! Every operation requires a valid bearer token; the [`Identity`]
//! extractor rejects the request before the handler body runs otherwise.
//! Mutating operations check, in order: field validation, id
//! well-formedness, existence, ownership. Each check short-circuits the
//! next, so a failed validation never touches persistence and an ownership
//! failure never mutates.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::Blog;
use quill_core::validate::validate_blog_input;
use quill_shared::ApiResponse;
use quill_shared::dto::{BlogResponse, SaveBlogRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// The projection returned to clients: id, title, description, created_at.
fn projection(blog: &Blog) -> BlogResponse {
    BlogResponse {
        id: blog.id,
        title: blog.title.clone(),
        description: blog.description.clone(),
        created_at: blog.created_at,
    }
}

/// Success envelope carrying an empty object.
fn empty_object_ok() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::ok("Operation success", serde_json::json!({})))
}

/// GET /api/blog
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let blogs = state.blogs.list_newest_first().await?;
    let data: Vec<BlogResponse> = blogs.iter().map(projection).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Operation success", data)))
}

/// GET /api/blog/{id}
///
/// A malformed id is NOT a client error here: both "malformed id" and "no
/// such record" collapse to a success envelope carrying an empty object.
/// Update and delete report the same conditions as explicit errors; that
/// asymmetry is intentional.
pub async fn detail(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let Ok(id) = Uuid::parse_str(&path.into_inner()) else {
        return Ok(empty_object_ok());
    };

    match state.blogs.find_by_id(id).await? {
        Some(blog) => {
            Ok(HttpResponse::Ok().json(ApiResponse::ok("Operation success", projection(&blog))))
        }
        None => Ok(empty_object_ok()),
    }
}

/// POST /api/blog
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<SaveBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Absent fields validate the same as empty ones.
    let input = validate_blog_input(
        req.title.as_deref().unwrap_or(""),
        req.description.as_deref().unwrap_or(""),
    )
    .map_err(AppError::Validation)?;

    let blog = Blog::new(identity.user_id, input.title, input.description);
    let saved = state.blogs.insert(blog).await?;

    tracing::debug!(blog_id = %saved.id, owner = %saved.user_id, "Blog created");
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Blog add Success.", projection(&saved))))
}

/// PUT /api/blog/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<SaveBlogRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Field validation runs before the id is even looked at; absent
    // fields validate the same as empty ones.
    let input = validate_blog_input(
        req.title.as_deref().unwrap_or(""),
        req.description.as_deref().unwrap_or(""),
    )
    .map_err(AppError::Validation)?;

    let id = Uuid::parse_str(&path.into_inner()).map_err(|_| AppError::InvalidId)?;

    let found = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not exists with this id".to_string()))?;

    if !found.is_owned_by(identity.user_id) {
        return Err(AppError::Unauthorized(
            "You are not authorized to do this operation.".to_string(),
        ));
    }

    let updated = found.edited(input.title, input.description);
    state.blogs.update(updated.clone()).await?;

    // Respond from the locally constructed value; the row is not re-read.
    tracing::debug!(blog_id = %updated.id, "Blog updated");
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Blog update Success.", projection(&updated))))
}

/// DELETE /api/blog/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner()).map_err(|_| AppError::InvalidId)?;

    let found = state
        .blogs
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Blog not exists with this id".to_string()))?;

    if !found.is_owned_by(identity.user_id) {
        return Err(AppError::Unauthorized(
            "You are not authorized to do this operation.".to_string(),
        ));
    }

    state.blogs.delete(id).await?;

    tracing::debug!(blog_id = %id, "Blog deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::ok_empty("Blog delete Success.")))
}
