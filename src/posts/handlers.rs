use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{extractors::AuthUser, repo::User},
    error::AppError,
    posts::authz::authorize_owner,
    posts::dto::{CreatePostRequest, Pagination, PostResponse, UpdatePostRequest},
    posts::repo::Post,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/:id", get(get_post))
        .route("/users/:username/posts", get(list_user_posts))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
}

#[instrument(skip(state, payload))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreatePostRequest>,
) -> Result<(StatusCode, HeaderMap, Json<PostResponse>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("title required"));
    }
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("content required"));
    }

    let post = Post::create(&state.db, user_id, &payload.title, &payload.content).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = format!("/posts/{}", post.id).parse() {
        headers.insert(axum::http::header::LOCATION, location);
    }

    info!(post_id = %post.id, user_id = %user_id, "post created");
    Ok((StatusCode::CREATED, headers, Json(post.into())))
}

#[instrument(skip(state))]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PostResponse>, AppError> {
    let post = Post::find(&state.db, id)
        .await?
        .ok_or(AppError::NotFound("post"))?;
    Ok(Json(post.into()))
}

#[instrument(skip(state))]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let p = p.clamped();
    let posts = Post::list(&state.db, p.limit, p.offset).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn list_user_posts(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<PostResponse>>, AppError> {
    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or(AppError::NotFound("user"))?;
    let p = p.clamped();
    let posts = Post::list_by_user(&state.db, user.id, p.limit, p.offset).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state, payload))]
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let post = authorize_owner(Post::find(&state.db, id).await?, user_id)?;
    let updated = Post::update(&state.db, post.id, &payload.title, &payload.content).await?;

    info!(post_id = %updated.id, user_id = %user_id, "post updated");
    Ok(Json(updated.into()))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let post = authorize_owner(Post::find(&state.db, id).await?, user_id)?;
    Post::delete(&state.db, post.id).await?;

    info!(post_id = %post.id, user_id = %user_id, "post deleted");
    Ok(StatusCode::NO_CONTENT)
}
