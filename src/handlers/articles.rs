// src/handlers/articles.rs

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        extract::{ValidatedJson, ValidatedPath, ValidatedQuery},
    },
    config::AppState,
    models::article::{Article, ArticleListQuery, CreateArticlePayload, UpdateArticlePayload},
};

#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "Articles",
    params(ArticleListQuery),
    responses((status = 200, description = "Catálogo de artigos", body = Vec<Article>))
)]
pub async fn list_articles(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ArticleListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let articles = app_state.article_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(articles))
}

#[utoipa::path(
    get,
    path = "/api/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Artigo", body = Article),
        (status = 404, description = "Artigo não encontrado")
    )
)]
pub async fn get_article(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.article_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Artigo"))?;

    Ok(Json(article))
}

#[utoipa::path(
    post,
    path = "/api/articles",
    tag = "Articles",
    request_body = CreateArticlePayload,
    responses(
        (status = 201, description = "Artigo criado", body = Article),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "SKU já cadastrado")
    )
)]
pub async fn create_article(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateArticlePayload>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.article_repo.create(app_state.pool()?, &payload).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

#[utoipa::path(
    patch,
    path = "/api/articles/{id}",
    tag = "Articles",
    request_body = UpdateArticlePayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Artigo atualizado", body = Article),
        (status = 404, description = "Artigo não encontrado")
    )
)]
pub async fn update_article(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateArticlePayload>,
) -> Result<impl IntoResponse, AppError> {
    let article = app_state.article_repo
        .update(app_state.pool()?, id, &payload)
        .await?
        .ok_or(AppError::NotFound("Artigo"))?;

    Ok(Json(article))
}

#[utoipa::path(
    delete,
    path = "/api/articles/{id}",
    tag = "Articles",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Artigo removido"),
        (status = 404, description = "Artigo não encontrado")
    )
)]
pub async fn delete_article(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.article_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Artigo"));
    }

    Ok(StatusCode::NO_CONTENT)
}
