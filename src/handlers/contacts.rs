// src/handlers/contacts.rs

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
    models::{
        company::CompanyRef,
        contact::{Contact, ContactListQuery, CreateContactPayload, UpdateContactPayload},
    },
};

// GET /api/contacts
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "Contacts",
    params(ContactListQuery),
    responses(
        (status = 200, description = "Lista de contatos", body = Vec<Contact>),
        (status = 503, description = "Banco de dados não configurado")
    )
)]
pub async fn list_contacts(
    State(app_state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ContactListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let contacts = app_state.contact_repo.list(app_state.pool()?, &query).await?;
    Ok(Json(contacts))
}

// GET /api/contacts/{id}
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Contato encontrado(a)", body = Contact),
        (status = 404, description = "Contato não encontrado(a)")
    )
)]
pub async fn get_contact(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let contact = app_state.contact_repo
        .find_by_id(app_state.pool()?, id)
        .await?
        .ok_or(AppError::NotFound("Contato"))?;

    Ok(Json(contact))
}

// POST /api/contacts
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "Contacts",
    request_body = CreateContactPayload,
    responses(
        (status = 201, description = "Contato criado(a)", body = Contact),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_contact(
    State(app_state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_id = app_state
        .company_service
        .resolve(
            &mut *tx,
            CompanyRef::parse(payload.company.as_deref(), payload.company_id),
        )
        .await?;

    let contact = app_state.contact_repo.create(&mut *tx, &payload, company_id).await?;
    tx.commit().await?;

    tracing::debug!("Contato {} criado (empresa: {:?}).", contact.id, contact.company_name);
    Ok((StatusCode::CREATED, Json(contact)))
}

// PATCH/PUT /api/contacts/{id}
#[utoipa::path(
    patch,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    request_body = UpdateContactPayload,
    params(("id" = Uuid, Path)),
    responses(
        (status = 200, description = "Contato atualizado(a)", body = Contact),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Contato não encontrado(a)")
    )
)]
pub async fn update_contact(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    let mut tx = app_state.pool()?.begin().await?;

    let company_change = app_state
        .company_service
        .resolve_change(&mut *tx, payload.company.as_deref(), payload.company_id)
        .await?;

    let contact = app_state.contact_repo
        .update(&mut *tx, id, &payload, company_change)
        .await?
        .ok_or(AppError::NotFound("Contato"))?;
    tx.commit().await?;

    Ok(Json(contact))
}

// DELETE /api/contacts/{id}
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "Contacts",
    params(("id" = Uuid, Path)),
    responses(
        (status = 204, description = "Contato removido(a)"),
        (status = 404, description = "Contato não encontrado(a)")
    )
)]
pub async fn delete_contact(
    State(app_state): State<AppState>,
    ValidatedPath(id): ValidatedPath<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    if !app_state.contact_repo.delete(app_state.pool()?, id).await? {
        return Err(AppError::NotFound("Contato"));
    }

    Ok(StatusCode::NO_CONTENT)
}
