use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_with::rust::double_option;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::auth::permission::{CreateDrinks, DeleteDrinks, ReadDrinkDetail, UpdateDrinks};
use crate::db::require_db;
use crate::db::txn::with_txn;
use crate::domain::drink::{Drink, DrinkChanges, DrinkLong, DrinkShort, Ingredient, NewDrink};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::extractors::{read_json, Authorized, BodyError};
use crate::repos::drinks;
use crate::state::app_state::AppState;

/// Inbound body for create and update.
#[derive(Debug, Default, Deserialize)]
pub struct DrinkPatch {
    // None = not provided, Some(None) = provided as null
    #[serde(default, with = "double_option")]
    pub title: Option<Option<String>>,
    #[serde(default, with = "double_option")]
    pub recipe: Option<Option<Vec<Ingredient>>>,
}

impl DrinkPatch {
    fn into_new(self) -> NewDrink {
        NewDrink {
            title: self.title.flatten(),
            recipe: self.recipe.flatten(),
        }
    }

    fn into_changes(self) -> DrinkChanges {
        DrinkChanges {
            title: self.title,
            recipe: self.recipe,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DrinkListResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub drink: Vec<DrinkLong>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub success: bool,
    pub updated: i32,
    pub drinks: Vec<DrinkLong>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub status_code: u16,
    pub delete: i32,
}

#[derive(Debug, Error)]
pub enum CreateDrinkError {
    #[error("invalid drink body: {0}")]
    Body(#[from] BodyError),
    #[error("drink insert failed: {0}")]
    Insert(#[from] DomainError),
}

impl From<CreateDrinkError> for AppError {
    fn from(err: CreateDrinkError) -> Self {
        match err {
            CreateDrinkError::Body(e) => AppError::forbidden(e.to_string()),
            CreateDrinkError::Insert(e) => AppError::unprocessable(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum UpdateDrinkError {
    #[error("invalid drink body: {0}")]
    Body(#[from] BodyError),
    #[error("drink {0} not found")]
    NotFound(i32),
    #[error("drink update failed: {0}")]
    Storage(#[from] DomainError),
}

impl From<UpdateDrinkError> for AppError {
    fn from(err: UpdateDrinkError) -> Self {
        match err {
            UpdateDrinkError::Body(e) => AppError::forbidden(e.to_string()),
            UpdateDrinkError::NotFound(id) => {
                AppError::not_found(ErrorCode::DrinkNotFound, format!("drink {id} not found"))
            }
            UpdateDrinkError::Storage(e) => AppError::forbidden(e.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum DeleteDrinkError {
    #[error("drink {0} not found")]
    NotFound(i32),
    #[error("drink delete failed: {0}")]
    Storage(#[from] DomainError),
}

impl From<DeleteDrinkError> for AppError {
    fn from(err: DeleteDrinkError) -> Self {
        match err {
            DeleteDrinkError::NotFound(id) => {
                AppError::not_found(ErrorCode::DrinkNotFound, format!("drink {id} not found"))
            }
            DeleteDrinkError::Storage(e) => AppError::forbidden(e.to_string()),
        }
    }
}

/// `GET /drinks`: public, short projections.
async fn list_drinks(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let all = drinks::list_drinks(db).await?;
    if all.is_empty() {
        return Err(AppError::not_found(ErrorCode::NotFound, "no drinks stored"));
    }

    Ok(HttpResponse::Ok().json(DrinkListResponse::<DrinkShort> {
        success: true,
        drinks: all.iter().map(|d| d.short()).collect(),
    }))
}

/// `GET /drinks-detail`: long projections.
async fn list_drinks_detail(
    auth: Authorized<ReadDrinkDetail>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    debug!(sub = %auth.claims.sub, "drinks.detail");
    let db = require_db(&app_state)?;
    let all = drinks::list_drinks(db).await?;
    if all.is_empty() {
        return Err(AppError::not_found(ErrorCode::NotFound, "no drinks stored"));
    }

    Ok(HttpResponse::Ok().json(DrinkListResponse::<DrinkLong> {
        success: true,
        drinks: all.iter().map(|d| d.long()).collect(),
    }))
}

async fn create_drink(
    auth: Authorized<CreateDrinks>,
    app_state: web::Data<AppState>,
    body: web::Payload,
) -> Result<HttpResponse, AppError> {
    let created = async {
        let patch: DrinkPatch = read_json(body).await?;
        let db = require_db(&app_state)?;
        let drink = drinks::create_drink(db, patch.into_new()).await?;
        Ok::<_, CreateDrinkError>(drink)
    }
    .await
    .inspect_err(|e| warn!(error = %e, "drinks.create_failed"))?;

    info!(id = created.id, sub = %auth.claims.sub, "drinks.created");
    Ok(HttpResponse::Ok().json(CreatedResponse {
        success: true,
        drink: vec![created.long()],
    }))
}

// `path` is declared before `auth` so an unusable id is a 404 even for
// unauthenticated callers.
async fn update_drink(
    path: web::Path<i32>,
    auth: Authorized<UpdateDrinks>,
    app_state: web::Data<AppState>,
    body: web::Payload,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let updated: Result<Drink, UpdateDrinkError> = async {
        let patch: DrinkPatch = read_json(body).await?;
        let changes = patch.into_changes();
        let db = require_db(&app_state)?;
        with_txn(db, move |txn| {
            Box::pin(async move {
                drinks::update_drink(txn, id, changes)
                    .await?
                    .ok_or(UpdateDrinkError::NotFound(id))
            })
        })
        .await
    }
    .await;
    let updated = updated.inspect_err(|e| warn!(id, error = %e, "drinks.update_failed"))?;

    info!(id, sub = %auth.claims.sub, "drinks.updated");
    Ok(HttpResponse::Ok().json(UpdatedResponse {
        success: true,
        updated: id,
        drinks: vec![updated.long()],
    }))
}

async fn delete_drink(
    path: web::Path<i32>,
    auth: Authorized<DeleteDrinks>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let deleted: Result<(), DeleteDrinkError> = async {
        let db = require_db(&app_state)?;
        with_txn(db, move |txn| {
            Box::pin(async move {
                if drinks::delete_drink(txn, id).await? {
                    Ok(())
                } else {
                    Err(DeleteDrinkError::NotFound(id))
                }
            })
        })
        .await
    }
    .await;
    deleted.inspect_err(|e| warn!(id, error = %e, "drinks.delete_failed"))?;

    info!(id, sub = %auth.claims.sub, "drinks.deleted");
    Ok(HttpResponse::Ok().json(DeletedResponse {
        success: true,
        status_code: 200,
        delete: id,
    }))
}

async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}

/// Unknown paths and unparseable ids both answer 404 in the error envelope.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, AppError> {
    Err(AppError::not_found(
        ErrorCode::NotFound,
        format!("no route for {} {}", req.method(), req.path()),
    ))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::not_found(ErrorCode::NotFound, err.to_string()).into()
    }))
    .service(
        web::resource("/drinks")
            .route(web::get().to(list_drinks))
            .route(web::post().to(create_drink))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        web::resource("/drinks-detail")
            .route(web::get().to(list_drinks_detail))
            .default_service(web::to(method_not_allowed)),
    )
    .service(
        // Non-numeric ids never match and fall through to the app's 404.
        web::resource(r"/drinks/{id:\d+}")
            .route(web::patch().to(update_drink))
            .route(web::delete().to(delete_drink))
            .default_service(web::to(method_not_allowed)),
    );
}
