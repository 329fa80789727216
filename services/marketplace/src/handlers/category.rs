use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ucademic_auth_types::identity::BearerIdentity;

use crate::domain::types::Category;
use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::category::{CreateCategoryUseCase, ListCategoriesUseCase};

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}

// ── GET /categories ──────────────────────────────────────────────────────────

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryResponse>>, MarketplaceError> {
    let usecase = ListCategoriesUseCase {
        repo: state.category_repo(),
    };
    let categories = usecase.execute().await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

// ── POST /categories ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

pub async fn create_category(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), MarketplaceError> {
    let usecase = CreateCategoryUseCase {
        users: state.user_repo(),
        repo: state.category_repo(),
    };
    let category = usecase.execute(identity.user_id, &body.name).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}
