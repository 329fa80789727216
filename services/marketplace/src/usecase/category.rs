use uuid::Uuid;

use crate::domain::repository::{CategoryRepository, UserRepository};
use crate::domain::types::Category;
use crate::error::MarketplaceError;
use crate::usecase::user::require_instructor;

pub struct ListCategoriesUseCase<R: CategoryRepository> {
    pub repo: R,
}

impl<R: CategoryRepository> ListCategoriesUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<Category>, MarketplaceError> {
        self.repo.list().await
    }
}

pub struct CreateCategoryUseCase<U: UserRepository, R: CategoryRepository> {
    pub users: U,
    pub repo: R,
}

impl<U: UserRepository, R: CategoryRepository> CreateCategoryUseCase<U, R> {
    pub async fn execute(&self, user_id: Uuid, name: &str) -> Result<Category, MarketplaceError> {
        require_instructor(&self.users, user_id).await?;
        let name = name.trim();
        if name.is_empty() {
            return Err(MarketplaceError::InvalidInput(
                "category name must not be empty".into(),
            ));
        }
        self.repo.create(name).await
    }
}
