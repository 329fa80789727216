use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use ucademic_core::gateway::Record;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::course_categories::Entity")]
    CourseCategories,
}

impl Related<super::course_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseCategories.def()
    }
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_categories::Relation::Course.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_categories::Relation::Category.def().rev())
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert && self.id.is_not_set() {
            self.id = Set(Uuid::now_v7());
        }
        Ok(self)
    }
}

impl Record for Entity {
    const NAME: &'static str = "Category";
}
