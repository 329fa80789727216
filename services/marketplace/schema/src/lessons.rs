use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use ucademic_core::gateway::Record;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lessons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    /// Video length in seconds; null until a video is attached.
    pub duration: Option<i32>,
    pub free_preview: bool,
    pub link: Option<String>,
    pub order_in_section: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sections::Entity",
        from = "Column::SectionId",
        to = "super::sections::Column::Id",
        on_delete = "Cascade"
    )]
    Section,
    #[sea_orm(has_many = "super::lesson_resources::Entity")]
    Resources,
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Section.def()
    }
}

impl Related<super::lesson_resources::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resources.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if insert {
            if self.id.is_not_set() {
                self.id = Set(Uuid::now_v7());
            }
            if self.free_preview.is_not_set() {
                self.free_preview = Set(false);
            }
        }
        Ok(self)
    }
}

impl Record for Entity {
    const NAME: &'static str = "Lesson";
}
