use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::Set;

use ucademic_core::gateway::Record;

/// Course offered by an instructor.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub headline: Option<String>,
    /// JSON object serialized as text.
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub level: String,
    pub language: String,
    pub price_cents: i64,
    pub thumbnail: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub requirements: Option<String>,
    /// Backtick-joined list.
    #[sea_orm(column_type = "Text", nullable)]
    pub what_you_will_learn: Option<String>,
    pub rating: Option<f64>,
    pub instructor_id: Uuid,
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::InstructorId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Instructor,
    #[sea_orm(has_many = "super::sections::Entity")]
    Sections,
    #[sea_orm(has_many = "super::course_categories::Entity")]
    CourseCategories,
    #[sea_orm(has_many = "super::user_courses::Entity")]
    UserCourses,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
}

impl Related<super::sections::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::course_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseCategories.def()
    }
}

impl Related<super::user_courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserCourses.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        super::course_categories::Relation::Category.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::course_categories::Relation::Course.def().rev())
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
            if self.created_at.is_not_set() {
                self.created_at = Set(chrono::Utc::now());
            }
        }
        Ok(self)
    }
}

impl Record for Entity {
    const NAME: &'static str = "Course";
}
