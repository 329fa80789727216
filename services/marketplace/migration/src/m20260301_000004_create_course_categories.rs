use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseCategories::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(CourseCategories::CourseId).uuid().not_null())
                    .col(ColumnDef::new(CourseCategories::CategoryId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(CourseCategories::CourseId)
                            .col(CourseCategories::CategoryId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseCategories::Table, CourseCategories::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseCategories::Table, CourseCategories::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(CourseCategories::Table)
                    .col(CourseCategories::CategoryId)
                    .name("idx_course_categories_category_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseCategories::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum CourseCategories {
    Table,
    CourseId,
    CategoryId,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}

#[derive(Iden)]
enum Categories {
    Table,
    Id,
}
