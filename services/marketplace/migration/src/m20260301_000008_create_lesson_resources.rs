use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LessonResources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonResources::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonResources::LessonId).uuid().not_null())
                    .col(ColumnDef::new(LessonResources::Name).string().not_null())
                    .col(ColumnDef::new(LessonResources::Link).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(LessonResources::Table, LessonResources::LessonId)
                            .to(Lessons::Table, Lessons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(LessonResources::Table)
                    .col(LessonResources::LessonId)
                    .name("idx_lesson_resources_lesson_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LessonResources::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LessonResources {
    Table,
    Id,
    LessonId,
    Name,
    Link,
}

#[derive(Iden)]
enum Lessons {
    Table,
    Id,
}
