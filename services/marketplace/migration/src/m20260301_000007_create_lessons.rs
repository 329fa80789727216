use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Lessons::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Lessons::SectionId).uuid().not_null())
                    .col(ColumnDef::new(Lessons::Title).string().not_null())
                    .col(ColumnDef::new(Lessons::Duration).integer())
                    .col(
                        ColumnDef::new(Lessons::FreePreview)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Lessons::Link).string())
                    .col(ColumnDef::new(Lessons::OrderInSection).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Lessons::Table, Lessons::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Lessons::Table)
                    .col(Lessons::SectionId)
                    .col(Lessons::OrderInSection)
                    .name("idx_lessons_section_id_order")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Lessons {
    Table,
    Id,
    SectionId,
    Title,
    Duration,
    FreePreview,
    Link,
    OrderInSection,
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
}
