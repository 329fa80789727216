use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quizzes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Quizzes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Quizzes::SectionId).uuid().not_null())
                    .col(ColumnDef::new(Quizzes::Title).string().not_null())
                    .col(ColumnDef::new(Quizzes::OrderInSection).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Quizzes::Table, Quizzes::SectionId)
                            .to(Sections::Table, Sections::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Quizzes::Table)
                    .col(Quizzes::SectionId)
                    .col(Quizzes::OrderInSection)
                    .name("idx_quizzes_section_id_order")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quizzes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Quizzes {
    Table,
    Id,
    SectionId,
    Title,
    OrderInSection,
}

#[derive(Iden)]
enum Sections {
    Table,
    Id,
}
