use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Courses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Courses::Title).string_len(100).not_null())
                    .col(ColumnDef::new(Courses::Headline).string())
                    .col(ColumnDef::new(Courses::Description).text())
                    .col(ColumnDef::new(Courses::Level).string_len(15).not_null())
                    .col(ColumnDef::new(Courses::Language).string_len(15).not_null())
                    .col(
                        ColumnDef::new(Courses::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Courses::Thumbnail).string())
                    .col(ColumnDef::new(Courses::Requirements).text())
                    .col(ColumnDef::new(Courses::WhatYouWillLearn).text())
                    .col(ColumnDef::new(Courses::Rating).double())
                    .col(ColumnDef::new(Courses::InstructorId).uuid().not_null())
                    .col(ColumnDef::new(Courses::LastUpdated).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Courses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::InstructorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Courses::Table)
                    .col(Courses::InstructorId)
                    .col(Courses::Title)
                    .name("idx_courses_instructor_id_title")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
    Title,
    Headline,
    Description,
    Level,
    Language,
    PriceCents,
    Thumbnail,
    Requirements,
    WhatYouWillLearn,
    Rating,
    InstructorId,
    LastUpdated,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
