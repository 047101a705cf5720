use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertyReviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyReviews::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertyReviews::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(PropertyReviews::UserId).uuid().not_null())
                    .col(ColumnDef::new(PropertyReviews::Rating).double().not_null())
                    .col(ColumnDef::new(PropertyReviews::Comment).text().null())
                    .col(
                        ColumnDef::new(PropertyReviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PropertyReviews::Table, PropertyReviews::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PropertyReviews::Table, PropertyReviews::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_property_reviews_property_created_at")
                    .table(PropertyReviews::Table)
                    .col(PropertyReviews::PropertyId)
                    .col(PropertyReviews::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyReviews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PropertyReviews {
    Table,
    Id,
    PropertyId,
    UserId,
    Rating,
    Comment,
    CreatedAt,
}

#[derive(Iden)]
enum Properties {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
