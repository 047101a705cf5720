use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PropertyImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyImages::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PropertyImages::PropertyId).uuid().not_null())
                    .col(ColumnDef::new(PropertyImages::Position).integer().not_null())
                    .col(ColumnDef::new(PropertyImages::Url).string().not_null())
                    .col(ColumnDef::new(PropertyImages::PublicId).string().null())
                    .col(
                        ColumnDef::new(PropertyImages::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PropertyImages::Table, PropertyImages::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_property_images_property_position")
                    .table(PropertyImages::Table)
                    .col(PropertyImages::PropertyId)
                    .col(PropertyImages::Position)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyImages::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PropertyImages {
    Table,
    Id,
    PropertyId,
    Position,
    Url,
    PublicId,
    CreatedAt,
}

#[derive(Iden)]
enum Properties {
    Table,
    Id,
}
