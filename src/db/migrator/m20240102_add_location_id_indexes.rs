use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Every cache lookup filters a resource table by `location_id`.
const INDEXED_TABLES: [&str; 4] = ["weathers", "meetups", "movies", "shops"];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in INDEXED_TABLES {
            manager
                .create_index(
                    Index::create()
                        .name(format!("idx_{table}_location_id"))
                        .table(Alias::new(table))
                        .col(LocationId)
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in INDEXED_TABLES {
            manager
                .drop_index(
                    Index::drop()
                        .name(format!("idx_{table}_location_id"))
                        .table(Alias::new(table))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
struct LocationId;
