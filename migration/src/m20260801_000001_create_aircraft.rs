use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Aircraft::Table)
                    .if_not_exists()
                    .col(string_len(Aircraft::Id, 64).primary_key())
                    .col(string_len(Aircraft::Name, 100).not_null())
                    .col(integer(Aircraft::Capacity).not_null())
                    .to_owned(),
            )
            .await?;

        // Seed the fleet (there is no aircraft CRUD endpoint)
        let insert = Query::insert()
            .into_table(Aircraft::Table)
            .columns([Aircraft::Id, Aircraft::Name, Aircraft::Capacity])
            .values_panic(["AC_1".into(), "Boeing 737-800".into(), 189.into()])
            .values_panic(["AC_2".into(), "Airbus A320".into(), 180.into()])
            .values_panic(["AC_3".into(), "Embraer E190".into(), 100.into()])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Aircraft::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Aircraft {
    Table,
    Id,
    Name,
    Capacity,
}
