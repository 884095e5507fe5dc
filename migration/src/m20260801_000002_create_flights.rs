use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000001_create_aircraft::Aircraft;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Flight::Table)
                    .if_not_exists()
                    .col(string_len(Flight::Id, 64).primary_key())
                    .col(string_len(Flight::Destination, 100).not_null())
                    .col(timestamp_with_time_zone(Flight::DepartureDate).not_null())
                    .col(string_len(Flight::AircraftId, 64).not_null())
                    .col(
                        timestamp_with_time_zone(Flight::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_flight_aircraft")
                            .from(Flight::Table, Flight::AircraftId)
                            .to(Aircraft::Table, Aircraft::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Authoritative duplicate-pair enforcement; the handler pre-check
        // only exists for the friendlier error message.
        manager
            .create_index(
                Index::create()
                    .name("idx_flight_destination_departure")
                    .table(Flight::Table)
                    .col(Flight::Destination)
                    .col(Flight::DepartureDate)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Flight::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Flight {
    Table,
    Id,
    Destination,
    DepartureDate,
    AircraftId,
    CreatedAt,
}
