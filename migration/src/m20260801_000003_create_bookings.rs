use sea_orm_migration::{prelude::*, schema::*};

use super::m20260801_000002_create_flights::Flight;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(string_len(Booking::Id, 64).primary_key())
                    .col(string_len(Booking::FlightId, 64).not_null())
                    .col(string_len(Booking::BookerName, 100).not_null())
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_flight")
                            .from(Booking::Table, Booking::FlightId)
                            .to(Flight::Table, Flight::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One booking per person per flight.
        manager
            .create_index(
                Index::create()
                    .name("idx_booking_flight_booker")
                    .table(Booking::Table)
                    .col(Booking::FlightId)
                    .col(Booking::BookerName)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    FlightId,
    BookerName,
    CreatedAt,
}
