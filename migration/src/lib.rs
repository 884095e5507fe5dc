pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_aircraft;
mod m20260801_000002_create_flights;
mod m20260801_000003_create_bookings;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_aircraft::Migration),
            Box::new(m20260801_000002_create_flights::Migration),
            Box::new(m20260801_000003_create_bookings::Migration),
        ]
    }
}
