pub use sea_orm_migration::prelude::*;

mod m20250301_120000_create_schema_and_base_db_setup;
mod m20250301_130000_create_document_tables;
mod m20250315_090000_add_initial_user;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_120000_create_schema_and_base_db_setup::Migration),
            Box::new(m20250301_130000_create_document_tables::Migration),
            Box::new(m20250315_090000_add_initial_user::Migration),
        ]
    }
}
