use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create the application's schema
        manager
            .get_connection()
            .execute_unprepared("CREATE SCHEMA IF NOT EXISTS docuflow;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("SET search_path TO docuflow, public;")
            .await?;

        // Grant the base DB user that executes all application queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    GRANT ALL PRIVILEGES ON DATABASE docuflow TO docuflow;
                    GRANT ALL ON SCHEMA docuflow TO docuflow;

                    ALTER DEFAULT PRIVILEGES IN SCHEMA docuflow GRANT ALL ON TABLES TO docuflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA docuflow GRANT ALL ON SEQUENCES TO docuflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA docuflow GRANT ALL ON FUNCTIONS TO docuflow;
                END $$;
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Revoke default privileges first
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DO $$ BEGIN
                    ALTER DEFAULT PRIVILEGES IN SCHEMA docuflow REVOKE ALL ON FUNCTIONS FROM docuflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA docuflow REVOKE ALL ON SEQUENCES FROM docuflow;
                    ALTER DEFAULT PRIVILEGES IN SCHEMA docuflow REVOKE ALL ON TABLES FROM docuflow;
                    REVOKE ALL ON SCHEMA docuflow FROM docuflow;
                    REVOKE ALL PRIVILEGES ON DATABASE docuflow FROM docuflow;
                END $$;
            "#,
            )
            .await?;

        // Drop the schema (CASCADE will remove all objects in it)
        manager
            .get_connection()
            .execute_unprepared("DROP SCHEMA IF EXISTS docuflow CASCADE;")
            .await?;

        Ok(())
    }
}
