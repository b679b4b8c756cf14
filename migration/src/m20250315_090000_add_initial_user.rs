use chrono::Utc;
use password_auth::generate_hash;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DbBackend, Statement, Value};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        insert_initial_admin_user(manager).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        delete_initial_admin_user(manager).await
    }
}

// NOTE: We use raw SQL here to avoid issues with entity type changes in future migrations.
// Using the ORM can break if new fields are added later, but raw SQL remains compatible.
async fn insert_initial_admin_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();
    let now = Utc::now();

    let password_hash = generate_hash("password");

    let user_sql = r#"
        INSERT INTO docuflow.users (
            email, first_name, last_name, display_name, password, created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7)
    "#;
    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        user_sql,
        vec![
            Value::String(Some(Box::new("admin@docuflow.dev".to_owned()))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::String(Some(Box::new("Admin".to_owned()))),
            Value::String(Some(Box::new(password_hash))),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
            Value::ChronoDateTimeUtc(Some(Box::new(now))),
        ],
    ))
    .await?;

    Ok(())
}

async fn delete_initial_admin_user(manager: &SchemaManager<'_>) -> Result<(), DbErr> {
    let db = manager.get_connection();

    db.execute(Statement::from_sql_and_values(
        DbBackend::Postgres,
        "DELETE FROM docuflow.users WHERE email = $1",
        vec![Value::String(Some(Box::new(
            "admin@docuflow.dev".to_owned(),
        )))],
    ))
    .await?;

    Ok(())
}
