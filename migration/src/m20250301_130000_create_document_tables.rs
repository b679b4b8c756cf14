use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create document_status enum
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE docuflow.document_status AS ENUM (
                    'pending',
                    'approved',
                    'rejected'
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE docuflow.document_status OWNER TO docuflow")
            .await?;

        // Create upload_status enum
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE TYPE docuflow.upload_status AS ENUM (
                    'success',
                    'failed'
                )",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TYPE docuflow.upload_status OWNER TO docuflow")
            .await?;

        // Create users table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS docuflow.users (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    email VARCHAR(255) NOT NULL UNIQUE,
                    first_name VARCHAR(255) NOT NULL,
                    last_name VARCHAR(255) NOT NULL,
                    display_name VARCHAR(255),
                    password VARCHAR(255) NOT NULL,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now(),
                    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )
            "#,
            )
            .await?;

        // Create document_types table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS docuflow.document_types (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id UUID NOT NULL
                        REFERENCES docuflow.users(id) ON DELETE CASCADE,
                    name VARCHAR(255) NOT NULL,
                    description VARCHAR(255),
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now(),
                    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )
            "#,
            )
            .await?;

        // Create documents table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS docuflow.documents (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    document_type_id UUID NOT NULL
                        REFERENCES docuflow.document_types(id) ON DELETE CASCADE,
                    uploaded_by UUID NOT NULL
                        REFERENCES docuflow.users(id) ON DELETE CASCADE,
                    file_path VARCHAR(512) NOT NULL,
                    original_filename VARCHAR(255) NOT NULL,
                    file_size BIGINT NOT NULL,
                    mime_type VARCHAR(255) NOT NULL,
                    status docuflow.document_status NOT NULL DEFAULT 'pending',
                    confidence_score DOUBLE PRECISION,
                    requires_hitl BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now(),
                    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )
            "#,
            )
            .await?;

        // Create extracted_fields table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS docuflow.extracted_fields (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    document_id UUID NOT NULL
                        REFERENCES docuflow.documents(id) ON DELETE CASCADE,
                    field_name VARCHAR(255) NOT NULL,
                    field_value TEXT,
                    confidence_score DOUBLE PRECISION NOT NULL,
                    section VARCHAR(255),
                    corrected_by_user_id UUID
                        REFERENCES docuflow.users(id),
                    bbox_x DOUBLE PRECISION,
                    bbox_y DOUBLE PRECISION,
                    bbox_width DOUBLE PRECISION,
                    bbox_height DOUBLE PRECISION,
                    page INTEGER,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now(),
                    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )
            "#,
            )
            .await?;

        // Create line_items table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS docuflow.line_items (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    document_id UUID NOT NULL
                        REFERENCES docuflow.documents(id) ON DELETE CASCADE,
                    date DATE,
                    description VARCHAR(255) NOT NULL DEFAULT '',
                    quantity DOUBLE PRECISION NOT NULL DEFAULT 0,
                    unit_price DOUBLE PRECISION NOT NULL DEFAULT 0,
                    amount DOUBLE PRECISION NOT NULL DEFAULT 0,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now(),
                    updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )
            "#,
            )
            .await?;

        // Create upload_logs table, the append-only audit trail of uploads.
        // document_id is SET NULL so the audit row survives document deletion.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE IF NOT EXISTS docuflow.upload_logs (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    user_id UUID NOT NULL
                        REFERENCES docuflow.users(id) ON DELETE CASCADE,
                    document_id UUID
                        REFERENCES docuflow.documents(id) ON DELETE SET NULL,
                    file_name VARCHAR(255) NOT NULL,
                    status docuflow.upload_status NOT NULL,
                    error_message TEXT,
                    created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT now()
                )
            "#,
            )
            .await?;

        // Indexes matching the dashboard's listing queries
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_document_types_user_id
                    ON docuflow.document_types (user_id);
                CREATE INDEX IF NOT EXISTS idx_documents_uploaded_by
                    ON docuflow.documents (uploaded_by);
                CREATE INDEX IF NOT EXISTS idx_documents_document_type_id
                    ON docuflow.documents (document_type_id);
                CREATE INDEX IF NOT EXISTS idx_documents_created_at
                    ON docuflow.documents (created_at DESC);
                CREATE INDEX IF NOT EXISTS idx_extracted_fields_document_id
                    ON docuflow.extracted_fields (document_id);
                CREATE INDEX IF NOT EXISTS idx_line_items_document_id
                    ON docuflow.line_items (document_id);
                CREATE INDEX IF NOT EXISTS idx_upload_logs_user_id
                    ON docuflow.upload_logs (user_id);
                CREATE INDEX IF NOT EXISTS idx_upload_logs_created_at
                    ON docuflow.upload_logs (created_at DESC);
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS docuflow.upload_logs;
                DROP TABLE IF EXISTS docuflow.line_items;
                DROP TABLE IF EXISTS docuflow.extracted_fields;
                DROP TABLE IF EXISTS docuflow.documents;
                DROP TABLE IF EXISTS docuflow.document_types;
                DROP TABLE IF EXISTS docuflow.users;
                DROP TYPE IF EXISTS docuflow.upload_status;
                DROP TYPE IF EXISTS docuflow.document_status;
            "#,
            )
            .await?;

        Ok(())
    }
}
