#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create database directory: {0}")]
    DatabaseDirCreation(std::io::Error),
    #[error("failed to open the record database: {0}")]
    DatabaseOpen(sqlx::Error),
    #[error("failed to run record database migrations: {0}")]
    DatabaseMigration(sqlx::migrate::MigrateError),
    #[error("failed to read records: {0}")]
    RecordRead(sqlx::Error),
    #[error("failed to write record: {0}")]
    RecordWrite(sqlx::Error),
}

pub type RecordResult<T> = std::result::Result<T, RecordError>;
