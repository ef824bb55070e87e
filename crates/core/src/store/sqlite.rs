//! SQLite-backed record store.

use std::collections::BTreeSet;
use std::path::Path;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use super::RecordStore;
use crate::error::{RecordError, RecordResult};
use crate::record::{DrugApplicationRecord, RecordPage};

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Row shape of the `drug_application_records` table; product numbers live
/// in their own collection table and are fetched separately.
#[derive(sqlx::FromRow)]
struct RecordRow {
    application_number: String,
    manufacturer_name: String,
    substance_name: String,
}

/// SQLite-backed record store.
#[derive(Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    /// Creates a store from an existing pool.
    ///
    /// The pool is expected to point at a database the embedded migrations
    /// have already been applied to.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates and initialises a store from a database file path.
    ///
    /// Handles all setup:
    /// - creates parent directories if they don't exist
    /// - creates the database file if it doesn't exist
    /// - runs the embedded migrations
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file (e.g. `data/fda_records.db`)
    ///
    /// # Errors
    ///
    /// Returns `RecordError` if the directory cannot be created, the database
    /// cannot be opened, or a migration fails.
    pub async fn from_path(path: impl AsRef<Path>) -> RecordResult<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(RecordError::DatabaseDirCreation)?;
            }
        }

        let url = format!("sqlite:{}?mode=rwc", path.to_string_lossy());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .map_err(RecordError::DatabaseOpen)?;

        MIGRATOR
            .run(&pool)
            .await
            .map_err(RecordError::DatabaseMigration)?;

        Ok(Self { pool })
    }

    async fn product_numbers_for(&self, application_number: &str) -> RecordResult<BTreeSet<String>> {
        let numbers = sqlx::query_scalar::<_, String>(
            r#"
            SELECT product_number
            FROM product_numbers
            WHERE application_number = ?
            "#,
        )
        .bind(application_number)
        .fetch_all(&self.pool)
        .await
        .map_err(RecordError::RecordRead)?;

        Ok(numbers.into_iter().collect())
    }
}

#[async_trait::async_trait]
impl RecordStore for SqliteRecordStore {
    async fn find_by_id(
        &self,
        application_number: &str,
    ) -> RecordResult<Option<DrugApplicationRecord>> {
        let row = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT application_number, manufacturer_name, substance_name
            FROM drug_application_records
            WHERE application_number = ?
            "#,
        )
        .bind(application_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(RecordError::RecordRead)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let product_numbers = self.product_numbers_for(&row.application_number).await?;

        Ok(Some(DrugApplicationRecord {
            application_number: row.application_number,
            manufacturer_name: row.manufacturer_name,
            substance_name: row.substance_name,
            product_numbers,
        }))
    }

    async fn save(&self, record: &DrugApplicationRecord) -> RecordResult<DrugApplicationRecord> {
        let mut tx = self.pool.begin().await.map_err(RecordError::RecordWrite)?;

        sqlx::query(
            r#"
            INSERT INTO drug_application_records (application_number, manufacturer_name, substance_name)
            VALUES (?, ?, ?)
            ON CONFLICT (application_number) DO UPDATE
            SET manufacturer_name = excluded.manufacturer_name,
                substance_name = excluded.substance_name
            "#,
        )
        .bind(&record.application_number)
        .bind(&record.manufacturer_name)
        .bind(&record.substance_name)
        .execute(&mut *tx)
        .await
        .map_err(RecordError::RecordWrite)?;

        // Whole-entity save: the stored collection is rewritten to exactly
        // the record's set.
        sqlx::query("DELETE FROM product_numbers WHERE application_number = ?")
            .bind(&record.application_number)
            .execute(&mut *tx)
            .await
            .map_err(RecordError::RecordWrite)?;

        for product_number in &record.product_numbers {
            sqlx::query(
                r#"
                INSERT INTO product_numbers (application_number, product_number)
                VALUES (?, ?)
                "#,
            )
            .bind(&record.application_number)
            .bind(product_number)
            .execute(&mut *tx)
            .await
            .map_err(RecordError::RecordWrite)?;
        }

        tx.commit().await.map_err(RecordError::RecordWrite)?;

        Ok(record.clone())
    }

    async fn find_all(&self, page_number: u32, page_size: u32) -> RecordResult<RecordPage> {
        if page_size == 0 {
            return Err(RecordError::InvalidInput(
                "page size must be at least 1".into(),
            ));
        }

        let offset = i64::from(page_number) * i64::from(page_size);
        let rows = sqlx::query_as::<_, RecordRow>(
            r#"
            SELECT application_number, manufacturer_name, substance_name
            FROM drug_application_records
            ORDER BY application_number
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(i64::from(page_size))
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(RecordError::RecordRead)?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM drug_application_records")
                .fetch_one(&self.pool)
                .await
                .map_err(RecordError::RecordRead)?;

        let mut content = Vec::with_capacity(rows.len());
        for row in rows {
            let product_numbers = self.product_numbers_for(&row.application_number).await?;
            content.push(DrugApplicationRecord {
                application_number: row.application_number,
                manufacturer_name: row.manufacturer_name,
                substance_name: row.substance_name,
                product_numbers,
            });
        }

        let total_elements = u64::try_from(total).unwrap_or(0);
        let total_pages = u32::try_from(total_elements.div_ceil(u64::from(page_size)))
            .unwrap_or(u32::MAX);

        Ok(RecordPage {
            content,
            page_number,
            page_size,
            total_elements,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(
        application_number: &str,
        manufacturer_name: &str,
        substance_name: &str,
        product_numbers: &[&str],
    ) -> DrugApplicationRecord {
        DrugApplicationRecord {
            application_number: application_number.to_owned(),
            manufacturer_name: manufacturer_name.to_owned(),
            substance_name: substance_name.to_owned(),
            product_numbers: product_numbers.iter().map(|p| (*p).to_owned()).collect(),
        }
    }

    async fn test_store(temp_dir: &TempDir) -> SqliteRecordStore {
        SqliteRecordStore::from_path(temp_dir.path().join("records.db"))
            .await
            .expect("store should initialise")
    }

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = test_store(&temp_dir).await;

        let saved = store
            .save(&record("ANDA076805", "TARO", "LORATADINE", &["001", "002"]))
            .await
            .expect("save should succeed");

        let found = store
            .find_by_id("ANDA076805")
            .await
            .expect("find should succeed")
            .expect("record should exist");

        assert_eq!(found, saved);
        assert_eq!(found.manufacturer_name, "TARO");
        assert_eq!(
            found.product_numbers,
            ["001", "002"].iter().map(|p| (*p).to_string()).collect()
        );
    }

    #[tokio::test]
    async fn test_find_by_id_returns_none_for_unknown_key() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = test_store(&temp_dir).await;

        let found = store
            .find_by_id("NDA000000")
            .await
            .expect("find should succeed");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_stored_state() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = test_store(&temp_dir).await;

        store
            .save(&record("ANDA076805", "TARO", "LORATADINE", &["001", "002"]))
            .await
            .expect("first save should succeed");
        store
            .save(&record("ANDA076805", "TARO2", "LORATADINE2", &["003"]))
            .await
            .expect("second save should succeed");

        let found = store
            .find_by_id("ANDA076805")
            .await
            .expect("find should succeed")
            .expect("record should exist");

        assert_eq!(found.manufacturer_name, "TARO2");
        assert_eq!(found.substance_name, "LORATADINE2");
        assert_eq!(
            found.product_numbers,
            std::iter::once("003".to_string()).collect()
        );
    }

    #[tokio::test]
    async fn test_find_all_pages_and_counts() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = test_store(&temp_dir).await;

        for n in ["ANDA076805", "NDA020641", "NDA021926"] {
            store
                .save(&record(n, "TARO", "LORATADINE", &["001"]))
                .await
                .expect("save should succeed");
        }

        let first_page = store.find_all(0, 2).await.expect("find_all should succeed");
        assert_eq!(first_page.content.len(), 2);
        assert_eq!(first_page.content[0].application_number, "ANDA076805");
        assert_eq!(first_page.content[1].application_number, "NDA020641");
        assert_eq!(first_page.page_number, 0);
        assert_eq!(first_page.page_size, 2);
        assert_eq!(first_page.total_elements, 3);
        assert_eq!(first_page.total_pages, 2);

        let second_page = store.find_all(1, 2).await.expect("find_all should succeed");
        assert_eq!(second_page.content.len(), 1);
        assert_eq!(second_page.content[0].application_number, "NDA021926");

        let past_the_end = store.find_all(5, 2).await.expect("find_all should succeed");
        assert!(past_the_end.content.is_empty());
        assert_eq!(past_the_end.total_elements, 3);
    }

    #[tokio::test]
    async fn test_find_all_rejects_zero_page_size() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = test_store(&temp_dir).await;

        let err = store
            .find_all(0, 0)
            .await
            .expect_err("zero page size should be rejected");

        assert!(matches!(err, RecordError::InvalidInput(_)));
    }
}
