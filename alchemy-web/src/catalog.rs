use std::path::Path;
use std::sync::Arc;

use alchemy_store_db::{
    Author, BookListing, BookRemoval, CatalogDb, NewAuthor, NewBook, OpenMode, SortKey,
};
use tokio::sync::Mutex;
use tracing::info;

use crate::error::{AppError, CatalogError, IoErrorContext, Result};

/// Shared handle to the catalog database.
///
/// Built once at startup and handed to every request through `web::Data`.
/// Operations run on the blocking pool, one at a time.
#[derive(Clone)]
pub struct Catalog {
    db: Arc<Mutex<CatalogDb>>,
}

impl Catalog {
    pub fn new(db: CatalogDb) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
        }
    }

    /// Open the catalog file, creating it and its schema if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).io_context(format!(
                "Failed to create database directory {}",
                parent.display()
            ))?;
        }

        let db = CatalogDb::open(path, OpenMode::Create)?;
        db.create_schema()?;
        info!("Opened catalog at {}", path.display());
        Ok(Self::new(db))
    }

    /// In-memory catalog with the schema created.
    pub fn open_memory() -> Result<Self> {
        Ok(Self::new(CatalogDb::open_memory()?))
    }

    /// Execute a database operation on the blocking pool
    async fn db_operation<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut CatalogDb) -> alchemy_store_db::Result<T> + Send + 'static,
    {
        let db = self.db.clone();
        let res = tokio::task::spawn_blocking(move || {
            let mut db = db.blocking_lock();
            f(&mut db)
        })
        .await
        .map_err(|e| CatalogError::Task {
            reason: format!("Task join error: {e}"),
        })?;
        res.map_err(AppError::from)
    }

    pub async fn list_books(
        &self,
        search: Option<String>,
        sort: SortKey,
    ) -> Result<Vec<BookListing>> {
        self.db_operation(move |db| db.list_books(search.as_deref(), sort))
            .await
    }

    pub async fn list_authors(&self) -> Result<Vec<Author>> {
        self.db_operation(|db| db.list_authors()).await
    }

    pub async fn add_author(&self, author: NewAuthor) -> Result<i64> {
        self.db_operation(move |db| db.insert_author(&author)).await
    }

    pub async fn add_book(&self, book: NewBook) -> Result<i64> {
        self.db_operation(move |db| db.insert_book(&book)).await
    }

    /// Delete a book and, in the same transaction, its author if orphaned.
    pub async fn delete_book(&self, id: i64) -> Result<BookRemoval> {
        self.db_operation(move |db| db.delete_book(id)).await
    }

    pub async fn count_books(&self) -> Result<u64> {
        self.db_operation(|db| db.count_books()).await
    }
}
