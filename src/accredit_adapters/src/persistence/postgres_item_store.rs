use sqlx::{PgPool, Row};

use accredit_core::{Item, ItemStore, ItemStoreError, NewItem};

pub struct PostgresItemStore {
    pool: PgPool,
}

impl PostgresItemStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresItemStore { pool }
    }
}

fn item_from_row(row: &sqlx::postgres::PgRow) -> Result<Item, ItemStoreError> {
    let read = |e: sqlx::Error| ItemStoreError::UnexpectedError(e.to_string());
    Ok(Item {
        id: row.try_get("id").map_err(read)?,
        title: row.try_get("title").map_err(read)?,
        description: row.try_get("description").map_err(read)?,
        price_cents: row.try_get("price_cents").map_err(read)?,
    })
}

#[async_trait::async_trait]
impl ItemStore for PostgresItemStore {
    #[tracing::instrument(name = "Adding item to PostgreSQL", skip_all)]
    async fn add_item(&self, new_item: NewItem) -> Result<Item, ItemStoreError> {
        let row = sqlx::query(
            r#"
                INSERT INTO items (title, description, price_cents)
                VALUES ($1, $2, $3)
                RETURNING id, title, description, price_cents
            "#,
        )
        .bind(new_item.title())
        .bind(new_item.description())
        .bind(new_item.price_cents())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ItemStoreError::UnexpectedError(e.to_string()))?;

        item_from_row(&row)
    }

    #[tracing::instrument(name = "Retrieving item from PostgreSQL", skip_all)]
    async fn get_item(&self, id: i64) -> Result<Item, ItemStoreError> {
        let row = sqlx::query(
            r#"
                SELECT id, title, description, price_cents
                FROM items
                WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ItemStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(ItemStoreError::ItemNotFound);
        };

        item_from_row(&row)
    }

    #[tracing::instrument(name = "Listing items from PostgreSQL", skip_all)]
    async fn list_items(&self) -> Result<Vec<Item>, ItemStoreError> {
        let rows = sqlx::query(
            r#"
                SELECT id, title, description, price_cents
                FROM items
                ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ItemStoreError::UnexpectedError(e.to_string()))?;

        rows.iter().map(item_from_row).collect()
    }
}
