use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::config::DbConfig;
use crate::model::Item;

use super::sink::FeedSink;
use super::types::SinkError;

const INSERT_COLUMNS: &str = "INSERT INTO feed \
    (time, md5, source_name, parsed, title, description, full_text, link, enclosure, category) ";

/// Only display fields refresh on a link conflict; time, md5,
/// source_name, link, enclosure and parsed are immutable after the
/// first insert.
const ON_CONFLICT: &str = " ON CONFLICT (link) DO UPDATE SET \
    title = EXCLUDED.title, \
    description = EXCLUDED.description, \
    full_text = EXCLUDED.full_text, \
    category = EXCLUDED.category";

const UPDATE_BY_MD5: &str = "UPDATE feed \
    SET title = $1, description = $2, full_text = $3, link = $4, enclosure = $5, category = $6 \
    WHERE md5 = $7";

/// Feed sink backed by a PostgreSQL connection pool.
pub struct PostgresSink {
    pool: PgPool,
}

impl PostgresSink {
    /// Connects the pool. Failure here is fatal to startup.
    pub async fn connect(config: &DbConfig) -> Result<Self, SinkError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .max_lifetime(config.connection_max_lifetime)
            .connect(&config.url())
            .await?;

        Ok(Self { pool })
    }

    /// Wraps an already-connected pool.
    pub fn with_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedSink for PostgresSink {
    async fn upsert_batch(&self, items: &[Item]) -> Result<(), SinkError> {
        let unique = dedup_by_link(items);
        if unique.is_empty() {
            return Ok(());
        }

        let mut query = build_upsert(&unique);
        query.build().execute(&self.pool).await?;

        debug!(received = items.len(), written = unique.len(), "batch upserted");
        Ok(())
    }

    async fn update_by_hash(&self, item: &Item) -> Result<(), SinkError> {
        let result = sqlx::query(UPDATE_BY_MD5)
            .bind(&item.title)
            .bind(&item.description)
            .bind(&item.full_text)
            .bind(&item.link)
            .bind(&item.enclosure)
            .bind(&item.category)
            .bind(&item.md5)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(SinkError::NoMatch(item.md5.clone()));
        }
        Ok(())
    }
}

/// Collapses items sharing a `link` to the last arrival, keeping the
/// position of the first occurrence so batch order stays stable.
pub(crate) fn dedup_by_link(items: &[Item]) -> Vec<&Item> {
    let mut slot_by_link: HashMap<&str, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<&Item> = Vec::with_capacity(items.len());

    for item in items {
        match slot_by_link.entry(item.link.as_str()) {
            Entry::Occupied(slot) => unique[*slot.get()] = item,
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(item);
            }
        }
    }

    unique
}

/// Builds the multi-row insert with the conflict clause appended.
pub(crate) fn build_upsert<'a>(items: &'a [&'a Item]) -> QueryBuilder<'a, Postgres> {
    let mut query: QueryBuilder<'a, Postgres> = QueryBuilder::new(INSERT_COLUMNS);

    query.push_values(items, |mut row, item| {
        row.push_bind(item.pub_date.as_str())
            .push_bind(item.md5.as_str())
            .push_bind(item.source_name.as_str())
            // parsed is owned by downstream jobs; always start false
            .push_bind(false)
            .push_bind(item.title.as_str())
            .push_bind(item.description.as_str())
            .push_bind(item.full_text.as_str())
            .push_bind(item.link.as_str())
            .push_bind(item.enclosure.as_str())
            .push_bind(item.category.as_str());
    });
    query.push(ON_CONFLICT);

    query
}
