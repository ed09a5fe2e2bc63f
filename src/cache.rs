// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use chrono::Local;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::sqlite::SqlitePool;
use std::time::Duration;
use tokio::sync::OnceCell;

use crate::api::RemoteSource;
use crate::error::CacheError;
use crate::models::{Country, Currencies, RatesResponse};

const CURRENCIES_KEY: &str = "currencies";
const COUNTRIES_KEY: &str = "countries";

/// Read-through cache over a [`RemoteSource`].
///
/// Currency and country metadata change rarely, so they are persisted in the
/// `kv_store` table (JSON-serialized, keyed by resource name) and survive
/// restarts. Exchange rates go stale quickly and live only in this value:
/// one fetch per `Cache`, never written to the store.
pub struct Cache<S> {
    source: S,
    pool: SqlitePool,
    max_age: Option<Duration>,
    rates: OnceCell<RatesResponse>,
}

impl<S: RemoteSource> Cache<S> {
    /// A cache without expiry: persisted entries are reused forever.
    pub fn new(source: S, pool: SqlitePool) -> Self {
        Self {
            source,
            pool,
            max_age: None,
            rates: OnceCell::new(),
        }
    }

    /// Persisted entries older than `max_age` are treated as misses and
    /// refetched.
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = Some(max_age);
        self
    }

    pub async fn get_currencies(&self) -> Result<Currencies, CacheError> {
        if let Some(currencies) = self.read_store(CURRENCIES_KEY).await? {
            return Ok(currencies);
        }

        let currencies = self.source.fetch_currencies().await?;
        self.write_store(CURRENCIES_KEY, &currencies).await?;
        Ok(currencies)
    }

    pub async fn get_countries(&self) -> Result<Vec<Country>, CacheError> {
        if let Some(countries) = self.read_store(COUNTRIES_KEY).await? {
            return Ok(countries);
        }

        let countries = self.source.fetch_countries().await?;
        self.write_store(COUNTRIES_KEY, &countries).await?;
        Ok(countries)
    }

    /// Rates are fetched at most once per `Cache` and never touch the store.
    pub async fn get_rates(&self) -> Result<RatesResponse, CacheError> {
        let rates = self
            .rates
            .get_or_try_init(|| async {
                self.source.fetch_rates().await.map_err(CacheError::Api)
            })
            .await?;
        Ok(rates.clone())
    }

    /// Fetch whatever is not cached yet. The three resources have no ordering
    /// dependency, so they are requested concurrently.
    pub async fn warm_up(&self) -> Result<(), CacheError> {
        tokio::try_join!(self.get_currencies(), self.get_countries(), self.get_rates())?;
        Ok(())
    }

    async fn read_store<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        let row = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT value, fetched_at
            FROM kv_store
            WHERE key = ?
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        let Some((value, fetched_at)) = row else {
            return Ok(None);
        };

        if let Some(max_age) = self.max_age {
            let age = Local::now().timestamp() - fetched_at;
            if age > max_age.as_secs() as i64 {
                return Ok(None);
            }
        }

        Ok(Some(serde_json::from_str(&value)?))
    }

    async fn write_store<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let value = serde_json::to_string(value)?;

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, fetched_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                fetched_at = excluded.fetched_at,
                updated_at = CURRENT_TIMESTAMP
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Local::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
