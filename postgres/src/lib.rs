//! `PostgreSQL` booking store for Musebook.
//!
//! Implements the `BookingStore` trait from `musebook-core` on a sqlx
//! connection pool. A materialized booking is written as one transaction:
//! the booking row plus one ticket row per visitor, commit-or-rollback.
//!
//! Queries are built at runtime (no `sqlx::query!` macros) so the crate
//! compiles without a live `DATABASE_URL`.
//!
//! # Example
//!
//! ```ignore
//! use musebook_postgres::PostgresBookingStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresBookingStore::connect("postgres://localhost/museum_tickets", 10).await?;
//!     store.ensure_schema().await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use musebook_core::error::StorageError;
use musebook_core::storage::BookingStore;
use musebook_core::types::Booking;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

/// One booking header per completed purchase.
const CREATE_BOOKINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS bookings (
    booking_id BIGINT PRIMARY KEY,
    visit_date DATE NOT NULL,
    booking_date TIMESTAMPTZ NOT NULL,
    total_quantity BIGINT NOT NULL,
    total_price BIGINT NOT NULL,
    transaction_id TEXT NOT NULL,
    email TEXT NOT NULL
)
";

/// One row per ticket, referencing its booking.
const CREATE_TICKETS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS tickets (
    ticket_id BIGINT PRIMARY KEY,
    booking_id BIGINT NOT NULL REFERENCES bookings(booking_id),
    name TEXT NOT NULL,
    age BIGINT NOT NULL,
    ticket_type TEXT NOT NULL,
    price BIGINT NOT NULL
)
";

const INSERT_BOOKING: &str = r"
INSERT INTO bookings
    (booking_id, visit_date, booking_date, total_quantity, total_price, transaction_id, email)
VALUES ($1, $2, $3, $4, $5, $6, $7)
";

const INSERT_TICKET: &str = r"
INSERT INTO tickets
    (ticket_id, booking_id, name, age, ticket_type, price)
VALUES ($1, $2, $3, $4, $5, $6)
";

/// `PostgreSQL`-backed booking store.
#[derive(Clone, Debug)]
pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    /// Connect a new pool to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the pool cannot be established.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|e| StorageError::Database(format!("failed to connect: {e}")))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the bookings and tickets tables if they do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if either DDL statement fails.
    pub async fn ensure_schema(&self) -> Result<(), StorageError> {
        for ddl in [CREATE_BOOKINGS_TABLE, CREATE_TICKETS_TABLE] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::Database(format!("failed to create schema: {e}")))?;
        }
        info!("booking schema ready");
        Ok(())
    }

    /// Round-trip a trivial query, for readiness probes.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the database is unreachable.
    pub async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::Database(format!("database unreachable: {e}")))?;
        Ok(())
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn save(&self, booking: &Booking) -> Result<(), StorageError> {
        // The transaction rolls back on drop if any insert fails, so an
        // early return never leaves partial rows behind.
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Database(format!("failed to start transaction: {e}")))?;

        let booking_id = i64::from(booking.booking_id.get());
        let quantity = i64::try_from(booking.quantity())
            .map_err(|e| StorageError::Database(format!("ticket count out of range: {e}")))?;

        sqlx::query(INSERT_BOOKING)
            .bind(booking_id)
            .bind(booking.visit_date)
            .bind(booking.booking_date)
            .bind(quantity)
            .bind(i64::from(booking.total_price.amount()))
            .bind(&booking.transaction_id)
            .bind(&booking.email)
            .execute(&mut *tx)
            .await
            .map_err(|e| StorageError::Database(format!("failed to insert booking: {e}")))?;
        debug!(%booking_id, "inserted booking row");

        for ticket in &booking.tickets {
            sqlx::query(INSERT_TICKET)
                .bind(i64::from(ticket.ticket_id.get()))
                .bind(booking_id)
                .bind(&ticket.name)
                .bind(i64::from(ticket.age))
                .bind(ticket.category.label())
                .bind(i64::from(ticket.price.amount()))
                .execute(&mut *tx)
                .await
                .map_err(|e| StorageError::Database(format!("failed to insert ticket: {e}")))?;
            debug!(ticket_id = %ticket.ticket_id, "inserted ticket row");
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::Database(format!("failed to commit transaction: {e}")))?;

        Ok(())
    }
}
