use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};

use crate::data::models::{ReviewCard, ReviewCardRow, SrsResult};
use crate::data::repositories::CardRepository;
use crate::schema::review_cards;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const SCHEMA_SQL: &str = include_str!("../../../migrations/schema.sql");

// Pooled SQLite connections wait on each other instead of failing with SQLITE_BUSY
#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000; PRAGMA foreign_keys = ON;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool and makes sure the card table exists
pub fn connect(database_url: &str, pool_size: u32) -> SrsResult<DbPool> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(pool_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;

    let mut conn = pool.get()?;
    conn.batch_execute(SCHEMA_SQL)?;

    Ok(pool)
}

pub struct SqliteCardRepository {
    pool: DbPool,
}

impl SqliteCardRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CardRepository for SqliteCardRepository {
    fn get(&self, card_id: &str) -> SrsResult<Option<ReviewCard>> {
        let mut conn = self.pool.get()?;

        let row = review_cards::table
            .filter(review_cards::card_id.eq(card_id))
            .select(ReviewCardRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(ReviewCard::try_from).transpose()
    }

    fn put(&self, card: &ReviewCard) -> SrsResult<()> {
        let mut conn = self.pool.get()?;
        let row = ReviewCardRow::try_from(card)?;

        diesel::insert_into(review_cards::table)
            .values(&row)
            .on_conflict(review_cards::card_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(())
    }

    fn query_by_user(&self, user_id: &str) -> SrsResult<Vec<ReviewCard>> {
        let mut conn = self.pool.get()?;

        review_cards::table
            .filter(review_cards::user_id.eq(user_id))
            .order_by(review_cards::next_review.asc())
            .select(ReviewCardRow::as_select())
            .load(&mut conn)?
            .into_iter()
            .map(ReviewCard::try_from)
            .collect()
    }
}
