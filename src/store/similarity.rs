use rusqlite::{Connection, OptionalExtension, params};

use crate::model::{MovieId, NeighborRecord};
use crate::recommend::{NeighborLookup, RecommendError};

pub struct SqliteSimilarityIndex<'conn> {
    connection: &'conn Connection,
}

impl<'conn> SqliteSimilarityIndex<'conn> {
    pub fn new(connection: &'conn Connection) -> Self {
        Self { connection }
    }

    fn load(&self, item_id: MovieId) -> rusqlite::Result<Option<Vec<NeighborRecord>>> {
        let indexed = self
            .connection
            .query_row(
                "SELECT 1 FROM similarity_items WHERE movie_id = ?1",
                params![item_id],
                |row| row.get::<_, i64>(0),
            )
            .optional()?
            .is_some();
        if !indexed {
            return Ok(None);
        }

        let mut statement = self.connection.prepare_cached(
            "
            SELECT neighbor_id, title, poster_path, similarity_score
            FROM similar_movies
            WHERE movie_id = ?1
            ORDER BY position ASC
            ",
        )?;
        let mut rows = statement.query(params![item_id])?;
        let mut out = Vec::<NeighborRecord>::new();
        while let Some(row) = rows.next()? {
            out.push(NeighborRecord {
                neighbor_id: row.get(0)?,
                title: row.get(1)?,
                poster_path: row.get(2)?,
                similarity_score: row.get(3)?,
            });
        }

        Ok(Some(out))
    }
}

impl NeighborLookup for SqliteSimilarityIndex<'_> {
    fn neighbors(&self, item_id: MovieId) -> Result<Vec<NeighborRecord>, RecommendError> {
        match self.load(item_id) {
            Ok(Some(neighbors)) => Ok(neighbors),
            Ok(None) => Err(RecommendError::MissingSimilarityData { item_id }),
            Err(source) => Err(RecommendError::Index {
                item_id,
                source: Box::new(source),
            }),
        }
    }
}
