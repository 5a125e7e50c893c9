use rusqlite::Connection;

use super::schema::ensure_schema;
use super::*;
use crate::model::{MovieRef, NeighborRecord, SeedSelection, SimilarityEntry};
use crate::recommend::{NeighborLookup, RankingConfig, RecommendError, recommend};

fn memory_store() -> Connection {
    let connection = Connection::open_in_memory().expect("in-memory database should open");
    ensure_schema(&connection).expect("schema should apply");
    connection
}

fn neighbor(neighbor_id: i64, similarity_score: f64) -> NeighborRecord {
    NeighborRecord {
        neighbor_id,
        title: format!("Movie {neighbor_id}"),
        poster_path: Some(format!("/p{neighbor_id}.jpg")),
        similarity_score,
    }
}

fn entry(id: i64, similar: Vec<NeighborRecord>) -> SimilarityEntry {
    SimilarityEntry {
        id,
        title: format!("Movie {id}"),
        poster_path: Some(format!("/p{id}.jpg")),
        similar,
    }
}

#[test]
fn similarity_index_returns_neighbors_in_import_order() {
    let mut connection = memory_store();
    let rows = import_similarity(
        &mut connection,
        &[entry(1, vec![neighbor(3, 0.4), neighbor(2, 0.9)])],
    )
    .expect("import should succeed");
    assert_eq!(rows, 2);

    let index = SqliteSimilarityIndex::new(&connection);
    let neighbors = index.neighbors(1).expect("movie 1 is indexed");
    let ids: Vec<i64> = neighbors.iter().map(|value| value.neighbor_id).collect();
    assert_eq!(ids, vec![3, 2]);
    assert_eq!(neighbors[1].similarity_score, 0.9);
    assert_eq!(neighbors[1].poster_path.as_deref(), Some("/p2.jpg"));
}

#[test]
fn similarity_index_distinguishes_missing_from_empty() {
    let mut connection = memory_store();
    import_similarity(&mut connection, &[entry(5, Vec::new())]).expect("import should succeed");

    let index = SqliteSimilarityIndex::new(&connection);
    assert!(index.neighbors(5).expect("movie 5 is indexed").is_empty());
    assert!(matches!(
        index.neighbors(6),
        Err(RecommendError::MissingSimilarityData { item_id: 6 })
    ));
}

#[test]
fn reimport_replaces_previous_neighbor_list() {
    let mut connection = memory_store();
    import_similarity(&mut connection, &[entry(1, vec![neighbor(2, 0.9), neighbor(3, 0.8)])])
        .expect("first import should succeed");
    import_similarity(&mut connection, &[entry(1, vec![neighbor(4, 0.7)])])
        .expect("second import should succeed");

    let index = SqliteSimilarityIndex::new(&connection);
    let neighbors = index.neighbors(1).expect("movie 1 is indexed");
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].neighbor_id, 4);

    let counts = store_counts(&connection).expect("counts should load");
    assert_eq!(counts.indexed_items, 1);
    assert_eq!(counts.neighbor_rows, 1);
    assert_eq!(counts.movies, 4);
}

#[test]
fn top_list_keeps_order_and_feeds_catalog() {
    let mut connection = memory_store();
    let movies = vec![
        MovieRef {
            id: 20,
            title: "Second Best".to_string(),
            poster_path: None,
        },
        MovieRef {
            id: 10,
            title: "Best".to_string(),
            poster_path: Some("/best.jpg".to_string()),
        },
    ];
    import_top_list(&mut connection, &movies).expect("top list import should succeed");

    let loaded = load_top_list(&connection).expect("top list should load");
    assert_eq!(loaded, movies);

    let movie = catalog_movie(&connection, 10)
        .expect("catalog query should succeed")
        .expect("movie 10 should be in the catalog");
    assert_eq!(movie.title, "Best");
    assert!(catalog_movie(&connection, 99).unwrap().is_none());
}

#[test]
fn neighbor_rows_do_not_overwrite_catalog_titles() {
    let mut connection = memory_store();
    import_top_list(
        &mut connection,
        &[MovieRef {
            id: 2,
            title: "Canonical".to_string(),
            poster_path: None,
        }],
    )
    .unwrap();
    import_similarity(&mut connection, &[entry(1, vec![neighbor(2, 0.5)])]).unwrap();

    let movie = catalog_movie(&connection, 2).unwrap().unwrap();
    assert_eq!(movie.title, "Canonical");
}

#[test]
fn users_persist_selection_and_visits() {
    let mut connection = memory_store();
    let user = create_user(&connection).expect("user should be created");
    assert_eq!(user.test_group, "A");
    assert!(user.selected_movies.is_empty());

    let picks = vec![
        SeedSelection {
            item_id: 7,
            title: "Seven".to_string(),
            poster_path: None,
        },
        SeedSelection {
            item_id: 3,
            title: "Three".to_string(),
            poster_path: Some("/three.jpg".to_string()),
        },
    ];
    replace_selection(&mut connection, user.user_id, &picks).expect("selection should persist");
    record_visit(&connection, user.user_id, "/select").expect("visit should persist");

    let found = find_user(&connection, user.user_id)
        .expect("lookup should succeed")
        .expect("user should exist");
    assert_eq!(found.selected_movies, picks);
    assert!(find_user(&connection, user.user_id + 100).unwrap().is_none());

    replace_selection(&mut connection, user.user_id, &picks[1..]).unwrap();
    assert_eq!(load_selection(&connection, user.user_id).unwrap(), picks[1..].to_vec());

    let counts = store_counts(&connection).unwrap();
    assert_eq!(counts.users, 1);
    assert_eq!(counts.visits, 1);
}

#[test]
fn recommend_runs_against_sqlite_index() {
    let mut connection = memory_store();
    import_similarity(&mut connection, &[entry(1, vec![neighbor(2, 0.9), neighbor(3, 0.5)])])
        .unwrap();
    let seeds = vec![SeedSelection {
        item_id: 1,
        title: "Movie 1".to_string(),
        poster_path: None,
    }];

    let index = SqliteSimilarityIndex::new(&connection);
    let result = recommend(&seeds, &index, &RankingConfig::default()).expect("ranking should work");

    let ids: Vec<i64> = result.ranked_list.iter().map(|value| value.movie.id).collect();
    assert_eq!(ids, vec![2, 3]);
    assert!((result.ranked_list[0].weighted_rating - 0.8).abs() < 1e-9);
}

#[test]
fn metadata_records_schema_version() {
    let connection = memory_store();
    record_import_metadata(&connection, "similarity_sha256", "abc").unwrap();

    assert_eq!(
        load_metadata(&connection, "similarity_sha256").unwrap().as_deref(),
        Some("abc")
    );
    assert!(load_metadata(&connection, "db_schema_version").unwrap().is_some());
    assert!(load_metadata(&connection, "missing").unwrap().is_none());
}
