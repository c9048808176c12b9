//! PostgreSQL store integration tests
//!
//! These exercise `PgDirectoryStore` against a real database.
//! Run with: `DATABASE_URL=... cargo test --test postgres_store_tests -- --ignored`

use std::sync::Arc;

use agent_directory::models::{
    Category, CreateReviewRequest, NewAgent, NewReview, VoteDirection,
};
use agent_directory::{DirectoryStore, PgDirectoryStore, RatingAggregate, ReviewService, StoreError};
use sqlx::PgPool;
use uuid::Uuid;

/// Helper to create a migrated store - returns None if no database is configured
async fn try_create_test_store() -> Option<PgDirectoryStore> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await
        .ok()?;

    let store = PgDirectoryStore::new(pool);
    store.migrate().await.ok()?;
    Some(store)
}

fn new_agent(category: Category) -> NewAgent {
    NewAgent {
        name: format!("test-agent-{}", &Uuid::new_v4().to_string()[..8]),
        description: "integration test agent".to_string(),
        category,
        github_url: None,
        mcp_endpoint: None,
        user_id: None,
    }
}

/// Remove a test agent; its reviews and saves cascade
async fn cleanup_agent(pool: &PgPool, agent_id: Uuid) {
    let _ = sqlx::query("DELETE FROM agents WHERE id = $1")
        .bind(agent_id)
        .execute(pool)
        .await;
}

#[tokio::test]
#[ignore = "Requires database connection - run with: cargo test -- --ignored"]
async fn insert_and_fetch_agent() {
    let Some(store) = try_create_test_store().await else {
        eprintln!("Skipping test: database not available");
        return;
    };

    let agent = store
        .insert_agent(new_agent(Category::CustomerService))
        .await
        .unwrap();
    assert_eq!((agent.upvotes, agent.downvotes, agent.total_reviews), (0, 0, 0));
    assert_eq!(agent.avg_rating, None);

    let fetched = store.get_agent(agent.id).await.unwrap().unwrap();
    assert_eq!(fetched.category, Category::CustomerService);
    assert_eq!(fetched.name, agent.name);

    let listed = store
        .list_agents(Some(Category::CustomerService))
        .await
        .unwrap();
    assert!(listed.iter().any(|a| a.id == agent.id));
    assert!(listed.iter().all(|a| a.category == Category::CustomerService));
    assert!(listed.windows(2).all(|w| w[0].created_at >= w[1].created_at));

    cleanup_agent(store.pool(), agent.id).await;
}

#[tokio::test]
#[ignore = "Requires database connection - run with: cargo test -- --ignored"]
async fn concurrent_votes_are_not_lost() {
    let Some(store) = try_create_test_store().await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let store = Arc::new(store);

    let agent = store.insert_agent(new_agent(Category::Other)).await.unwrap();

    let handles: Vec<_> = (0..25)
        .map(|_| {
            let store = store.clone();
            let id = agent.id;
            tokio::spawn(async move { store.increment_vote(id, VoteDirection::Up).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let refreshed = store.get_agent(agent.id).await.unwrap().unwrap();
    assert_eq!(refreshed.upvotes, 25);
    assert_eq!(refreshed.downvotes, 0);

    let missing = store
        .increment_vote(Uuid::new_v4(), VoteDirection::Down)
        .await
        .unwrap();
    assert!(missing.is_none());

    cleanup_agent(store.pool(), agent.id).await;
}

#[tokio::test]
#[ignore = "Requires database connection - run with: cargo test -- --ignored"]
async fn concurrent_reviews_produce_consistent_aggregate() {
    let Some(store) = try_create_test_store().await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let store = Arc::new(store);
    let agent = store.insert_agent(new_agent(Category::Research)).await.unwrap();

    let ratings: [i64; 8] = [1, 2, 3, 4, 5, 5, 4, 3];
    let handles: Vec<_> = ratings
        .into_iter()
        .map(|rating| {
            let service = ReviewService::new(store.clone());
            let id = agent.id;
            tokio::spawn(async move {
                service
                    .create(
                        id,
                        CreateReviewRequest {
                            user_id: Some("u".to_string()),
                            user_name: Some("User".to_string()),
                            rating: Some(rating),
                            content: Some("concurrent".to_string()),
                        },
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let expected = RatingAggregate::from_ratings(&[1, 2, 3, 4, 5, 5, 4, 3]);
    let refreshed = store.get_agent(agent.id).await.unwrap().unwrap();
    assert_eq!(refreshed.total_reviews, expected.total_reviews);
    assert_eq!(refreshed.avg_rating, expected.avg_rating);

    cleanup_agent(store.pool(), agent.id).await;
}

#[tokio::test]
#[ignore = "Requires database connection - run with: cargo test -- --ignored"]
async fn two_reviews_average_to_four_and_a_half() {
    let Some(store) = try_create_test_store().await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let agent = store.insert_agent(new_agent(Category::Coding)).await.unwrap();

    for rating in [4, 5] {
        store
            .insert_review(NewReview {
                agent_id: agent.id,
                user_id: "u".to_string(),
                user_name: "User".to_string(),
                rating,
                content: "solid".to_string(),
            })
            .await
            .unwrap();
    }

    let aggregate = store
        .refresh_rating_aggregate(agent.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(aggregate.avg_rating, Some(4.5));
    assert_eq!(aggregate.total_reviews, 2);

    let reviews = store.list_reviews(agent.id).await.unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews[0].created_at >= reviews[1].created_at);

    cleanup_agent(store.pool(), agent.id).await;
}

#[tokio::test]
#[ignore = "Requires database connection - run with: cargo test -- --ignored"]
async fn review_for_missing_agent_is_a_constraint_error() {
    let Some(store) = try_create_test_store().await else {
        eprintln!("Skipping test: database not available");
        return;
    };

    let result = store
        .insert_review(NewReview {
            agent_id: Uuid::new_v4(),
            user_id: "u".to_string(),
            user_name: "User".to_string(),
            rating: 3,
            content: "orphan".to_string(),
        })
        .await;
    assert!(matches!(result, Err(StoreError::Constraint(_))));
}

#[tokio::test]
#[ignore = "Requires database connection - run with: cargo test -- --ignored"]
async fn set_saved_keeps_a_single_row_per_pair() {
    let Some(store) = try_create_test_store().await else {
        eprintln!("Skipping test: database not available");
        return;
    };
    let agent = store
        .insert_agent(new_agent(Category::Productivity))
        .await
        .unwrap();

    store.set_saved(agent.id, "u1", true).await.unwrap();
    store.set_saved(agent.id, "u1", true).await.unwrap();
    assert!(store.is_saved(agent.id, "u1").await.unwrap());
    assert!(!store.is_saved(agent.id, "u2").await.unwrap());

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM saved_agents WHERE agent_id = $1 AND user_id = $2",
    )
    .bind(agent.id)
    .bind("u1")
    .fetch_one(store.pool())
    .await
    .unwrap();
    assert_eq!(rows, 1);

    store.set_saved(agent.id, "u1", false).await.unwrap();
    assert!(!store.is_saved(agent.id, "u1").await.unwrap());

    cleanup_agent(store.pool(), agent.id).await;
}
