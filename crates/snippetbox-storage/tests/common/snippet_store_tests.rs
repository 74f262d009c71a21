//! SnippetStore trait test suite

use chrono::{Duration, Utc};
use snippetbox_storage::{SnippetId, Storage, StorageError, LATEST_LIMIT};

/// Run all SnippetStore tests
pub async fn run_all<S: Storage>(storage: &S) {
    test_latest_on_empty_store(storage).await;
    test_get_unknown_id(storage).await;
    test_insert_then_get(storage).await;
    test_insert_assigns_increasing_ids(storage).await;
    test_zero_lifetime_is_invisible(storage).await;
    test_latest_ordering_and_cap(storage).await;
    test_latest_skips_expired_among_live(storage).await;
    test_reads_are_idempotent(storage).await;
    test_sql_metacharacters_round_trip(storage).await;
    test_multiline_unicode_content(storage).await;
}

/// Latest on a store with no live snippets is empty, not an error
pub async fn test_latest_on_empty_store<S: Storage>(storage: &S) {
    let latest = storage
        .latest()
        .await
        .expect("latest should succeed on an empty store");

    assert!(latest.is_empty(), "expected no snippets, got: {:?}", latest);
}

/// Get on an id that was never inserted is NotFound, not a storage failure
pub async fn test_get_unknown_id<S: Storage>(storage: &S) {
    let result = storage.get(SnippetId::new(9_999_999)).await;

    assert!(
        matches!(result, Err(StorageError::NotFound { .. })),
        "should return NotFound error, got: {:?}",
        result
    );
}

/// Insert followed by get returns the same record
pub async fn test_insert_then_get<S: Storage>(storage: &S) {
    let before = Utc::now() - Duration::minutes(1);

    let id = storage
        .insert(
            "An old silent pond",
            "An old silent pond...\nA frog jumps into the pond,\nsplash! Silence again.",
            7,
        )
        .await
        .expect("insert should succeed");

    let snippet = storage.get(id).await.expect("get should succeed");

    assert_eq!(snippet.id, id);
    assert_eq!(snippet.title, "An old silent pond");
    assert_eq!(
        snippet.content,
        "An old silent pond...\nA frog jumps into the pond,\nsplash! Silence again."
    );
    assert!(snippet.created >= before, "created should be about now");
    assert!(
        snippet.created <= Utc::now() + Duration::minutes(1),
        "created should be about now"
    );

    // Allow an hour of slack for daylight-saving shifts in the server zone
    let drift = (snippet.lifetime() - Duration::days(7)).num_seconds().abs();
    assert!(drift <= 3600, "expires should be created + 7 days");
    assert!(snippet.is_live_at(Utc::now()));
}

/// Ids grow with insertion order
pub async fn test_insert_assigns_increasing_ids<S: Storage>(storage: &S) {
    let first = storage.insert("first", "1", 1).await.expect("insert");
    let second = storage.insert("second", "2", 1).await.expect("insert");

    assert!(second > first, "{} should be greater than {}", second, first);
}

/// A zero-day lifetime expires immediately: hidden from get and latest
pub async fn test_zero_lifetime_is_invisible<S: Storage>(storage: &S) {
    let id = storage
        .insert("ephemeral", "gone before you read it", 0)
        .await
        .expect("insert with zero lifetime should succeed");

    let result = storage.get(id).await;
    assert!(
        matches!(result, Err(StorageError::NotFound { .. })),
        "expired snippet should be NotFound, got: {:?}",
        result
    );

    let latest = storage.latest().await.expect("latest should succeed");
    assert!(
        latest.iter().all(|s| s.id != id),
        "expired snippet should not be listed"
    );
}

/// Fifteen live inserts: latest returns the ten highest ids, descending
pub async fn test_latest_ordering_and_cap<S: Storage>(storage: &S) {
    let mut ids = Vec::with_capacity(15);
    for i in 0..15 {
        let id = storage
            .insert(&format!("Snippet {}", i), &format!("body {}", i), 30)
            .await
            .expect("insert should succeed");
        ids.push(id);
    }

    let latest = storage.latest().await.expect("latest should succeed");

    assert_eq!(latest.len(), LATEST_LIMIT as usize);

    let expected: Vec<SnippetId> = ids.iter().rev().take(10).copied().collect();
    let listed: Vec<SnippetId> = latest.iter().map(|s| s.id).collect();
    assert_eq!(listed, expected);

    assert!(
        listed.windows(2).all(|w| w[0] > w[1]),
        "latest should be sorted by id descending: {:?}",
        listed
    );
    assert_eq!(latest[0].title, "Snippet 14");
    assert_eq!(latest[9].title, "Snippet 5");
}

/// Expired snippets with high ids do not take a slot in latest
pub async fn test_latest_skips_expired_among_live<S: Storage>(storage: &S) {
    let live = storage.insert("live", "stays", 1).await.expect("insert");
    let expired = storage.insert("expired", "goes", 0).await.expect("insert");

    let latest = storage.latest().await.expect("latest should succeed");

    assert_eq!(latest.len(), LATEST_LIMIT as usize);
    assert_eq!(latest[0].id, live);
    assert!(latest.iter().all(|s| s.id != expired));

    let now = Utc::now();
    assert!(latest.iter().all(|s| s.is_live_at(now)));
}

/// Repeated reads without writes return identical results
pub async fn test_reads_are_idempotent<S: Storage>(storage: &S) {
    let id = storage
        .insert("repeatable", "same every time", 3)
        .await
        .expect("insert");

    let first = storage.get(id).await.expect("get");
    let second = storage.get(id).await.expect("get");
    assert_eq!(first, second);

    let first = storage.latest().await.expect("latest");
    let second = storage.latest().await.expect("latest");
    assert_eq!(first, second);
}

/// Text that looks like SQL is stored verbatim
pub async fn test_sql_metacharacters_round_trip<S: Storage>(storage: &S) {
    let title = "Robert'); DROP TABLE snippets;--";
    let content = "' OR '1'='1\n$1 ?1 %s \\ \"quoted\"";

    let id = storage.insert(title, content, 1).await.expect("insert");
    let snippet = storage.get(id).await.expect("get");

    assert_eq!(snippet.title, title);
    assert_eq!(snippet.content, content);

    // Table is still there
    storage.latest().await.expect("latest should still work");
}

/// Multi-line and non-ASCII content survives unchanged
pub async fn test_multiline_unicode_content<S: Storage>(storage: &S) {
    let content = "古池や\n蛙飛び込む\n水の音\n\n— Matsuo Bashō";

    let id = storage.insert("古池", content, 365).await.expect("insert");
    let snippet = storage.get(id).await.expect("get");

    assert_eq!(snippet.title, "古池");
    assert_eq!(snippet.content, content);
}
