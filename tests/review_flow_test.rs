use versioned_catalog::endpoint::ReviewEndpoint;
use versioned_catalog::model::{ReviewCreate, ReviewEntry};
use versioned_catalog::review_store::{self, ReviewError};

/// Review endpoint backed by a real store actor.
fn spawn_endpoint() -> ReviewEndpoint {
    let (actor, client) = review_store::new();
    tokio::spawn(actor.run());
    ReviewEndpoint::new(client)
}

/// Two appenders race on a product that has no review yet. The store's
/// uniqueness probe makes the create atomic, so exactly one document comes
/// into existence and both entries end up in it.
#[tokio::test]
async fn test_racing_first_appends_produce_one_document() {
    let endpoint = spawn_endpoint();

    let a = {
        let endpoint = endpoint.clone();
        tokio::spawn(async move {
            endpoint
                .append_entry(7, ReviewEntry::new("a", "x"))
                .await
                .expect("append a")
        })
    };
    let b = {
        let endpoint = endpoint.clone();
        tokio::spawn(async move {
            endpoint
                .append_entry(7, ReviewEntry::new("b", "y"))
                .await
                .expect("append b")
        })
    };
    let (left, right) = (a.await.unwrap(), b.await.unwrap());

    // Both appenders were pointed at the same document.
    assert_eq!(left.body.id, right.body.id);

    let review = endpoint.get_by_product(7).await.unwrap().unwrap().body;
    assert_eq!(review.entries.len(), 2);
    assert_eq!(review.version.get(), 2);

    let mut usernames: Vec<&str> = review.entries.iter().map(|e| e.username.as_str()).collect();
    usernames.sort();
    assert_eq!(usernames, ["a", "b"]);
}

/// Creating a review outright works once per product; the second create is
/// rejected, not silently merged.
#[tokio::test]
async fn test_explicit_create_is_unique_per_product() {
    let endpoint = spawn_endpoint();

    let created = endpoint
        .create(ReviewCreate {
            product_id: 3,
            entries: vec![ReviewEntry::new("a", "x")],
        })
        .await
        .expect("first create");
    assert_eq!(created.body.version.get(), 1);
    assert_eq!(created.location, format!("/review/{}", created.body.id));

    let second = endpoint
        .create(ReviewCreate {
            product_id: 3,
            entries: vec![ReviewEntry::new("b", "y")],
        })
        .await;
    assert_eq!(second, Err(ReviewError::AlreadyExists(3)));

    // A different product is unaffected.
    let other = endpoint
        .create(ReviewCreate {
            product_id: 4,
            entries: vec![ReviewEntry::new("c", "z")],
        })
        .await;
    assert!(other.is_ok());
}

/// Deleting a review is terminal for that document; the next append starts
/// a fresh one at version 1.
#[tokio::test]
async fn test_delete_then_append_starts_over() {
    let endpoint = spawn_endpoint();

    let first = endpoint
        .append_entry(5, ReviewEntry::new("a", "x"))
        .await
        .unwrap();
    endpoint.delete(first.body.id.clone()).await.unwrap();
    assert!(endpoint.get(first.body.id.clone()).await.unwrap().is_none());

    let second = endpoint
        .append_entry(5, ReviewEntry::new("b", "y"))
        .await
        .unwrap();
    assert_ne!(second.body.id, first.body.id);
    assert_eq!(second.body.version.get(), 1);
    assert_eq!(second.body.entries.len(), 1);

    let missing = endpoint.delete(first.body.id.clone()).await;
    assert_eq!(missing, Err(ReviewError::NotFound(first.body.id)));
}
