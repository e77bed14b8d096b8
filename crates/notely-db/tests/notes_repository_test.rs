//! Integration tests for the note and category repositories.
//!
//! These require a live PostgreSQL instance (see
//! `test_fixtures::DEFAULT_TEST_DATABASE_URL`); run with `cargo test -- --ignored`.

use notely_core::{
    CategoryRepository, CreateCategoryRequest, CreateNoteRequest, Error, NoteRepository,
    UpdateNoteRequest,
};
use notely_db::test_fixtures::TestDatabase;

#[tokio::test]
#[ignore] // requires live database
async fn test_create_note_without_category_creates_default() {
    let test_db = TestDatabase::new().await;
    let user = test_db.create_user("default-cat").await;

    let note = test_db
        .db
        .notes
        .insert(
            user.id,
            CreateNoteRequest {
                title: "First note".to_string(),
                content: Some("hello".to_string()),
                category_id: None,
            },
        )
        .await
        .expect("insert should succeed");

    let categories = test_db.db.categories.list(user.id).await.unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "General");
    assert_eq!(categories[0].color, "#3b82f6");
    assert_eq!(note.category_id, categories[0].id);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // requires live database
async fn test_create_note_uses_first_existing_category() {
    let test_db = TestDatabase::new().await;
    let user = test_db.create_user("first-cat").await;

    // "Alpha" sorts before "Beta"; the fallback must pick it.
    for (name, color) in [("Beta", "#222222"), ("Alpha", "#111111")] {
        test_db
            .db
            .categories
            .insert(
                user.id,
                CreateCategoryRequest {
                    name: name.to_string(),
                    color: color.to_string(),
                },
            )
            .await
            .unwrap();
    }

    let note = test_db
        .db
        .notes
        .insert(
            user.id,
            CreateNoteRequest {
                title: "Uncategorized".to_string(),
                content: None,
                category_id: None,
            },
        )
        .await
        .unwrap();

    let fetched = test_db.db.notes.fetch(user.id, note.id).await.unwrap();
    assert_eq!(fetched.category.name, "Alpha");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // requires live database
async fn test_update_and_delete_are_owner_scoped() {
    let test_db = TestDatabase::new().await;
    let owner = test_db.create_user("owner").await;
    let intruder = test_db.create_user("intruder").await;

    let note = test_db
        .db
        .notes
        .insert(
            owner.id,
            CreateNoteRequest {
                title: "Private".to_string(),
                content: Some("secret".to_string()),
                category_id: None,
            },
        )
        .await
        .unwrap();

    // Another user updating or deleting by id must see NotFound, and the
    // owner's row must be untouched.
    let update = test_db
        .db
        .notes
        .update(
            intruder.id,
            note.id,
            UpdateNoteRequest {
                title: Some("stolen".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(update, Err(Error::NoteNotFound(_))));

    let delete = test_db.db.notes.delete(intruder.id, note.id).await;
    assert!(matches!(delete, Err(Error::NoteNotFound(_))));

    let fetched = test_db.db.notes.fetch(owner.id, note.id).await.unwrap();
    assert_eq!(fetched.note.title, "Private");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // requires live database
async fn test_list_orders_pinned_then_newest_updated() {
    let test_db = TestDatabase::new().await;
    let user = test_db.create_user("ordering").await;

    let mut ids = Vec::new();
    for title in ["one", "two", "three"] {
        let note = test_db
            .db
            .notes
            .insert(
                user.id,
                CreateNoteRequest {
                    title: title.to_string(),
                    content: None,
                    category_id: None,
                },
            )
            .await
            .unwrap();
        ids.push(note.id);
    }

    // Pin the oldest; touch the middle one so it is the newest-updated.
    test_db
        .db
        .notes
        .update(
            user.id,
            ids[0],
            UpdateNoteRequest {
                is_pinned: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    test_db
        .db
        .notes
        .update(
            user.id,
            ids[1],
            UpdateNoteRequest {
                content: Some(Some("touched".to_string())),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = test_db.db.notes.list(user.id).await.unwrap();
    let titles: Vec<&str> = listed.iter().map(|n| n.note.title.as_str()).collect();
    assert_eq!(titles, vec!["one", "two", "three"]);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore] // requires live database
async fn test_duplicate_category_name_conflicts() {
    let test_db = TestDatabase::new().await;
    let user = test_db.create_user("dup-cat").await;

    let req = CreateCategoryRequest {
        name: "Work".to_string(),
        color: "#ff0000".to_string(),
    };
    test_db
        .db
        .categories
        .insert(user.id, req.clone())
        .await
        .unwrap();

    let second = test_db.db.categories.insert(user.id, req).await;
    assert!(matches!(second, Err(Error::Conflict(_))));

    test_db.cleanup().await;
}
