// Integration tests for the shared-list lifecycle across roles

mod common;

use shoplist_backend::errors::internal::ListError;
use shoplist_backend::policy::OwnershipError;

#[tokio::test]
async fn test_shared_grocery_list_lifecycle() {
    let app = common::setup_test_app().await;
    let alice = app.register("Alice", "password-a").await;
    let bob = app.register("Bob", "password-b").await;

    // Alice creates a list and shares it with Bob
    let list = app
        .list_service
        .create_list("Groceries".to_string(), &alice)
        .await
        .expect("list creation should succeed");

    app.list_service
        .add_member(&list.id, &bob.id, &alice)
        .await
        .expect("owner can add a member");

    // Bob, a member, adds an item
    let milk = app
        .list_service
        .create_item(&list.id, "Milk".to_string(), &bob)
        .await
        .expect("member can add items");
    assert_eq!(milk.added_by, bob.id);
    assert!(milk.solved_by.is_none());

    // Alice solves it on her way home
    let solved = app
        .list_service
        .update_item(&list.id, &milk.id, None, Some(alice.id.clone()), &alice)
        .await
        .expect("owner can update items");
    assert_eq!(solved.solved_by.as_deref(), Some(alice.id.as_str()));

    // Alice deletes the list; the item must go with it
    app.list_service
        .delete_list(&list.id, &alice)
        .await
        .expect("owner can delete the list");

    assert!(matches!(
        app.list_service.get_list(&list.id, &alice).await,
        Err(ListError::NotFound)
    ));
    assert!(app
        .item_store
        .find_for_list(&list.id)
        .await
        .expect("query should succeed")
        .is_empty());
}

#[tokio::test]
async fn test_non_member_standard_user_cannot_view_a_list() {
    let app = common::setup_test_app().await;
    let alice = app.register("Alice", "password-a").await;
    let carol = app.register("Carol", "password-c").await;

    let list = app
        .list_service
        .create_list("Private".to_string(), &alice)
        .await
        .expect("list creation should succeed");

    let result = app.list_service.get_list(&list.id, &carol).await;
    assert!(matches!(
        result,
        Err(ListError::Ownership(OwnershipError::NotOwnerOrMember))
    ));
}

#[tokio::test]
async fn test_executive_can_view_any_list() {
    let app = common::setup_test_app().await;
    let alice = app.register("Alice", "password-a").await;
    let exec = app.create_user_with_role("Erin", "Executive").await;

    let list = app
        .list_service
        .create_list("Groceries".to_string(), &alice)
        .await
        .expect("list creation should succeed");
    app.list_service
        .create_item(&list.id, "Milk".to_string(), &alice)
        .await
        .expect("item creation should succeed");

    let detail = app
        .list_service
        .get_list(&list.id, &exec)
        .await
        .expect("executives can view any list");
    assert_eq!(detail.list.id, list.id);
    assert_eq!(detail.items.len(), 1);

    let all_lists = app
        .list_service
        .get_lists(&exec)
        .await
        .expect("executives can list everything");
    assert_eq!(all_lists.len(), 1);
}

#[tokio::test]
async fn test_removed_member_loses_access() {
    let app = common::setup_test_app().await;
    let alice = app.register("Alice", "password-a").await;
    let bob = app.register("Bob", "password-b").await;

    let list = app
        .list_service
        .create_list("Groceries".to_string(), &alice)
        .await
        .expect("list creation should succeed");
    app.list_service
        .add_member(&list.id, &bob.id, &alice)
        .await
        .expect("owner can add a member");

    assert!(app.list_service.get_list(&list.id, &bob).await.is_ok());

    let members = app
        .list_service
        .remove_member(&list.id, &bob.id, &alice)
        .await
        .expect("owner can remove a member");
    assert!(members.is_empty());

    assert!(matches!(
        app.list_service.get_list(&list.id, &bob).await,
        Err(ListError::Ownership(OwnershipError::NotOwnerOrMember))
    ));
}

#[tokio::test]
async fn test_member_cannot_manage_the_list_itself() {
    let app = common::setup_test_app().await;
    let alice = app.register("Alice", "password-a").await;
    let bob = app.register("Bob", "password-b").await;
    let carol = app.register("Carol", "password-c").await;

    let list = app
        .list_service
        .create_list("Groceries".to_string(), &alice)
        .await
        .expect("list creation should succeed");
    app.list_service
        .add_member(&list.id, &bob.id, &alice)
        .await
        .expect("owner can add a member");

    // Management operations stay owner-only
    assert!(matches!(
        app.list_service.delete_list(&list.id, &bob).await,
        Err(ListError::Ownership(OwnershipError::NotOwner { .. }))
    ));
    assert!(matches!(
        app.list_service
            .update_list(&list.id, Some("Renamed".to_string()), None, &bob)
            .await,
        Err(ListError::Ownership(OwnershipError::NotOwner { .. }))
    ));
    assert!(matches!(
        app.list_service.add_member(&list.id, &carol.id, &bob).await,
        Err(ListError::Ownership(OwnershipError::NotOwner { .. }))
    ));

    // But item operations are open to members
    let item = app
        .list_service
        .create_item(&list.id, "Eggs".to_string(), &bob)
        .await
        .expect("member can add items");
    app.list_service
        .delete_item(&list.id, &item.id, &bob)
        .await
        .expect("member can delete items");
}

#[tokio::test]
async fn test_standard_user_sees_only_own_and_shared_lists() {
    let app = common::setup_test_app().await;
    let alice = app.register("Alice", "password-a").await;
    let bob = app.register("Bob", "password-b").await;

    let own = app
        .list_service
        .create_list("Mine".to_string(), &bob)
        .await
        .expect("list creation should succeed");
    let shared = app
        .list_service
        .create_list("Shared".to_string(), &alice)
        .await
        .expect("list creation should succeed");
    app.list_service
        .add_member(&shared.id, &bob.id, &alice)
        .await
        .expect("owner can add a member");
    app.list_service
        .create_list("Hidden".to_string(), &alice)
        .await
        .expect("list creation should succeed");

    let visible = app
        .list_service
        .get_lists(&bob)
        .await
        .expect("listing should succeed");

    let ids: Vec<&str> = visible.iter().map(|l| l.id.as_str()).collect();
    assert_eq!(visible.len(), 2);
    assert!(ids.contains(&own.id.as_str()));
    assert!(ids.contains(&shared.id.as_str()));
}
