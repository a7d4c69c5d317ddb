use std::sync::Arc;

use crate::errors::internal::ListError;
use crate::errors::InternalError;
use crate::policy::ownership::{self, ListAction};
use crate::services::cascade::CascadeService;
use crate::stores::{ItemStore, ListStore, UserStore};
use crate::types::db::{item, shopping_list, user};
use crate::types::internal::{Role, SessionUser};

/// A list with its owner, member and item records resolved,
/// ready to be rendered as a detail response.
pub struct ListDetail {
    pub list: shopping_list::Model,
    pub owner: user::Model,
    pub members: Vec<user::Model>,
    pub items: Vec<item::Model>,
}

/// All list and item operations, gated by the ownership rules.
///
/// Every operation loads the target list first, then authorizes the actor
/// against the capability table, and only then mutates.
pub struct ListService {
    list_store: Arc<ListStore>,
    item_store: Arc<ItemStore>,
    user_store: Arc<UserStore>,
    cascade: Arc<CascadeService>,
}

impl ListService {
    pub fn new(
        list_store: Arc<ListStore>,
        item_store: Arc<ItemStore>,
        user_store: Arc<UserStore>,
        cascade: Arc<CascadeService>,
    ) -> Self {
        Self {
            list_store,
            item_store,
            user_store,
            cascade,
        }
    }

    pub async fn create_list(
        &self,
        name: String,
        owner: &SessionUser,
    ) -> Result<shopping_list::Model, ListError> {
        let list = self.list_store.create(name, owner.id.clone()).await?;
        tracing::info!(list_id = %list.id, owner_id = %owner.id, "list created");
        Ok(list)
    }

    /// Listing is query-scoped rather than predicate-checked: StandardUsers
    /// see lists they own or belong to, Executives and Authorities see all.
    pub async fn get_lists(
        &self,
        actor: &SessionUser,
    ) -> Result<Vec<shopping_list::Model>, ListError> {
        let role = Role::parse(&actor.role)
            .ok_or_else(|| ownership::OwnershipError::UnknownRole(actor.role.clone()))?;

        if role.has_full_list_access() {
            Ok(self.list_store.find_all().await?)
        } else {
            Ok(self.list_store.find_for_user(&actor.id).await?)
        }
    }

    pub async fn get_list(
        &self,
        list_id: &str,
        actor: &SessionUser,
    ) -> Result<ListDetail, ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::View).await?;

        let owner = self
            .user_store
            .find_by_id(&list.owner_id)
            .await?
            .ok_or_else(|| {
                InternalError::Integrity(format!("list {} owner {} missing", list.id, list.owner_id))
            })?;

        let member_ids = self.list_store.member_ids(&list.id).await?;
        let member_records = self.user_store.find_many_by_ids(&member_ids).await?;
        // Preserve membership order; drop dangling references
        let members = member_ids
            .iter()
            .filter_map(|id| member_records.iter().find(|u| &u.id == id).cloned())
            .collect();

        let items = self.item_store.find_for_list(&list.id).await?;

        Ok(ListDetail {
            list,
            owner,
            members,
            items,
        })
    }

    /// Delete a list and, through the cascade service, all of its items.
    pub async fn delete_list(&self, list_id: &str, actor: &SessionUser) -> Result<(), ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::Delete).await?;

        self.cascade.delete_list(&list.id).await?;
        Ok(())
    }

    pub async fn update_list(
        &self,
        list_id: &str,
        name: Option<String>,
        is_archived: Option<bool>,
        actor: &SessionUser,
    ) -> Result<shopping_list::Model, ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::Update).await?;

        Ok(self.list_store.update_fields(list, name, is_archived).await?)
    }

    /// Add a member; the target user must exist in the store.
    pub async fn add_member(
        &self,
        list_id: &str,
        target_user_id: &str,
        actor: &SessionUser,
    ) -> Result<Vec<String>, ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::AddMember).await?;

        if self.user_store.find_by_id(target_user_id).await?.is_none() {
            return Err(ListError::MemberNotFound);
        }

        self.list_store.add_member(&list.id, target_user_id).await?;
        Ok(self.list_store.member_ids(&list.id).await?)
    }

    /// Remove a member; the target must currently be a member.
    pub async fn remove_member(
        &self,
        list_id: &str,
        member_id: &str,
        actor: &SessionUser,
    ) -> Result<Vec<String>, ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::RemoveMember).await?;

        if !self.list_store.is_member(&list.id, member_id).await? {
            return Err(ListError::NotAMember);
        }

        self.list_store.remove_member(&list.id, member_id).await?;
        Ok(self.list_store.member_ids(&list.id).await?)
    }

    pub async fn create_item(
        &self,
        list_id: &str,
        name: String,
        actor: &SessionUser,
    ) -> Result<item::Model, ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::CreateItem).await?;

        let item = self
            .item_store
            .create(list.id.clone(), name, actor.id.clone())
            .await?;
        Ok(item)
    }

    /// Update an item's name and/or solved marker. An empty `solved_by`
    /// clears the marker; `added_by` is never touched.
    pub async fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        name: Option<String>,
        solved_by: Option<String>,
        actor: &SessionUser,
    ) -> Result<item::Model, ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::UpdateItem).await?;

        let item = self
            .item_store
            .find_in_list(&list.id, item_id)
            .await?
            .ok_or(ListError::ItemNotInList)?;

        let solved_by = solved_by.map(|solver| {
            if solver.is_empty() {
                None
            } else {
                Some(solver)
            }
        });

        Ok(self.item_store.update_fields(item, name, solved_by).await?)
    }

    /// Delete an item, returning the ids of the items still in the list.
    pub async fn delete_item(
        &self,
        list_id: &str,
        item_id: &str,
        actor: &SessionUser,
    ) -> Result<Vec<String>, ListError> {
        let list = self.load_list(list_id).await?;
        self.authorize(&list, actor, ListAction::DeleteItem).await?;

        let item = self
            .item_store
            .find_in_list(&list.id, item_id)
            .await?
            .ok_or(ListError::ItemNotInList)?;

        self.item_store.delete(&item.id).await?;

        let remaining = self.item_store.find_for_list(&list.id).await?;
        Ok(remaining.into_iter().map(|i| i.id).collect())
    }

    async fn load_list(&self, list_id: &str) -> Result<shopping_list::Model, ListError> {
        self.list_store
            .find_by_id(list_id)
            .await?
            .ok_or(ListError::NotFound)
    }

    async fn authorize(
        &self,
        list: &shopping_list::Model,
        actor: &SessionUser,
        action: ListAction,
    ) -> Result<(), ListError> {
        let is_owner = list.owner_id == actor.id;
        let is_member = if is_owner {
            false
        } else {
            self.list_store.is_member(&list.id, &actor.id).await?
        };
        ownership::authorize(&actor.role, action, is_owner, is_member)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::OwnershipError;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    struct Fixture {
        service: ListService,
        list_store: Arc<ListStore>,
        item_store: Arc<ItemStore>,
        user_store: Arc<UserStore>,
    }

    async fn setup() -> Fixture {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let user_store = Arc::new(UserStore::new(db.clone()));
        let list_store = Arc::new(ListStore::new(db.clone()));
        let item_store = Arc::new(ItemStore::new(db));
        let cascade = Arc::new(CascadeService::new(list_store.clone(), item_store.clone()));
        let service = ListService::new(
            list_store.clone(),
            item_store.clone(),
            user_store.clone(),
            cascade,
        );

        Fixture {
            service,
            list_store,
            item_store,
            user_store,
        }
    }

    impl Fixture {
        async fn create_user(&self, name: &str, role: &str) -> SessionUser {
            let user = self
                .user_store
                .create(
                    name.to_string(),
                    format!("{}@example.com", name.to_lowercase()),
                    "hash".to_string(),
                    role.to_string(),
                )
                .await
                .expect("user creation should succeed");
            SessionUser::from_user(&user)
        }
    }

    fn is_not_owner(result: &Result<impl Sized, ListError>) -> bool {
        matches!(
            result,
            Err(ListError::Ownership(OwnershipError::NotOwner { .. }))
        )
    }

    fn is_denied(result: &Result<impl Sized, ListError>) -> bool {
        matches!(
            result,
            Err(ListError::Ownership(OwnershipError::NotOwnerOrMember))
        )
    }

    #[tokio::test]
    async fn test_creator_becomes_owner() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;

        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();

        assert_eq!(list.owner_id, alice.id);
    }

    #[tokio::test]
    async fn test_stranger_is_denied_every_operation_on_foreign_list() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let carol = fx.create_user("Carol", "StandardUser").await;

        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();
        let item = fx
            .item_store
            .create(list.id.clone(), "Milk".to_string(), alice.id.clone())
            .await
            .unwrap();

        assert!(is_denied(&fx.service.get_list(&list.id, &carol).await));
        assert!(is_not_owner(&fx.service.delete_list(&list.id, &carol).await.map(|_| ())));
        assert!(is_not_owner(
            &fx.service.update_list(&list.id, Some("X".to_string()), None, &carol).await
        ));
        assert!(is_not_owner(
            &fx.service.add_member(&list.id, &carol.id, &carol).await
        ));
        assert!(is_not_owner(
            &fx.service.remove_member(&list.id, &carol.id, &carol).await
        ));
        assert!(is_denied(
            &fx.service.create_item(&list.id, "Eggs".to_string(), &carol).await
        ));
        assert!(is_denied(
            &fx.service.update_item(&list.id, &item.id, Some("X".to_string()), None, &carol).await
        ));
        assert!(is_denied(&fx.service.delete_item(&list.id, &item.id, &carol).await));
    }

    #[tokio::test]
    async fn test_member_can_touch_items_but_not_manage_the_list() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let bob = fx.create_user("Bob", "StandardUser").await;

        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();
        fx.service.add_member(&list.id, &bob.id, &alice).await.unwrap();

        // Item operations succeed for the member
        let item = fx
            .service
            .create_item(&list.id, "Milk".to_string(), &bob)
            .await
            .unwrap();
        assert_eq!(item.added_by, bob.id);

        let updated = fx
            .service
            .update_item(&list.id, &item.id, None, Some(bob.id.clone()), &bob)
            .await
            .unwrap();
        assert_eq!(updated.solved_by.as_deref(), Some(bob.id.as_str()));

        assert!(fx.service.get_list(&list.id, &bob).await.is_ok());

        // List management stays owner-only
        assert!(is_not_owner(&fx.service.delete_list(&list.id, &bob).await.map(|_| ())));
        assert!(is_not_owner(
            &fx.service.update_list(&list.id, Some("Y".to_string()), None, &bob).await
        ));
        assert!(is_not_owner(&fx.service.add_member(&list.id, &alice.id, &bob).await));
        assert!(is_not_owner(&fx.service.remove_member(&list.id, &bob.id, &bob).await));

        // And the member may remove items again
        let remaining = fx.service.delete_item(&list.id, &item.id, &bob).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[tokio::test]
    async fn test_owner_manages_list_and_members() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let bob = fx.create_user("Bob", "StandardUser").await;

        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();

        let members = fx.service.add_member(&list.id, &bob.id, &alice).await.unwrap();
        assert_eq!(members, vec![bob.id.clone()]);

        let updated = fx
            .service
            .update_list(&list.id, Some("Weekend shop".to_string()), Some(true), &alice)
            .await
            .unwrap();
        assert_eq!(updated.name, "Weekend shop");
        assert!(updated.is_archived);

        let members = fx
            .service
            .remove_member(&list.id, &bob.id, &alice)
            .await
            .unwrap();
        assert!(members.is_empty());

        fx.service.delete_list(&list.id, &alice).await.unwrap();
        assert!(matches!(
            fx.service.get_list(&list.id, &alice).await,
            Err(ListError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_executive_has_full_access_without_membership() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let eve = fx.create_user("Eve", "Executive").await;

        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();

        let detail = fx.service.get_list(&list.id, &eve).await.unwrap();
        assert_eq!(detail.list.id, list.id);

        fx.service
            .update_list(&list.id, Some("Renamed".to_string()), None, &eve)
            .await
            .unwrap();
        fx.service.delete_list(&list.id, &eve).await.unwrap();
    }

    #[tokio::test]
    async fn test_listing_is_scoped_by_role() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let bob = fx.create_user("Bob", "StandardUser").await;
        let eve = fx.create_user("Eve", "Executive").await;

        let own = fx.service.create_list("Mine".to_string(), &alice).await.unwrap();
        let shared = fx.service.create_list("Shared".to_string(), &bob).await.unwrap();
        fx.service.add_member(&shared.id, &alice.id, &bob).await.unwrap();
        fx.service.create_list("Foreign".to_string(), &bob).await.unwrap();

        let alice_lists = fx.service.get_lists(&alice).await.unwrap();
        let ids: Vec<&str> = alice_lists.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(alice_lists.len(), 2);
        assert!(ids.contains(&own.id.as_str()));
        assert!(ids.contains(&shared.id.as_str()));

        let eve_lists = fx.service.get_lists(&eve).await.unwrap();
        assert_eq!(eve_lists.len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_role_is_rejected_everywhere() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let ghost = fx.create_user("Ghost", "Wizard").await;

        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();

        let listing = fx.service.get_lists(&ghost).await;
        assert!(matches!(
            listing,
            Err(ListError::Ownership(OwnershipError::UnknownRole(_)))
        ));

        let view = fx.service.get_list(&list.id, &ghost).await;
        assert!(matches!(
            view,
            Err(ListError::Ownership(OwnershipError::UnknownRole(_)))
        ));
    }

    #[tokio::test]
    async fn test_add_member_requires_existing_user() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();

        let result = fx.service.add_member(&list.id, "no-such-user", &alice).await;
        assert!(matches!(result, Err(ListError::MemberNotFound)));
    }

    #[tokio::test]
    async fn test_remove_member_requires_current_membership() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let bob = fx.create_user("Bob", "StandardUser").await;
        let list = fx
            .service
            .create_list("Groceries".to_string(), &alice)
            .await
            .unwrap();

        let result = fx.service.remove_member(&list.id, &bob.id, &alice).await;
        assert!(matches!(result, Err(ListError::NotAMember)));
    }

    #[tokio::test]
    async fn test_item_operations_check_containment() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;

        let first = fx.service.create_list("First".to_string(), &alice).await.unwrap();
        let second = fx.service.create_list("Second".to_string(), &alice).await.unwrap();
        let item = fx
            .service
            .create_item(&first.id, "Milk".to_string(), &alice)
            .await
            .unwrap();

        // The item exists, but not in the second list
        let update = fx
            .service
            .update_item(&second.id, &item.id, Some("Oat milk".to_string()), None, &alice)
            .await;
        assert!(matches!(update, Err(ListError::ItemNotInList)));

        let delete = fx.service.delete_item(&second.id, &item.id, &alice).await;
        assert!(matches!(delete, Err(ListError::ItemNotInList)));
    }

    #[tokio::test]
    async fn test_update_item_clears_solver_with_empty_string() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let list = fx.service.create_list("L".to_string(), &alice).await.unwrap();
        let item = fx
            .service
            .create_item(&list.id, "Milk".to_string(), &alice)
            .await
            .unwrap();

        let solved = fx
            .service
            .update_item(&list.id, &item.id, None, Some(alice.id.clone()), &alice)
            .await
            .unwrap();
        assert!(solved.solved_by.is_some());

        let cleared = fx
            .service
            .update_item(&list.id, &item.id, None, Some(String::new()), &alice)
            .await
            .unwrap();
        assert!(cleared.solved_by.is_none());
    }

    #[tokio::test]
    async fn test_shared_list_scenario_delete_cascades_member_item() {
        let fx = setup().await;
        // A creates "Groceries", adds B; B creates "Milk"; A deletes the
        // list; the item is gone and the list resolves to not-found.
        let a = fx.create_user("Alice", "StandardUser").await;
        let b = fx.create_user("Bob", "StandardUser").await;

        let list = fx
            .service
            .create_list("Groceries".to_string(), &a)
            .await
            .unwrap();
        fx.service.add_member(&list.id, &b.id, &a).await.unwrap();
        let milk = fx
            .service
            .create_item(&list.id, "Milk".to_string(), &b)
            .await
            .unwrap();

        fx.service.delete_list(&list.id, &a).await.unwrap();

        assert!(fx.item_store.find_in_list(&list.id, &milk.id).await.unwrap().is_none());
        assert!(matches!(
            fx.service.get_list(&list.id, &a).await,
            Err(ListError::NotFound)
        ));
        assert!(fx.list_store.find_by_id(&list.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_detail_resolves_owner_members_and_items_in_order() {
        let fx = setup().await;
        let alice = fx.create_user("Alice", "StandardUser").await;
        let bob = fx.create_user("Bob", "StandardUser").await;
        let carol = fx.create_user("Carol", "StandardUser").await;

        let list = fx.service.create_list("L".to_string(), &alice).await.unwrap();
        fx.service.add_member(&list.id, &bob.id, &alice).await.unwrap();
        fx.service.add_member(&list.id, &carol.id, &alice).await.unwrap();
        fx.service.create_item(&list.id, "One".to_string(), &alice).await.unwrap();
        fx.service.create_item(&list.id, "Two".to_string(), &bob).await.unwrap();

        let detail = fx.service.get_list(&list.id, &alice).await.unwrap();
        assert_eq!(detail.owner.id, alice.id);
        let member_ids: Vec<&str> = detail.members.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(member_ids, vec![bob.id.as_str(), carol.id.as_str()]);
        let names: Vec<&str> = detail.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }
}
