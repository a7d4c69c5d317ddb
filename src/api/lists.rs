use poem::session::Session;
use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::guard;
use crate::errors::api::ListApiError;
use crate::policy::AccessPolicy;
use crate::services::ListService;
use crate::types::dto::common::MessageResponse;
use crate::types::dto::lists::{
    AddMemberRequest, CreateItemRequest, CreateListRequest, DeleteItemResponse,
    ItemResponse, ListDetailResponse, ListResponse, MembersResponse, UpdateItemRequest,
    UpdateListRequest,
};

/// Shopping list and item API endpoints
pub struct ListApi {
    list_service: Arc<ListService>,
    policy: Arc<AccessPolicy>,
}

impl ListApi {
    /// Create a new ListApi with the given ListService and AccessPolicy
    pub fn new(list_service: Arc<ListService>, policy: Arc<AccessPolicy>) -> Self {
        Self {
            list_service,
            policy,
        }
    }
}

/// API tags for list endpoints
#[derive(Tags)]
enum ListTags {
    /// Shopping list endpoints
    Lists,
}

fn require_name(raw: &str) -> Result<String, ListApiError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ListApiError::bad_request("Name must not be empty"));
    }
    Ok(name.to_string())
}

#[OpenApi(prefix_path = "/lists")]
impl ListApi {
    /// Create a new shopping list owned by the caller
    #[oai(path = "/", method = "post", tag = "ListTags::Lists")]
    async fn create_list(
        &self,
        session: &Session,
        body: Json<CreateListRequest>,
    ) -> Result<Json<ListResponse>, ListApiError> {
        let actor = guard(&self.policy, session, "POST", "/api/lists")?;
        let name = require_name(&body.0.name)?;

        let list = self.list_service.create_list(name, &actor).await?;
        Ok(Json(ListResponse::from_model(&list)))
    }

    /// List the shopping lists visible to the caller
    #[oai(path = "/", method = "get", tag = "ListTags::Lists")]
    async fn get_lists(
        &self,
        session: &Session,
    ) -> Result<Json<Vec<ListResponse>>, ListApiError> {
        let actor = guard(&self.policy, session, "GET", "/api/lists")?;

        let lists = self.list_service.get_lists(&actor).await?;
        Ok(Json(lists.iter().map(ListResponse::from_model).collect()))
    }

    /// Fetch a single list with its owner, members and items
    #[oai(path = "/:id", method = "get", tag = "ListTags::Lists")]
    async fn get_list(
        &self,
        session: &Session,
        id: Path<String>,
    ) -> Result<Json<ListDetailResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "GET",
            &format!("/api/lists/{}", id.0),
        )?;

        let detail = self.list_service.get_list(&id.0, &actor).await?;
        Ok(Json(ListDetailResponse::from_detail(&detail)))
    }

    /// Update a list's name and/or archived flag
    #[oai(path = "/:id", method = "put", tag = "ListTags::Lists")]
    async fn update_list(
        &self,
        session: &Session,
        id: Path<String>,
        body: Json<UpdateListRequest>,
    ) -> Result<Json<ListResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "PUT",
            &format!("/api/lists/{}", id.0),
        )?;

        let name = match body.0.name {
            Some(raw) => Some(require_name(&raw)?),
            None => None,
        };

        let list = self
            .list_service
            .update_list(&id.0, name, body.0.is_archived, &actor)
            .await?;
        Ok(Json(ListResponse::from_model(&list)))
    }

    /// Delete a list together with its items and memberships
    #[oai(path = "/:id", method = "delete", tag = "ListTags::Lists")]
    async fn delete_list(
        &self,
        session: &Session,
        id: Path<String>,
    ) -> Result<Json<MessageResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "DELETE",
            &format!("/api/lists/{}", id.0),
        )?;

        self.list_service.delete_list(&id.0, &actor).await?;
        Ok(Json(MessageResponse {
            message: "List deleted".to_string(),
        }))
    }

    /// Add a member to a list
    #[oai(path = "/:id/members", method = "post", tag = "ListTags::Lists")]
    async fn add_member(
        &self,
        session: &Session,
        id: Path<String>,
        body: Json<AddMemberRequest>,
    ) -> Result<Json<MembersResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "POST",
            &format!("/api/lists/{}/members", id.0),
        )?;

        if body.0.user_id.trim().is_empty() {
            return Err(ListApiError::bad_request("user_id must not be empty"));
        }

        let members = self
            .list_service
            .add_member(&id.0, body.0.user_id.trim(), &actor)
            .await?;
        Ok(Json(MembersResponse {
            id: id.0,
            members,
        }))
    }

    /// Remove a member from a list
    #[oai(
        path = "/:id/members/:member_id",
        method = "delete",
        tag = "ListTags::Lists"
    )]
    async fn remove_member(
        &self,
        session: &Session,
        id: Path<String>,
        member_id: Path<String>,
    ) -> Result<Json<MembersResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "DELETE",
            &format!("/api/lists/{}/members/{}", id.0, member_id.0),
        )?;

        let members = self
            .list_service
            .remove_member(&id.0, &member_id.0, &actor)
            .await?;
        Ok(Json(MembersResponse {
            id: id.0,
            members,
        }))
    }

    /// Add an item to a list; the caller is recorded as the adder
    #[oai(path = "/:id/items", method = "post", tag = "ListTags::Lists")]
    async fn create_item(
        &self,
        session: &Session,
        id: Path<String>,
        body: Json<CreateItemRequest>,
    ) -> Result<Json<ItemResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "POST",
            &format!("/api/lists/{}/items", id.0),
        )?;
        let name = require_name(&body.0.name)?;

        let item = self.list_service.create_item(&id.0, name, &actor).await?;
        Ok(Json(ItemResponse::from_model(&item)))
    }

    /// Update an item's name and/or solved marker
    #[oai(
        path = "/:id/items/:item_id",
        method = "put",
        tag = "ListTags::Lists"
    )]
    async fn update_item(
        &self,
        session: &Session,
        id: Path<String>,
        item_id: Path<String>,
        body: Json<UpdateItemRequest>,
    ) -> Result<Json<ItemResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "PUT",
            &format!("/api/lists/{}/items/{}", id.0, item_id.0),
        )?;

        let name = match body.0.name {
            Some(raw) => Some(require_name(&raw)?),
            None => None,
        };

        let item = self
            .list_service
            .update_item(&id.0, &item_id.0, name, body.0.solved_by, &actor)
            .await?;
        Ok(Json(ItemResponse::from_model(&item)))
    }

    /// Delete an item from a list
    #[oai(
        path = "/:id/items/:item_id",
        method = "delete",
        tag = "ListTags::Lists"
    )]
    async fn delete_item(
        &self,
        session: &Session,
        id: Path<String>,
        item_id: Path<String>,
    ) -> Result<Json<DeleteItemResponse>, ListApiError> {
        let actor = guard(
            &self.policy,
            session,
            "DELETE",
            &format!("/api/lists/{}/items/{}", id.0, item_id.0),
        )?;

        let items = self
            .list_service
            .delete_item(&id.0, &item_id.0, &actor)
            .await?;
        Ok(Json(DeleteItemResponse {
            list_id: id.0,
            items,
        }))
    }
}
