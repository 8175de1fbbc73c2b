//! Member management service

use std::sync::Arc;

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{Member, MemberPatch, MemberRequest},
    repository::MemberStore,
};

use super::cascade::CascadePolicy;

#[derive(Clone)]
pub struct MembersService {
    members: Arc<dyn MemberStore>,
    cascade: CascadePolicy,
}

impl MembersService {
    pub fn new(members: Arc<dyn MemberStore>, cascade: CascadePolicy) -> Self {
        Self { members, cascade }
    }

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        tracing::info!("Listing all members");
        self.members.get_all().await
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Member> {
        self.members.get_by_id(id).await?.ok_or_else(|| {
            tracing::warn!("Member not found with id {}", id);
            AppError::member_not_found(id)
        })
    }

    /// Register a member; the email must not belong to anyone else
    pub async fn create(&self, request: MemberRequest) -> AppResult<Member> {
        tracing::info!("Creating member: {}", request.email);
        request.validate()?;
        self.ensure_email_free(&request.email, None).await?;
        self.members.put(&Member::from_request(0, request)).await
    }

    pub async fn replace(&self, id: i64, request: MemberRequest) -> AppResult<Member> {
        tracing::info!("Replacing member {}", id);
        if !self.members.exists_by_id(id).await? {
            tracing::warn!("Member not found with id {}", id);
            return Err(AppError::member_not_found(id));
        }
        request.validate()?;
        self.ensure_email_free(&request.email, Some(id)).await?;
        self.members.put(&Member::from_request(id, request)).await
    }

    pub async fn update(&self, id: i64, patch: MemberPatch) -> AppResult<Member> {
        tracing::info!("Updating member {}", id);
        let existing = self.get_by_id(id).await?;
        let request = existing.merged_with(patch);
        request.validate()?;
        self.ensure_email_free(&request.email, Some(id)).await?;
        self.members.put(&Member::from_request(id, request)).await
    }

    /// Delete a member together with their loans
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        tracing::info!("Deleting member {}", id);
        if !self.members.exists_by_id(id).await? {
            tracing::warn!("Member not found with id {}", id);
            return Err(AppError::member_not_found(id));
        }
        self.cascade.before_member_delete(id).await?;
        self.members.delete_by_id(id).await
    }

    async fn ensure_email_free(&self, email: &str, own_id: Option<i64>) -> AppResult<()> {
        match self.members.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != own_id => {
                tracing::warn!("Email {} already used by member {}", email, existing.id);
                Err(AppError::Conflict(format!(
                    "A member with email {} already exists (id={})",
                    email, existing.id
                )))
            }
            _ => Ok(()),
        }
    }
}
