//! List Admins Use Case

use std::sync::Arc;

use crate::domain::entity::admin::Admin;
use crate::domain::repository::AdminRepository;
use crate::error::AdminResult;

pub struct ListAdminsUseCase<R>
where
    R: AdminRepository,
{
    repo: Arc<R>,
}

impl<R> ListAdminsUseCase<R>
where
    R: AdminRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> AdminResult<Vec<Admin>> {
        self.repo.list_newest_first().await
    }
}
