use crate::{
    error::AppError,
    users::{repo::UserRepository, repo_types::User},
};

#[derive(Clone)]
pub struct UserService {
    repo: UserRepository,
}

impl UserService {
    pub fn new(repo: UserRepository) -> Self {
        Self { repo }
    }

    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        self.repo.get_user(id).await
    }
}
