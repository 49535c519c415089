use std::sync::Arc;

use staffdir_directory::{DirectoryService, InMemoryEmployeeStore, InMemoryUserStore};

use crate::config::ApiConfig;

/// Wire the directory service over in-memory stores.
pub fn build_directory(config: &ApiConfig) -> Arc<DirectoryService> {
    let directory = DirectoryService::new(
        config.jwt_secret.clone(),
        Arc::new(InMemoryUserStore::new()),
        Arc::new(InMemoryEmployeeStore::new()),
    )
    .with_bcrypt_cost(config.bcrypt_cost);

    Arc::new(directory)
}
