//! Business logic services

pub mod authors;
pub mod catalog;
pub mod circulation;
pub mod dashboard;
pub mod users;

use crate::{
    config::{AuthConfig, CatalogConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub authors: authors::AuthorsService,
    pub circulation: circulation::CirculationService,
    pub dashboard: dashboard::DashboardService,
    pub users: users::UsersService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        catalog_config: CatalogConfig,
    ) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone(), catalog_config.clone()),
            authors: authors::AuthorsService::new(repository.clone(), catalog_config),
            circulation: circulation::CirculationService::new(repository.clone()),
            dashboard: dashboard::DashboardService::new(repository.clone()),
            users: users::UsersService::new(repository, auth_config),
        }
    }
}
