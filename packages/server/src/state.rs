use std::sync::Arc;

use common::storage::BlobStore;

use crate::config::AppConfig;
use crate::repository::CourseRepository;
use crate::service::CourseService;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub blob_store: Arc<dyn BlobStore>,
    pub courses: CourseService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        repository: Arc<dyn CourseRepository>,
        blob_store: Arc<dyn BlobStore>,
    ) -> Self {
        let courses = CourseService::new(
            repository,
            blob_store.clone(),
            config.upload.compensate_on_failure,
        );
        Self {
            config,
            blob_store,
            courses,
        }
    }

    /// Whether 500 responses carry the underlying error text.
    pub fn expose_error_detail(&self) -> bool {
        self.config.server.expose_error_detail
    }
}
