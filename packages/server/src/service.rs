use std::sync::Arc;

use axum::extract::Multipart;
use common::storage::BlobStore;
use sea_orm::DbErr;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::CourseError;
use crate::models::course::Course;
use crate::repository::CourseRepository;
use crate::upload::{UploadData, UploadHandler};

/// Create, list and delete courses together with their uploaded media.
///
/// File writes and record writes are not atomic. Unless `compensate_on_failure` is set, files
/// stored by a create that later fails stay on disk without a referencing course.
#[derive(Clone)]
pub struct CourseService {
    repository: Arc<dyn CourseRepository>,
    blob_store: Arc<dyn BlobStore>,
    compensate_on_failure: bool,
}

impl CourseService {
    pub fn new(
        repository: Arc<dyn CourseRepository>,
        blob_store: Arc<dyn BlobStore>,
        compensate_on_failure: bool,
    ) -> Self {
        Self {
            repository,
            blob_store,
            compensate_on_failure,
        }
    }

    /// Decode a multipart submission, store its files and persist the course.
    pub async fn create_from_multipart(&self, multipart: Multipart) -> Result<Course, CourseError> {
        let mut upload = UploadHandler::new(self.blob_store.as_ref());

        let result = async {
            let data = upload.decode(multipart).await?;
            self.create(data).await
        }
        .await;

        if let Err(err) = &result
            && self.compensate_on_failure
            && !upload.stored().is_empty()
        {
            warn!(error = %err, files = upload.stored().len(), "Create failed, removing stored files");
            self.discard_files(upload.stored()).await;
        }

        result
    }

    /// Persist a course for files that are already stored.
    pub async fn create(&self, data: UploadData) -> Result<Course, CourseError> {
        let course = self.repository.create(data.into()).await?;
        info!(id = %course.id, videos = course.videos.len(), "Course created");
        Ok(course)
    }

    pub async fn list(&self) -> Result<Vec<Course>, CourseError> {
        self.repository.list_all().await
    }

    /// Delete a course and its files.
    ///
    /// An identifier that does not parse is reported as [`CourseError::NotFound`].
    pub async fn delete(&self, id: &str) -> Result<(), CourseError> {
        let id = Uuid::parse_str(id).map_err(|_| CourseError::NotFound)?;
        let course = self.repository.find_by_id(id).await?;

        for path in course.file_paths() {
            if self.blob_store.exists(path).await? {
                self.blob_store.delete(path).await?;
            }
        }

        match self.repository.delete_by_id(id).await {
            // The record vanished after its files were removed.
            Err(CourseError::NotFound) => Err(CourseError::Persistence(DbErr::RecordNotFound(
                format!("course {id} disappeared during deletion"),
            ))),
            Err(err) => Err(err),
            Ok(()) => {
                info!(%id, "Course deleted");
                Ok(())
            }
        }
    }

    async fn discard_files(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.blob_store.delete(path).await {
                warn!(path = %path, error = %e, "Failed to remove orphaned upload");
            }
        }
    }
}
