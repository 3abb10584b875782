use axum::extract::Multipart;
use axum::extract::multipart::Field;
use common::storage::BlobStore;
use futures::TryStreamExt;
use tokio_util::io::StreamReader;
use tracing::{debug, warn};

use crate::error::CourseError;
use crate::models::course::{CourseFields, NewCourse};

/// Decoded course submission: text fields plus references of the stored files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadData {
    pub fields: CourseFields,
    pub image_path: String,
    pub video_paths: Vec<String>,
}

impl From<UploadData> for NewCourse {
    fn from(data: UploadData) -> Self {
        Self {
            fields: data.fields,
            image: data.image_path,
            videos: data.video_paths,
        }
    }
}

/// Decodes a `multipart/form-data` course submission, streaming file parts into the blob store.
///
/// Remembers every file it wrote, including those written before a failure, so a caller can
/// clean them up.
pub struct UploadHandler<'a> {
    store: &'a dyn BlobStore,
    stored: Vec<String>,
}

impl<'a> UploadHandler<'a> {
    pub fn new(store: &'a dyn BlobStore) -> Self {
        Self {
            store,
            stored: Vec::new(),
        }
    }

    /// References of all files written so far.
    pub fn stored(&self) -> &[String] {
        &self.stored
    }

    pub async fn decode(&mut self, mut multipart: Multipart) -> Result<UploadData, CourseError> {
        let mut fields = CourseFields::default();
        let mut image_path: Option<String> = None;
        let mut video_paths = Vec::new();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| CourseError::Multipart(e.to_string()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match name.as_str() {
                "image" => {
                    if image_path.is_some() {
                        // Unread data of a dropped field is skipped by the parser.
                        warn!("Ignoring extra image part");
                        continue;
                    }
                    image_path = Some(self.store_field(field).await?);
                }
                "videos" => video_paths.push(self.store_field(field).await?),
                text if CourseFields::NAMES.contains(&text) => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| CourseError::Multipart(e.to_string()))?;
                    fields.set(text, value);
                }
                other => debug!(field = other, "Ignoring unknown multipart field"),
            }
        }

        let image_path = image_path.ok_or(CourseError::MissingRequiredFile("image"))?;

        Ok(UploadData {
            fields,
            image_path,
            video_paths,
        })
    }

    async fn store_field(&mut self, field: Field<'_>) -> Result<String, CourseError> {
        let original_name = field
            .file_name()
            .or(field.name())
            .unwrap_or("upload")
            .to_owned();

        let stream = field.map_err(std::io::Error::other);
        let reader = StreamReader::new(Box::pin(stream));
        let path = self.store.put_stream(&original_name, Box::new(reader)).await?;

        self.stored.push(path.clone());
        Ok(path)
    }
}
