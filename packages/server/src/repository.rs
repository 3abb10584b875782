use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::entity::course;
use crate::error::CourseError;
use crate::models::course::{Course, NewCourse};

/// Persistence for course records.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a new course, assigning its identifier.
    async fn create(&self, course: NewCourse) -> Result<Course, CourseError>;

    /// All courses in insertion order.
    async fn list_all(&self) -> Result<Vec<Course>, CourseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Course, CourseError>;

    /// Remove a course. Fails with [`CourseError::NotFound`] when nothing was removed.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), CourseError>;
}

/// PostgreSQL-backed repository over the `course` table.
#[derive(Clone)]
pub struct SeaOrmCourseRepository {
    db: DatabaseConnection,
}

impl SeaOrmCourseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CourseRepository for SeaOrmCourseRepository {
    async fn create(&self, course: NewCourse) -> Result<Course, CourseError> {
        let NewCourse {
            fields,
            image,
            videos,
        } = course;

        let new_course = course::ActiveModel {
            id: Set(Uuid::now_v7()),
            title: Set(fields.title),
            description: Set(fields.description),
            price: Set(fields.price),
            category: Set(fields.category),
            duration: Set(fields.duration),
            image: Set(image),
            videos: Set(serde_json::Value::from(videos)),
            created_at: Set(Utc::now()),
        };

        let model = new_course.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn list_all(&self) -> Result<Vec<Course>, CourseError> {
        let models = course::Entity::find()
            .order_by_asc(course::Column::CreatedAt)
            .order_by_asc(course::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Course::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Course, CourseError> {
        course::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Course::from)
            .ok_or(CourseError::NotFound)
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), CourseError> {
        let result = course::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(CourseError::NotFound);
        }
        Ok(())
    }
}
