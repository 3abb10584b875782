use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, CourseError, ErrorBody};
use crate::models::course::{Course, MessageResponse};
use crate::state::AppState;

const CREATE_FAILED: &str = "Error creating course";
const FETCH_FAILED: &str = "Error fetching courses";
const DELETE_FAILED: &str = "Error deleting course";

/// Body limit for course submissions. `0` means unlimited.
pub fn course_upload_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    if max_bytes == 0 {
        DefaultBodyLimit::disable()
    } else {
        DefaultBodyLimit::max(max_bytes)
    }
}

#[utoipa::path(
    post,
    path = "/admin/courses",
    tag = "Courses",
    operation_id = "createCourse",
    summary = "Create a course with its media",
    description = "Accepts `multipart/form-data` with text fields `title`, `description`, `price`, \
        `category`, `duration`, exactly one `image` file and zero or more `videos` files. \
        Files are stored under `/uploads` as `<epoch millis>-<original name>`. Any failure, \
        including a missing `image`, is reported as a generic creation failure.",
    request_body(content_type = "multipart/form-data", description = "Course fields and media files"),
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 500, description = "Creation failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_course(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let fail = |e: CourseError| AppError::from_course(e, CREATE_FAILED, state.expose_error_detail());

    let multipart = multipart.map_err(|e| fail(CourseError::Multipart(e.body_text())))?;
    let course = state
        .courses
        .create_from_multipart(multipart)
        .await
        .map_err(fail)?;

    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/courses",
    tag = "Courses",
    operation_id = "listCourses",
    summary = "List all courses",
    description = "Returns every course in insertion order. No pagination.",
    responses(
        (status = 200, description = "All courses", body = Vec<Course>),
        (status = 500, description = "Listing failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state
        .courses
        .list()
        .await
        .map_err(|e| AppError::from_course(e, FETCH_FAILED, state.expose_error_detail()))?;

    Ok(Json(courses))
}

#[utoipa::path(
    delete,
    path = "/admin/courses/{id}",
    tag = "Courses",
    operation_id = "deleteCourse",
    summary = "Delete a course and its media",
    description = "Removes the course's image and video files, then the course record.",
    params(("id" = String, Path, description = "Course ID (UUID)")),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 404, description = "Course not found", body = ErrorBody),
        (status = 500, description = "Deletion failed", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .courses
        .delete(&id)
        .await
        .map_err(|e| AppError::from_course(e, DELETE_FAILED, state.expose_error_detail()))?;

    Ok(Json(MessageResponse::new("Course deleted successfully")))
}
