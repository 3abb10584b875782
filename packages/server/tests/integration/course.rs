use crate::common::{TestApp, TestFile, routes};

mod create_course {
    use super::*;

    #[tokio::test]
    async fn creates_course_with_image_and_videos() {
        let app = TestApp::spawn().await;

        let res = app
            .create_course_with(
                &[("title", "Intro"), ("price", "10")],
                vec![
                    TestFile::image("a.png", b"PNG_DATA"),
                    TestFile::video("b.mp4", b"VIDEO_B"),
                    TestFile::video("c.mp4", b"VIDEO_C"),
                ],
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"].as_str().unwrap(), "Intro");
        assert_eq!(res.body["price"].as_str().unwrap(), "10");
        assert!(res.body["image"].as_str().unwrap().ends_with("a.png"));
        assert_eq!(res.body["videos"].as_array().unwrap().len(), 2);
        assert!(res.body["id"].as_str().is_some());
        assert_eq!(app.stored_file_count(), 3);
    }

    #[tokio::test]
    async fn stored_files_are_served_byte_identical() {
        let app = TestApp::spawn().await;
        let image_bytes = vec![0x89, b'P', b'N', b'G', 0, 1, 2, 3, 255];
        let video_bytes: Vec<u8> = (0..=255u8).cycle().take(300_000).collect();

        let res = app
            .create_course_with(
                &[("title", "Media")],
                vec![
                    TestFile::image("cover.png", &image_bytes),
                    TestFile::video("lesson.mp4", &video_bytes),
                ],
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let image = res.body["image"].as_str().unwrap();
        let (status, bytes) = app.get_bytes(&routes::upload(image)).await;
        assert_eq!(status, 200);
        assert_eq!(bytes, image_bytes);

        let video = res.body["videos"][0].as_str().unwrap();
        let (status, bytes) = app.get_bytes(&routes::upload(video)).await;
        assert_eq!(status, 200);
        assert_eq!(bytes, video_bytes);
    }

    #[tokio::test]
    async fn keeps_text_fields_verbatim() {
        let app = TestApp::spawn().await;

        let res = app
            .create_course_with(
                &[
                    ("title", "  Rust  "),
                    ("description", "Ownership & borrowing"),
                    ("price", "free"),
                    ("category", "systems"),
                    ("duration", "ten hours"),
                ],
                vec![TestFile::image("a.png", b"PNG")],
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["title"].as_str().unwrap(), "  Rust  ");
        assert_eq!(res.body["price"].as_str().unwrap(), "free");
        assert_eq!(res.body["duration"].as_str().unwrap(), "ten hours");
        assert!(res.body["videos"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_image_fails_with_creation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .create_course_with(
                &[("title", "No cover")],
                vec![TestFile::video("b.mp4", b"VIDEO")],
            )
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(res.body["message"].as_str().unwrap(), "Error creating course");
        assert_eq!(res.body["error"].as_str().unwrap(), "image file is required");

        let list = app.get(routes::COURSES).await;
        assert!(list.body.as_array().unwrap().is_empty());
        // Without compensation the already stored video stays behind.
        assert_eq!(app.stored_file_count(), 1);
    }

    #[tokio::test]
    async fn missing_image_leaves_no_files_when_compensating() {
        let app = TestApp::spawn_with(|config| config.upload.compensate_on_failure = true).await;

        let res = app
            .create_course_with(
                &[("title", "No cover")],
                vec![TestFile::video("b.mp4", b"VIDEO")],
            )
            .await;

        assert_eq!(res.status, 500);
        assert_eq!(app.stored_file_count(), 0);
    }

    #[tokio::test]
    async fn same_name_uploads_get_distinct_paths() {
        let app = TestApp::spawn().await;

        let first = app.create_course("First").await;
        let second = app.create_course("Second").await;

        assert_ne!(first["image"], second["image"]);
        assert_ne!(first["id"], second["id"]);
    }
}

mod list_courses {
    use super::*;

    #[tokio::test]
    async fn empty_store_lists_nothing() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::COURSES).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn lists_every_created_course() {
        let app = TestApp::spawn().await;
        let mut created: Vec<String> = Vec::new();
        for title in ["One", "Two", "Three"] {
            created.push(app.create_course(title).await["id"].as_str().unwrap().to_string());
        }

        let res = app.get(routes::COURSES).await;
        assert_eq!(res.status, 200);

        let mut listed: Vec<String> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect();
        listed.sort();
        created.sort();
        assert_eq!(listed, created);
    }

    #[tokio::test]
    async fn listed_course_matches_created_course() {
        let app = TestApp::spawn().await;
        let created = app.create_course("Exact").await;

        let res = app.get(routes::COURSES).await;

        assert_eq!(res.body.as_array().unwrap().len(), 1);
        let listed = &res.body[0];
        for key in ["id", "title", "description", "price", "category", "duration", "image", "videos"] {
            assert_eq!(listed[key], created[key], "field {key} differs");
        }
    }
}

mod delete_course {
    use super::*;

    #[tokio::test]
    async fn deletes_record_and_files() {
        let app = TestApp::spawn().await;
        let course = app.create_course("Doomed").await;
        let id = course["id"].as_str().unwrap();
        assert_eq!(app.stored_file_count(), 2);

        let res = app.delete(&routes::admin_course(id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(
            res.body,
            serde_json::json!({ "message": "Course deleted successfully" })
        );
        assert_eq!(app.stored_file_count(), 0);

        let list = app.get(routes::COURSES).await;
        assert!(list.body.as_array().unwrap().is_empty());

        let image = course["image"].as_str().unwrap();
        let (status, _) = app.get_bytes(&routes::upload(image)).await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let app = TestApp::spawn().await;
        let course = app.create_course("Twice").await;
        let id = course["id"].as_str().unwrap();

        assert_eq!(app.delete(&routes::admin_course(id)).await.status, 200);

        let res = app.delete(&routes::admin_course(id)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body, serde_json::json!({ "message": "Course not found" }));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found_without_side_effects() {
        let app = TestApp::spawn().await;
        let kept = app.create_course("Kept").await;

        let res = app
            .delete(&routes::admin_course("01936f0e-1234-7abc-8000-000000000001"))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"].as_str().unwrap(), "Course not found");

        let res = app.delete(&routes::admin_course("not-a-valid-id")).await;
        assert_eq!(res.status, 404);

        assert_eq!(app.stored_file_count(), 2);
        let list = app.get(routes::COURSES).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
        assert_eq!(list.body[0]["id"], kept["id"]);
    }

    #[tokio::test]
    async fn only_the_deleted_course_loses_files() {
        let app = TestApp::spawn().await;
        let doomed = app.create_course("Doomed").await;
        let kept = app.create_course("Kept").await;

        let res = app
            .delete(&routes::admin_course(doomed["id"].as_str().unwrap()))
            .await;
        assert_eq!(res.status, 200);

        let image = kept["image"].as_str().unwrap();
        let (status, bytes) = app.get_bytes(&routes::upload(image)).await;
        assert_eq!(status, 200);
        assert_eq!(bytes, b"PNG_DATA");
        assert_eq!(app.stored_file_count(), 2);
    }
}

mod uploads {
    use super::*;

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let app = TestApp::spawn().await;

        let (status, _) = app.get_bytes("/uploads/1700000000000-missing.png").await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn nested_upload_path_is_rejected() {
        let app = TestApp::spawn().await;
        let course = app.create_course("Nested").await;
        let image = course["image"].as_str().unwrap();

        let (status, _) = app.get_bytes(&format!("/uploads/{image}")).await;
        assert_eq!(status, 400);
    }

    #[tokio::test]
    async fn traversal_is_rejected() {
        let app = TestApp::spawn().await;
        std::fs::write(app.upload_dir.path().join("secret.txt"), b"secret").unwrap();

        let (status, body) = app.get_bytes("/uploads/..%2Fsecret.txt").await;
        assert_eq!(status, 400);
        assert_ne!(body, b"secret");
    }
}
