//! Course, section and subsection management (teacher features)

use crate::error::Result;
use crate::model::dtos::{
    CourseUpdate, LectureContent, NewCourse, NewSection, NewSubsection, SectionUpdate,
    SubsectionUpdate,
};
use crate::model::structs::{Course, Section, Subsection};
use crate::request::{CallOptions, FormPart, Gateway, Method, Transport};
use crate::session::Session;

pub const COURSES_PATH: &str = "/api/courses/";
pub const SECTIONS_PATH: &str = "/api/sections/";
pub const SUBSECTIONS_PATH: &str = "/api/subsections/";

pub async fn get_courses<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
) -> Result<Vec<Course>> {
    let value = gateway
        .authorized_call(session, COURSES_PATH, CallOptions::get())
        .await?;
    Ok(serde_json::from_value(value)?)
}

/// Fetches one course with its sections and subsections expanded.
pub async fn get_course_detail<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course_id: u64,
) -> Result<Course> {
    let value = gateway
        .authorized_call(
            session,
            &format!("{COURSES_PATH}{course_id}/"),
            CallOptions::get(),
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn create_course<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course: &NewCourse,
) -> Result<Course> {
    let value = gateway
        .authorized_call(
            session,
            COURSES_PATH,
            CallOptions::json(Method::Post, course)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn update_course<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course_id: u64,
    update: &CourseUpdate,
) -> Result<Course> {
    let value = gateway
        .authorized_call(
            session,
            &format!("{COURSES_PATH}{course_id}/"),
            CallOptions::json(Method::Put, update)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

/// Publishes or unpublishes a course without touching its other fields.
pub async fn set_course_published<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course_id: u64,
    published: bool,
) -> Result<Course> {
    let update = CourseUpdate {
        is_published: Some(published),
        ..Default::default()
    };
    let value = gateway
        .authorized_call(
            session,
            &format!("{COURSES_PATH}{course_id}/"),
            CallOptions::json(Method::Patch, &update)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn delete_course<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course_id: u64,
) -> Result<()> {
    gateway
        .authorized_call(
            session,
            &format!("{COURSES_PATH}{course_id}/"),
            CallOptions::delete(),
        )
        .await?;
    Ok(())
}

pub async fn get_sections<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
) -> Result<Vec<Section>> {
    let value = gateway
        .authorized_call(session, SECTIONS_PATH, CallOptions::get())
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn create_section<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    section: &NewSection,
) -> Result<Section> {
    let value = gateway
        .authorized_call(
            session,
            SECTIONS_PATH,
            CallOptions::json(Method::Post, section)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn update_section<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    section_id: u64,
    update: &SectionUpdate,
) -> Result<Section> {
    let value = gateway
        .authorized_call(
            session,
            &format!("{SECTIONS_PATH}{section_id}/"),
            CallOptions::json(Method::Put, update)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn delete_section<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    section_id: u64,
) -> Result<()> {
    gateway
        .authorized_call(
            session,
            &format!("{SECTIONS_PATH}{section_id}/"),
            CallOptions::delete(),
        )
        .await?;
    Ok(())
}

pub async fn get_subsections<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
) -> Result<Vec<Subsection>> {
    let value = gateway
        .authorized_call(session, SUBSECTIONS_PATH, CallOptions::get())
        .await?;
    Ok(serde_json::from_value(value)?)
}

/// Creates a lecture. Sent as multipart form data: the PDF variant uploads
/// the document itself, the video variant carries only its URL.
pub async fn create_subsection<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    subsection: &NewSubsection,
) -> Result<Subsection> {
    let mut parts = vec![
        FormPart::text("section", subsection.section.to_string()),
        FormPart::text("title", subsection.title.clone()),
        FormPart::text("order", subsection.order.to_string()),
    ];
    match &subsection.content {
        LectureContent::Video { url } => {
            parts.push(FormPart::text("content_type", "video"));
            parts.push(FormPart::text("video_url", url.clone()));
        }
        LectureContent::Pdf { file_name, data } => {
            parts.push(FormPart::text("content_type", "pdf"));
            parts.push(FormPart::file("pdf_file", file_name.clone(), data.clone()));
        }
    }

    let value = gateway
        .authorized_call(
            session,
            SUBSECTIONS_PATH,
            CallOptions::multipart(Method::Post, parts),
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn update_subsection<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    subsection_id: u64,
    update: &SubsectionUpdate,
) -> Result<Subsection> {
    let value = gateway
        .authorized_call(
            session,
            &format!("{SUBSECTIONS_PATH}{subsection_id}/"),
            CallOptions::json(Method::Put, update)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn delete_subsection<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    subsection_id: u64,
) -> Result<()> {
    gateway
        .authorized_call(
            session,
            &format!("{SUBSECTIONS_PATH}{subsection_id}/"),
            CallOptions::delete(),
        )
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::request::testing::{failure, ok, MockTransport};
    use crate::request::{FormValue, Method, RequestBody};
    use crate::session::{MemorySessionStore, SessionStore, ACCESS_KEY};

    fn session() -> Session {
        let store = Arc::new(MemorySessionStore::new());
        store.set(ACCESS_KEY, "A1");
        Session::new(store)
    }

    fn no_content() -> crate::request::RawResponse {
        crate::request::RawResponse {
            status: 204,
            status_text: "No Content".to_string(),
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn video_lecture_uploads_url_part() {
        let gateway = Gateway::new(
            "http://test",
            MockTransport::new(|_| {
                ok(r#"{"id": 9, "title": "Kinematics", "order": 1, "content_type": "video"}"#)
            }),
        );

        let subsection = NewSubsection {
            section: 4,
            title: "Kinematics".to_string(),
            order: 1,
            content: LectureContent::Video {
                url: "https://youtu.be/abc123".to_string(),
            },
        };
        let created = create_subsection(&gateway, &session(), &subsection)
            .await
            .unwrap();
        assert_eq!(created.id, 9);

        let requests = gateway.transport().requests();
        let RequestBody::Multipart(parts) = &requests[0].body else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["section", "title", "order", "content_type", "video_url"]
        );
        assert!(parts
            .iter()
            .all(|p| matches!(p.value, FormValue::Text(_))));
    }

    #[tokio::test]
    async fn pdf_lecture_uploads_document_bytes() {
        let gateway = Gateway::new(
            "http://test",
            MockTransport::new(|_| {
                ok(r#"{"id": 10, "title": "Notes", "order": 2, "content_type": "pdf"}"#)
            }),
        );

        let subsection = NewSubsection {
            section: 4,
            title: "Notes".to_string(),
            order: 2,
            content: LectureContent::Pdf {
                file_name: "notes.pdf".to_string(),
                data: vec![0x25, 0x50, 0x44, 0x46],
            },
        };
        create_subsection(&gateway, &session(), &subsection)
            .await
            .unwrap();

        let requests = gateway.transport().requests();
        let RequestBody::Multipart(parts) = &requests[0].body else {
            panic!("expected multipart body");
        };
        let file = parts.iter().find(|p| p.name == "pdf_file").unwrap();
        match &file.value {
            FormValue::File { file_name, data } => {
                assert_eq!(file_name, "notes.pdf");
                assert_eq!(data, &vec![0x25, 0x50, 0x44, 0x46]);
            }
            other => panic!("expected file part, got {other:?}"),
        }
        assert!(!parts.iter().any(|p| p.name == "video_url"));
    }

    #[tokio::test]
    async fn publish_toggle_patches_only_the_flag() {
        let gateway = Gateway::new(
            "http://test",
            MockTransport::new(|_| {
                ok(r#"{
                    "id": 3,
                    "title": "Algebra",
                    "exam_target": "jee",
                    "student_class": "11",
                    "is_published": true
                }"#)
            }),
        );

        let course = set_course_published(&gateway, &session(), 3, true)
            .await
            .unwrap();
        assert!(course.is_published);

        let requests = gateway.transport().requests();
        assert_eq!(requests[0].method, Method::Patch);
        assert!(requests[0].url.ends_with("/api/courses/3/"));
        match &requests[0].body {
            RequestBody::Json(body) => {
                assert_eq!(body.as_object().unwrap().len(), 1);
                assert_eq!(body["is_published"], true);
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_maps_empty_response_to_unit() {
        let gateway = Gateway::new("http://test", MockTransport::new(|_| no_content()));

        delete_course(&gateway, &session(), 3).await.unwrap();

        let requests = gateway.transport().requests();
        assert_eq!(requests[0].method, Method::Delete);
        assert!(requests[0].url.ends_with("/api/courses/3/"));
    }

    #[tokio::test]
    async fn errors_surface_backend_detail() {
        let gateway = Gateway::new(
            "http://test",
            MockTransport::new(|_| {
                failure(403, "Forbidden", r#"{"detail": "Teachers only"}"#)
            }),
        );

        let err = get_courses(&gateway, &session()).await.unwrap_err();
        assert_eq!(err.api().unwrap().message, "Teachers only");
    }
}
