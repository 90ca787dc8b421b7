//! Student catalog, enrollment and progress tracking

use serde_json::Value;

use crate::error::Result;
use crate::model::dtos::{EnrollmentRequest, ProgressUpdate};
use crate::model::structs::{CourseProgress, StudentCourse};
use crate::request::{CallOptions, Gateway, Method, Transport};
use crate::session::Session;

pub const STUDENT_COURSES_PATH: &str = "/api/student/courses/";
pub const STUDENT_PROGRESS_PATH: &str = "/api/student/progress/";

/// Published courses as seen by the logged-in student, enrollment state and
/// progress folded in.
pub async fn get_student_courses<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
) -> Result<Vec<StudentCourse>> {
    let value = gateway
        .authorized_call(session, STUDENT_COURSES_PATH, CallOptions::get())
        .await?;
    Ok(serde_json::from_value(value)?)
}

pub async fn enroll<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course_id: u64,
) -> Result<Value> {
    let request = EnrollmentRequest { course: course_id };
    gateway
        .authorized_call(
            session,
            STUDENT_COURSES_PATH,
            CallOptions::json(Method::Post, &request)?,
        )
        .await
}

pub async fn get_progress<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course_id: u64,
) -> Result<CourseProgress> {
    let value = gateway
        .authorized_call(
            session,
            &format!("{STUDENT_PROGRESS_PATH}{course_id}/"),
            CallOptions::get(),
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}

/// Marks a lecture complete (or not) within a course.
pub async fn update_progress<T: Transport>(
    gateway: &Gateway<T>,
    session: &Session,
    course_id: u64,
    update: &ProgressUpdate,
) -> Result<CourseProgress> {
    let value = gateway
        .authorized_call(
            session,
            &format!("{STUDENT_PROGRESS_PATH}{course_id}/"),
            CallOptions::json(Method::Patch, update)?,
        )
        .await?;
    Ok(serde_json::from_value(value)?)
}
