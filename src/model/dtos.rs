use serde::Serialize;

use super::structs::{ExamTarget, StudentClass};

/// Credentials for a login request
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration payload for a student account
#[derive(Debug, Clone, Serialize)]
pub struct StudentRegistration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub age: u8,
    pub student_class: StudentClass,
    pub school: String,
    pub exam_target: ExamTarget,
}

/// Registration payload for a teacher account
#[derive(Debug, Clone, Serialize)]
pub struct TeacherRegistration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub organization: String,
    pub qualification: String,
    pub experience_years: u32,
    pub subjects: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCourse {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub exam_target: ExamTarget,
    pub student_class: StudentClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Partial course update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CourseUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_target: Option<ExamTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_class: Option<StudentClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSection {
    pub course: u64,
    pub title: String,
    pub order: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<u64>,
}

/// Lecture content for subsection creation. A video lecture references an
/// external URL; a PDF lecture uploads the document itself.
#[derive(Debug, Clone)]
pub enum LectureContent {
    Video { url: String },
    Pdf { file_name: String, data: Vec<u8> },
}

/// Subsection creation payload. Sent as multipart form data because the PDF
/// variant carries a file upload.
#[derive(Debug, Clone)]
pub struct NewSubsection {
    pub section: u64,
    pub title: String,
    pub order: u32,
    pub content: LectureContent,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SubsectionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrollmentRequest {
    pub course: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressUpdate {
    pub subsection: u64,
    pub completed: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_class: Option<StudentClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_target: Option<ExamTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subjects: Option<String>,
}
