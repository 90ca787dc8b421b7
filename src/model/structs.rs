use serde::{Deserialize, Serialize};

// Common data structures shared across all feature modules

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Role> {
        match tag {
            "teacher" => Some(Role::Teacher),
            "student" => Some(Role::Student),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamTarget {
    Jee,
    Neet,
    Eamcet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum StudentClass {
    #[serde(rename = "11")]
    Eleventh,
    #[serde(rename = "12")]
    Twelfth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Video,
    Pdf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UserInfo {
    pub role: Role,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RefreshResponse {
    pub access: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Course {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub exam_target: ExamTarget,
    pub student_class: StudentClass,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    // Only populated by the course detail endpoint
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Section {
    pub id: u64,
    pub title: String,
    pub order: u32,
    #[serde(default)]
    pub course: Option<u64>,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Subsection {
    pub id: u64,
    pub title: String,
    pub order: u32,
    pub content_type: ContentType,
    #[serde(default)]
    pub section: Option<u64>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub file_size: Option<String>,
}

/// A course as seen from the student catalog, with enrollment state folded in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StudentCourse {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub exam_target: ExamTarget,
    pub student_class: StudentClass,
    pub teacher_name: String,
    pub enrolled: bool,
    #[serde(default)]
    pub progress_percentage: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseProgress {
    pub course: u64,
    #[serde(default)]
    pub progress_percentage: f64,
    #[serde(default)]
    pub completed_subsections: Vec<u64>,
}

/// Profile record; role-specific fields stay `None` for the other role.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub student_class: Option<StudentClass>,
    #[serde(default)]
    pub school: Option<String>,
    #[serde(default)]
    pub exam_target: Option<ExamTarget>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub experience_years: Option<u32>,
    #[serde(default)]
    pub subjects: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_tags_round_trip() {
        assert_eq!(Role::from_tag("teacher"), Some(Role::Teacher));
        assert_eq!(Role::from_tag("student"), Some(Role::Student));
        assert_eq!(Role::from_tag("admin"), None);
        assert_eq!(Role::Teacher.as_str(), "teacher");
    }

    #[test]
    fn course_list_item_deserializes_without_sections() {
        let course: Course = serde_json::from_str(
            r#"{
                "id": 3,
                "title": "Physics crash course",
                "description": null,
                "exam_target": "jee",
                "student_class": "12",
                "is_published": true
            }"#,
        )
        .unwrap();
        assert_eq!(course.id, 3);
        assert!(course.sections.is_empty());
        assert_eq!(course.student_class, StudentClass::Twelfth);
    }

    #[test]
    fn student_course_carries_progress() {
        let course: StudentCourse = serde_json::from_str(
            r#"{
                "id": 7,
                "title": "Organic chemistry",
                "exam_target": "neet",
                "student_class": "11",
                "teacher_name": "R. Iyer",
                "enrolled": true,
                "progress_percentage": 42.5
            }"#,
        )
        .unwrap();
        assert!(course.enrolled);
        assert_eq!(course.progress_percentage, 42.5);
    }
}
