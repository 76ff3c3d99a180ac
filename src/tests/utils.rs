//! Test utilities and helpers for unit tests
//!
//! Entity builders return fully-populated protocol values with
//! deterministic fields keyed off the id, so assertions stay readable.

#[cfg(test)]
pub mod test_helpers {
    use std::path::PathBuf;
    use tempfile::TempDir;

    use chrono::{NaiveDate, Utc};
    use orator_protocol::{
        Class, ClassStatus, Course, Group, GroupMember, GroupRole, Pagination, Presentation,
        PresentationStatus, Role, Topic, User, UserSummary,
    };

    /// Create a temporary directory for testing
    pub fn create_temp_dir() -> TempDir {
        tempfile::tempdir().expect("Failed to create temp dir")
    }

    /// Create a temporary file with content
    pub fn create_temp_file_with_content(dir: &TempDir, filename: &str, content: &[u8]) -> PathBuf {
        let file_path = dir.path().join(filename);
        std::fs::write(&file_path, content).expect("Failed to write temp file");
        file_path
    }

    pub fn sample_user(id: i64, email: &str) -> User {
        User {
            id,
            email: email.to_string(),
            full_name: format!("User {}", id),
            roles: vec![Role::Student],
        }
    }

    pub fn sample_instructor(id: i64) -> User {
        User {
            id,
            email: format!("instructor{}@university.edu", id),
            full_name: format!("Instructor {}", id),
            roles: vec![Role::Instructor],
        }
    }

    pub fn sample_user_summary(id: i64) -> UserSummary {
        UserSummary {
            id,
            email: format!("user{}@university.edu", id),
            full_name: format!("User {}", id),
        }
    }

    pub fn sample_pagination(total: u64) -> Pagination {
        Pagination {
            page: 1,
            limit: 20,
            total,
            total_pages: total.div_ceil(20) as u32,
        }
    }

    pub fn sample_course(id: i64) -> Course {
        Course {
            id,
            code: format!("ORA-{:03}", id),
            title: format!("Public Speaking {}", id),
            description: None,
            semester: "Fall".to_string(),
            academic_year: "2025-2026".to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 19).unwrap(),
            instructors: vec![sample_user_summary(100)],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn sample_class(id: i64, course_id: i64) -> Class {
        Class {
            id,
            course_id,
            name: format!("Section {}", id),
            max_students: 30,
            enroll_key: None,
            max_group_members: Some(4),
            status: ClassStatus::Active,
            instructors: vec![sample_user_summary(100)],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn sample_topic(id: i64, course_id: i64) -> Topic {
        Topic {
            id,
            course_id,
            title: format!("Topic {}", id),
            description: None,
            due_date: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            max_duration_minutes: 15,
            sequence_no: id as u32,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn sample_group(id: i64, class_id: i64, member_count: u32, max_members: Option<u32>) -> Group {
        let leader = sample_user_summary(1);
        Group {
            id,
            class_id,
            name: format!("Group {}", id),
            leader: leader.clone(),
            members: vec![GroupMember {
                user: leader,
                role: GroupRole::Leader,
                joined_at: Utc::now(),
            }],
            member_count,
            max_members,
            my_role: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub fn sample_presentation(id: i64, group_id: i64) -> Presentation {
        Presentation {
            id,
            class_id: 1,
            topic_id: 1,
            group_id,
            status: PresentationStatus::Draft,
            slide_file: None,
            media_file: None,
            slide_confirmed: false,
            media_confirmed: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// JSON form of a presentation, for scripting mock responses.
    pub fn presentation_json(id: i64, group_id: i64) -> serde_json::Value {
        serde_json::to_value(sample_presentation(id, group_id)).unwrap()
    }
}
