//! Tests for grade and student domain models.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::enrollment::{GradeUpdate, NewGrade, NewStudent, StudentUpdate};

    // ==================== Grade Validation Tests ====================

    #[test]
    fn test_new_grade_validates() {
        assert!(sample_grade().validate().is_ok());
    }

    #[test]
    fn test_new_grade_rejects_negative_level() {
        let mut grade = sample_grade();
        grade.level = -1;
        assert!(grade.validate().is_err());
    }

    #[test]
    fn test_new_grade_rejects_blank_teacher() {
        let mut grade = sample_grade();
        grade.teacher_id = "".to_string();
        assert!(grade.validate().is_err());
    }

    #[test]
    fn test_grade_update_rejects_negative_level() {
        let update = GradeUpdate {
            level: Some(-3),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    // ==================== Student Validation Tests ====================

    #[test]
    fn test_new_student_validates() {
        assert!(sample_student().validate().is_ok());
    }

    #[test]
    fn test_new_student_email_is_optional() {
        let mut student = sample_student();
        student.email = None;
        assert!(student.validate().is_ok());
    }

    #[test]
    fn test_new_student_rejects_malformed_email() {
        let mut student = sample_student();
        student.email = Some("nope".to_string());
        assert!(student.validate().is_err());
    }

    #[test]
    fn test_student_update_allows_partial_fields() {
        let update = StudentUpdate {
            phone_number: Some("555-0101".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    // ==================== Helper Functions ====================

    fn sample_grade() -> NewGrade {
        NewGrade {
            name: "Grade 5B".to_string(),
            level: 5,
            teacher_id: "teacher-1".to_string(),
        }
    }

    fn sample_student() -> NewStudent {
        NewStudent {
            first_name: "Kofi".to_string(),
            last_name: "Adjei".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2012, 3, 14)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            gender: "M".to_string(),
            address: None,
            phone_number: None,
            email: Some("kofi@students.example".to_string()),
            enrollment_date: NaiveDate::from_ymd_opt(2023, 9, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            grade_id: "grade-1".to_string(),
        }
    }
}
