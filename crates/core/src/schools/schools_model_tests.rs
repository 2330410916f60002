//! Tests for school domain models.

#[cfg(test)]
mod tests {
    use crate::schools::{NewSchool, SchoolStatsUpdate, SchoolType, SchoolUpdate};

    // ==================== SchoolType Serialization Tests ====================

    #[test]
    fn test_school_type_serialization() {
        assert_eq!(
            serde_json::to_string(&SchoolType::BasicSchool).unwrap(),
            "\"BASIC_SCHOOL\""
        );
        assert_eq!(
            serde_json::to_string(&SchoolType::VocationalCollege).unwrap(),
            "\"VOCATIONAL_COLLEGE\""
        );
    }

    #[test]
    fn test_school_type_deserialization() {
        assert_eq!(
            serde_json::from_str::<SchoolType>("\"HIGH_SCHOOL\"").unwrap(),
            SchoolType::HighSchool
        );
        assert_eq!(
            serde_json::from_str::<SchoolType>("\"PRIVATE\"").unwrap(),
            SchoolType::Private
        );
    }

    #[test]
    fn test_school_type_db_round_trip() {
        for kind in [
            SchoolType::BasicSchool,
            SchoolType::HighSchool,
            SchoolType::VocationalCollege,
            SchoolType::TradeSchool,
            SchoolType::Government,
            SchoolType::Private,
        ] {
            assert_eq!(SchoolType::from_db_str(kind.as_db_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_school_type_from_db_str_rejects_unknown() {
        assert!(SchoolType::from_db_str("KINDERGARTEN").is_err());
    }

    // ==================== NewSchool Validation Tests ====================

    #[test]
    fn test_new_school_validates() {
        assert!(sample_school().validate().is_ok());
    }

    #[test]
    fn test_new_school_rejects_empty_name() {
        let mut school = sample_school();
        school.name = "  ".to_string();
        assert!(school.validate().is_err());
    }

    #[test]
    fn test_new_school_rejects_bad_code_length() {
        let mut school = sample_school();
        school.code = "ABC".to_string();
        assert!(school.validate().is_err());

        school.code = "ABCDE".to_string();
        assert!(school.validate().is_err());
    }

    #[test]
    fn test_new_school_rejects_bad_email() {
        let mut school = sample_school();
        school.email = "not-an-email".to_string();
        assert!(school.validate().is_err());
    }

    // ==================== Update Validation Tests ====================

    #[test]
    fn test_school_update_empty_is_valid() {
        assert!(SchoolUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_school_update_rejects_touched_bad_code() {
        let update = SchoolUpdate {
            code: Some("TOOLONG".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_stats_update_rejects_negative_counts() {
        let update = SchoolStatsUpdate {
            total_students: Some(-1),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_stats_update_rejects_non_finite() {
        let update = SchoolStatsUpdate {
            total_fees_paid: Some(f64::NAN),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    // ==================== Helper Functions ====================

    fn sample_school() -> NewSchool {
        NewSchool {
            name: "Hillside Academy".to_string(),
            contact_person: "R. Mensah".to_string(),
            code: "HILL".to_string(),
            address: None,
            phone_number: None,
            image: None,
            email: "admin@hillside.example".to_string(),
            website_url: None,
            school_type: SchoolType::HighSchool,
        }
    }
}
