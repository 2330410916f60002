//! Tests for event domain models.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::events::{EventUpdate, NewEvent};

    #[test]
    fn test_new_event_validates() {
        assert!(sample_event().validate().is_ok());
    }

    #[test]
    fn test_new_event_allows_single_day_range() {
        let mut event = sample_event();
        event.end_date = event.start_date;
        assert!(event.validate().is_ok());
    }

    #[test]
    fn test_new_event_rejects_inverted_range() {
        let mut event = sample_event();
        std::mem::swap(&mut event.start_date, &mut event.end_date);
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_new_event_rejects_blank_title() {
        let mut event = sample_event();
        event.title = "   ".to_string();
        assert!(event.validate().is_err());
    }

    #[test]
    fn test_event_update_rejects_inverted_range_when_both_touched() {
        let event = sample_event();
        let update = EventUpdate {
            start_date: Some(event.end_date),
            end_date: Some(event.start_date),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    fn sample_event() -> NewEvent {
        let start = NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 6, 12)
            .unwrap()
            .and_hms_opt(17, 0, 0)
            .unwrap();
        NewEvent {
            title: "Sports Day".to_string(),
            description: None,
            start_date: start,
            end_date: end,
            location: Some("Main field".to_string()),
        }
    }
}
