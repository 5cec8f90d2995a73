use crate::db::models::{NewRegistrationRow, RegistrationRow};
use crate::db::ports::{InsertMapper, RowMapper};
use anyhow::{anyhow, Context, Result};
use chrono::{TimeZone, Utc};
use rw_core::{EventSlot, RegistrationId, RegistrationRecord};

pub struct RegistrationRowMapper;

impl InsertMapper<RegistrationRecord, NewRegistrationRow> for RegistrationRowMapper {
    fn to_row(&self, domain: &RegistrationRecord) -> Result<NewRegistrationRow> {
        Ok(NewRegistrationRow {
            id: domain.id.as_str().to_string(),
            email: domain.email.clone(),
            full_name: domain.full_name.clone(),
            contact_number: domain.contact_number.clone(),
            address: domain.address.clone(),
            company: domain.company.clone(),
            designation: domain.designation.clone(),
            first_time: domain.first_time_attendee,
            selected_events: serde_json::to_string(&domain.selected_events)
                .context("Failed to encode selected_events")?,
            submitted_at: domain.submitted_at.timestamp_millis(),
        })
    }
}

impl RowMapper<RegistrationRow, RegistrationRecord> for RegistrationRowMapper {
    fn to_domain(&self, row: &RegistrationRow) -> Result<RegistrationRecord> {
        let selected_events: Vec<EventSlot> = serde_json::from_str(&row.selected_events)
            .with_context(|| format!("invalid selected_events: {}", row.selected_events))?;
        let submitted_at = Utc
            .timestamp_millis_opt(row.submitted_at)
            .single()
            .ok_or_else(|| anyhow!("invalid submitted_at: {}", row.submitted_at))?;

        Ok(RegistrationRecord {
            id: RegistrationId::from(row.id.as_str()),
            email: row.email.clone(),
            full_name: row.full_name.clone(),
            contact_number: row.contact_number.clone(),
            address: row.address.clone(),
            company: row.company.clone(),
            designation: row.designation.clone(),
            first_time_attendee: row.first_time,
            selected_events,
            submitted_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_event_list_is_reported() {
        let row = RegistrationRow {
            id: "r-1".into(),
            email: "a@x.com".into(),
            full_name: "Ada".into(),
            contact_number: "1".into(),
            address: "2".into(),
            company: "3".into(),
            designation: "4".into(),
            first_time: true,
            selected_events: "[\"event9\"]".into(),
            submitted_at: 0,
        };

        let err = RegistrationRowMapper.to_domain(&row).unwrap_err();
        assert!(err.to_string().contains("invalid selected_events"));
    }

    #[test]
    fn events_are_stored_as_json_names() {
        let record = RegistrationRecord {
            id: "r-1".into(),
            email: "a@x.com".into(),
            full_name: "Ada".into(),
            contact_number: "1".into(),
            address: "2".into(),
            company: "3".into(),
            designation: "4".into(),
            first_time_attendee: false,
            selected_events: vec![EventSlot::Event1, EventSlot::Event2],
            submitted_at: Utc.timestamp_millis_opt(1_756_771_200_000).unwrap(),
        };

        let row = RegistrationRowMapper.to_row(&record).unwrap();

        assert_eq!(row.selected_events, r#"["event1","event2"]"#);
        assert_eq!(row.submitted_at, 1_756_771_200_000);
        assert!(!row.first_time);
    }
}
