use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::core::models::TimeBlock;
use crate::sync::SyncError;

pub const BLOCK_ID_PROPERTY: &str = "blockgridId";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDateTime {
    pub date_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtendedProperties {
    #[serde(default)]
    pub private: BTreeMap<String, String>,
}

/// Event payload in the shape remote calendars accept for inserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: CalendarEventDateTime,
    pub end: CalendarEventDateTime,
    pub color_id: String,
    #[serde(default)]
    pub extended_properties: ExtendedProperties,
}

impl CalendarEvent {
    pub fn block_id(&self) -> Option<&str> {
        self.extended_properties
            .private
            .get(BLOCK_ID_PROPERTY)
            .map(String::as_str)
    }
}

fn encode_local(t: NaiveDateTime) -> Result<CalendarEventDateTime, SyncError> {
    let local = Local
        .from_local_datetime(&t)
        .single()
        .ok_or_else(|| SyncError::InvalidTime(t.to_string()))?;
    Ok(CalendarEventDateTime {
        date_time: local.to_rfc3339(),
        time_zone: None,
    })
}

/// Map a block onto a remote event. Times carry the host's local offset;
/// wall-clock times that are skipped or repeated by a DST change are refused.
pub fn encode_block_event(block: &TimeBlock) -> Result<CalendarEvent, SyncError> {
    let mut private = BTreeMap::new();
    private.insert(BLOCK_ID_PROPERTY.to_string(), block.id.to_string());

    Ok(CalendarEvent {
        summary: block.title.clone(),
        description: block.description.clone(),
        start: encode_local(block.start_time)?,
        end: encode_local(block.end_time)?,
        color_id: block.category.color().calendar_color_id().to_string(),
        extended_properties: ExtendedProperties { private },
    })
}
