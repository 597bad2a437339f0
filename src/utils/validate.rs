use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::live_classes::{
    entities::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES},
    requests::{CreateLiveClassRequest, UpdateLiveClassRequest},
};

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 255;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9]([A-Za-z0-9.-]*[A-Za-z0-9])?(:[0-9]{1,5})?(/[^\s]*)?$")
        .expect("Invalid url regex")
});

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    // counted in characters, after trimming
    let len = title.trim().chars().count();
    if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
        return Err("Title length must be between 3 and 255 characters");
    }
    Ok(())
}

pub fn validate_duration(duration: i32) -> Result<(), &'static str> {
    if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
        return Err("Duration must be between 15 and 480 minutes");
    }
    Ok(())
}

pub fn validate_url(url: &str) -> bool {
    URL_RE.is_match(url.trim())
}

pub fn validate_meeting_link(link: &str) -> Result<(), &'static str> {
    if !validate_url(link) {
        return Err("Meeting link must be a valid http(s) URL");
    }
    Ok(())
}

pub fn validate_recorded_link(link: &str) -> Result<(), &'static str> {
    if !validate_url(link) {
        return Err("Recorded link must be a valid http(s) URL");
    }
    Ok(())
}

pub fn validate_create_request(req: &CreateLiveClassRequest) -> Result<(), &'static str> {
    validate_title(&req.title)?;
    validate_duration(req.duration)?;
    validate_meeting_link(&req.meeting_link)?;
    Ok(())
}

/// Validates only the fields present in the patch
pub fn validate_update_request(req: &UpdateLiveClassRequest) -> Result<(), &'static str> {
    if let Some(ref title) = req.title {
        validate_title(title)?;
    }
    if let Some(duration) = req.duration {
        validate_duration(duration)?;
    }
    if let Some(ref link) = req.meeting_link {
        validate_meeting_link(link)?;
    }
    if let Some(ref link) = req.recorded_link {
        validate_recorded_link(link)?;
    }
    Ok(())
}
