use super::entities::LiveClass;
use crate::models::common::PaginationInfo;

// Page of a filtered listing
#[derive(Debug, Clone)]
pub struct LiveClassListResponse {
    pub items: Vec<LiveClass>,
    pub pagination: PaginationInfo,
}

// Offset window of approved classes with the unpaged total
#[derive(Debug, Clone)]
pub struct LiveClassWindow {
    pub items: Vec<LiveClass>,
    pub total: i64,
}

impl LiveClassWindow {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
