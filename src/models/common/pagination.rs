use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page-based pagination; `total_pages` never drops below 1
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: ceil_div(total, limit).max(1),
        }
    }
}

/// Offset-based pagination; `total_pages` is the raw ceiling and is 0 for an
/// empty result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct OffsetPaginationInfo {
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl OffsetPaginationInfo {
    pub fn new(total: i64, skip: i64, limit: i64) -> Self {
        Self {
            total,
            skip,
            limit,
            total_pages: ceil_div(total, limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub enum Pagination {
    Paged(PaginationInfo),
    Offset(OffsetPaginationInfo),
}

fn ceil_div(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    (total + limit - 1) / limit
}

/// 1-based page number, defaulting to the first page
pub fn normalize_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Page size clamped to `[1, max]`
pub fn normalize_limit(limit: Option<i64>, max: i64) -> i64 {
    clamp_limit(limit.unwrap_or(DEFAULT_PAGE_SIZE), max)
}

/// Clamps to `[1, max]`; a non-positive `max` is read as 1
pub fn clamp_limit(limit: i64, max: i64) -> i64 {
    limit.clamp(1, max.max(1))
}

pub fn normalize_skip(skip: Option<i64>) -> i64 {
    skip.unwrap_or(0).max(0)
}
