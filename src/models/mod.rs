pub mod auth;
pub mod common;
pub mod live_classes;
pub mod orders;
pub mod users;

pub use common::{
    ApiResponse, ErrorCode, OffsetPaginationInfo, Pagination, PaginationInfo,
};
