/// Numeric codes carried in the response envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // generic
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    RateLimitExceeded = 1005,
    InternalServerError = 1006,

    // users
    UserNotFound = 2000,
    UserRoleInvalid = 2001,

    // live classes
    LiveClassNotFound = 3000,
    LiveClassPermissionDenied = 3001,
    LiveClassCreationFailed = 3002,
    LiveClassUpdateFailed = 3003,
    LiveClassDeleteFailed = 3004,
}
