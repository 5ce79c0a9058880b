/// Exit codes for CI/automation.
pub const SUCCESS: i32 = 0;
/// Missing configuration or invalid inputs; nothing was sent.
pub const VALIDATION_FAILED: i32 = 2;
/// The request was sent and failed.
pub const RUN_FAILED: i32 = 3;
pub const RUNTIME_ERROR: i32 = 4;
