/// Length a school registration code must have.
pub const SCHOOL_CODE_LEN: usize = 4;

/// Default number of records returned by a list operation.
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// Upper bound on the page size a caller may request.
pub const MAX_PAGE_LIMIT: i64 = 1000;
