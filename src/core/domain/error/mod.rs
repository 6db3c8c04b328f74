use thiserror::Error;

/// The main error type for selector and schedule operations.
///
/// Selector resolution only fails when the inventory itself cannot be
/// fetched or the request is rejected up front. Individual selector terms
/// never produce errors; see [`crate::Selector`].
#[derive(Error, Debug)]
pub enum ProxmoxError {
    /// Represents failures reported by the inventory collaborator
    ///
    /// # Fields
    /// * `0` - A description of what went wrong while fetching inventory data
    #[error("Connection error: {0}")]
    Connection(String),

    /// Represents validation failures with detailed context
    ///
    /// # Fields
    /// * `0` - The underlying validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Represents a rejected schedule expression
    ///
    /// # Fields
    /// * `0` - The underlying schedule error
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),
}

/// Errors raised while parsing a calendar schedule expression.
///
/// Schedule parsing is strict: the first offending token aborts the parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// The token does not match any recognized grammar
    #[error("Invalid schedule format: {0}")]
    InvalidFormat(String),

    /// A numeric literal meets or exceeds the field modulus
    ///
    /// # Fields
    /// * `field` - `hour`, `minute` or `weekday`
    /// * `value` - The offending literal as written
    /// * `max` - The exclusive upper bound of the field
    #[error("Value {value} out of range for {field} (must be below {max})")]
    OutOfRange {
        field: &'static str,
        value: String,
        max: u32,
    },

    /// Calendar date clauses are rejected rather than ignored
    #[error("Date clauses are not supported: {0}")]
    DateNotSupported(String),
}

/// Type alias for Results that may fail with a ProxmoxError
pub type ProxmoxResult<T> = Result<T, ProxmoxError>;
