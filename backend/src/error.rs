//! Error types for the analytics core.
//!
//! Every generator reports failures through [`AnalyticsError`]. Variants carry a
//! human-readable message plus an [`ErrorContext`] describing where the failure
//! happened, so a rejected request or a fatal start-up error can be traced back
//! to the component and operation involved.

use std::fmt;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Structured context for analytics errors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "expand", "build_funnel")
    pub operation: Option<String>,
    /// The component that raised the error (e.g., "calendar", "flow")
    pub component: Option<String>,
    /// Additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with an operation name.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set additional details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn is_empty(&self) -> bool {
        self.operation.is_none() && self.component.is_none() && self.details.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        let mut parts = Vec::new();
        if let Some(ref component) = self.component {
            parts.push(format!("component={}", component));
        }
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        write!(f, " [{}]", parts.join(", "))
    }
}

/// Error type for analytics operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyticsError {
    /// A caller-supplied date range is unparseable or inverted.
    /// Surfaced to the caller; the request is rejected as a whole.
    #[error("InvalidRangeError: {message}{context}")]
    InvalidRange {
        message: String,
        context: ErrorContext,
    },

    /// Static tables are malformed. Fatal at start-up.
    #[error("ConfigurationError: {message}{context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    /// Not enough input to derive a result (e.g. forecasting from an empty history).
    #[error("InsufficientDataError: {message}{context}")]
    InsufficientData {
        message: String,
        context: ErrorContext,
    },

    /// A post-construction invariant check failed.
    #[error("InvariantError: {message}{context}")]
    Invariant {
        message: String,
        context: ErrorContext,
    },
}

impl AnalyticsError {
    /// Create an invalid range error.
    pub fn invalid_range(message: impl Into<String>) -> Self {
        Self::InvalidRange {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an insufficient data error.
    pub fn insufficient_data(message: impl Into<String>) -> Self {
        Self::InsufficientData {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Create an invariant violation error.
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Whether the error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidRange { .. })
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::InvalidRange { context, .. }
            | Self::Configuration { context, .. }
            | Self::InsufficientData { context, .. }
            | Self::Invariant { context, .. } => context,
        }
    }

    fn context_mut(&mut self) -> &mut ErrorContext {
        match self {
            Self::InvalidRange { context, .. }
            | Self::Configuration { context, .. }
            | Self::InsufficientData { context, .. }
            | Self::Invariant { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.context_mut().operation = Some(operation.into());
        self
    }

    /// Add or update the component in the error context.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.context_mut().component = Some(component.into());
        self
    }

    /// Add or update the details in the error context.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.context_mut().details = Some(details.into());
        self
    }
}
