//! Shared Test Helpers for Cross-Crate Use
//!
//! This module provides centralized test utilities that can be used across
//! both the `detection` and `shopping` crates to avoid code duplication.

/// Standardized test error type
///
/// This provides a consistent error interface across all test suites,
/// making debugging easier and error handling more predictable.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("Assertion failed: {message}")]
    AssertionFailure { message: String },

    #[error("Serialization error: {source}")]
    SerializationError {
        #[from]
        source: serde_json::Error,
    },

    #[error("HTTP error: {source}")]
    HttpError {
        #[from]
        source: http::Error,
    },

    #[error("Generic test error: {message}")]
    Generic { message: String },
}

impl TestError {
    /// Create an assertion failure error
    pub fn assertion_failure(message: impl Into<String>) -> Self {
        Self::AssertionFailure {
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }
}

/// Alias for the standard test result type
pub type TestResult<T = ()> = Result<T, TestError>;

/// Helper macro for test assertions that return `TestError` instead of panicking
#[macro_export]
macro_rules! test_assert {
    ($condition:expr) => {
        if !($condition) {
            return Err($crate::test_helpers::TestError::assertion_failure(
                format!("assertion failed: {}", stringify!($condition))
            ));
        }
    };
    ($condition:expr, $message:expr $(, $arg:expr)*) => {
        if !($condition) {
            return Err($crate::test_helpers::TestError::assertion_failure(
                format!($message $(, $arg)*)
            ));
        }
    };
}

/// Helper macro for test assertions with equality
#[macro_export]
macro_rules! test_assert_eq {
    ($left:expr, $right:expr) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    return Err($crate::test_helpers::TestError::assertion_failure(
                        format!("assertion failed: `(left == right)`\n  left: `{:?}`,\n right: `{:?}`",
                                left_val, right_val)
                    ));
                }
            }
        }
    };
    ($left:expr, $right:expr, $message:expr $(, $arg:expr)*) => {
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    return Err($crate::test_helpers::TestError::assertion_failure(
                        format!($message $(, $arg)*)
                    ));
                }
            }
        }
    };
}

pub mod test_utils {
    use super::{TestError, TestResult};

    /// Build an HTTP request with an optional JSON body
    pub fn build_request(
        method: &str,
        uri: &str,
        body: Option<String>,
    ) -> TestResult<http::Request<String>> {
        let builder = http::Request::builder()
            .method(method)
            .uri(uri)
            .header(http::header::CONTENT_TYPE, "application/json");
        Ok(builder.body(body.unwrap_or_default())?)
    }

    /// Compare a response status against the expected one
    pub fn check_status_code(
        actual: http::StatusCode,
        expected: http::StatusCode,
    ) -> TestResult {
        if actual != expected {
            return Err(TestError::assertion_failure(format!(
                "expected status {}, got {}",
                expected, actual
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::test_utils::*;
    use super::*;

    fn failing_assert() -> TestResult {
        test_assert_eq!(1 + 1, 3);
        Ok(())
    }

    #[test]
    fn test_assert_eq_returns_assertion_failure() {
        let err = failing_assert().unwrap_err();
        assert!(matches!(err, TestError::AssertionFailure { .. }));
    }

    #[test]
    fn test_build_request_sets_method_and_body() -> TestResult {
        let request = build_request("POST", "/api/analyze", Some("{}".to_string()))?;
        test_assert_eq!(request.method(), http::Method::POST);
        test_assert_eq!(request.body().as_str(), "{}");
        check_status_code(http::StatusCode::OK, http::StatusCode::OK)?;
        test_assert!(check_status_code(http::StatusCode::OK, http::StatusCode::CREATED).is_err());
        Ok(())
    }
}
