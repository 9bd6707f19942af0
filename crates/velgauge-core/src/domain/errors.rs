use std::error::Error;
use std::fmt::{Display, Formatter};

pub type VelgaugeResult<T> = Result<T, VelgaugeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VelgaugeErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl VelgaugeErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VelgaugeError {
    category: VelgaugeErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl VelgaugeError {
    pub fn new(
        category: VelgaugeErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            VelgaugeErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(VelgaugeErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(VelgaugeErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(VelgaugeErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> VelgaugeErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for VelgaugeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for VelgaugeError {}

#[cfg(test)]
mod tests {
    use super::{VelgaugeError, VelgaugeErrorCategory};

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (VelgaugeErrorCategory::Success, 0, "Success"),
            (
                VelgaugeErrorCategory::InputValidationError,
                2,
                "InputValidationError",
            ),
            (VelgaugeErrorCategory::IoSystemError, 3, "IoSystemError"),
            (
                VelgaugeErrorCategory::ComputationError,
                4,
                "ComputationError",
            ),
            (VelgaugeErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, name) in cases {
            assert_eq!(category.exit_code(), exit_code);
            assert_eq!(category.as_str(), name);
        }
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = VelgaugeError::input_validation(
            "INPUT.LMAX",
            "lmax 64 exceeds the supported maximum 32",
        );

        assert_eq!(error.exit_code(), 2);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [INPUT.LMAX] lmax 64 exceeds the supported maximum 32"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 2")
        );
        assert_eq!(
            error.to_string(),
            "InputValidationError [INPUT.LMAX] lmax 64 exceeds the supported maximum 32"
        );
    }

    #[test]
    fn success_category_has_no_exit_line() {
        let info = VelgaugeError::new(VelgaugeErrorCategory::Success, "RUN.DONE", "finished");
        assert_eq!(info.diagnostic_line(), "INFO: [RUN.DONE] finished");
        assert!(info.fatal_exit_line().is_none());
    }
}
