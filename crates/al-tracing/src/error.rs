use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum InitReason {
    #[error("invalid log filter")]
    Filter,
    #[error("log file error")]
    LogFile,
    #[error("subscriber install error")]
    Install,
    #[error("log bridge install error")]
    LogBridge,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for InitReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::Filter => 3001,
            Self::LogFile => 3002,
            Self::Install => 3003,
            Self::LogBridge => 3004,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type InitError = StructError<InitReason>;
pub type InitResult<T> = Result<T, InitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            InitReason::Filter.error_code(),
            InitReason::LogFile.error_code(),
            InitReason::Install.error_code(),
            InitReason::LogBridge.error_code(),
        ];
        assert_eq!(codes, [3001, 3002, 3003, 3004]);
        assert_eq!(InitReason::Filter.to_string(), "invalid log filter");
    }
}
