use crate::common::error::PuppetError;

/// puppet全体で使用するResult型のエイリアス
///
/// # Examples
///
/// ```
/// use puppet::common::result::PuppetResult;
/// use puppet::common::error::PuppetError;
///
/// fn example_function() -> PuppetResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> PuppetResult<()> {
///     Err(PuppetError::internal_error("Something went wrong"))
/// }
/// ```
pub type PuppetResult<T> = Result<T, PuppetError>;

/// Resultのエラー変換ヘルパー
pub trait ResultExt<T, E> {
    /// ファイルシステムエラーとしてPuppetResultに変換
    ///
    /// # Examples
    ///
    /// ```
    /// use puppet::common::result::{PuppetResult, ResultExt};
    /// use std::path::PathBuf;
    ///
    /// let result: Result<String, std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let converted: PuppetResult<String> =
    ///     result.with_filesystem_error("read failed", Some(PathBuf::from("/tmp/x")));
    /// assert!(converted.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> PuppetResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> PuppetResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            let io_error = e.into();
            PuppetError::filesystem_error_with_source(message, path, io_error)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_result_ext_with_filesystem_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let result: Result<String, std::io::Error> = Err(io_error);
        let path = Some(PathBuf::from("/test/path"));

        let converted = result.with_filesystem_error("test operation", path.clone());
        match converted {
            Err(PuppetError::FileSystemError {
                message,
                path: error_path,
                source,
            }) => {
                assert_eq!(message, "test operation");
                assert_eq!(error_path, path);
                assert!(source.is_some());
            }
            other => panic!("Expected FileSystemError, got {:?}", other),
        }
    }
}
