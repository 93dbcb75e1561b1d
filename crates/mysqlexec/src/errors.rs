#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("unsupported MySQL column type {0} for column {1}")]
    UnsupportedColumnType(u8, String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Mysql(#[from] mysql_async::Error),

    #[error(transparent)]
    MysqlFromValue(#[from] mysql_async::FromValueError),

    #[error(transparent)]
    ConnectionUrl(#[from] mysql_async::UrlError),
}

pub type Result<T, E = ExecError> = std::result::Result<T, E>;
