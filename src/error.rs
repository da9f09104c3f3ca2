use actix_web::error::{BlockingError, ResponseError};
use derive_more::Display;
use diesel::r2d2::PoolError;
use diesel::result::Error as DieselError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "database error: {}", _0)]
    Diesel(DieselError),

    #[display(fmt = "connection pool error: {}", _0)]
    Pool(PoolError),

    #[display(fmt = "blocking database call was canceled")]
    Canceled,

    /// Structural validation failed on save. Carries the human-readable
    /// violation messages that go back over the wire.
    #[display(fmt = "constraint violations: {:?}", _0)]
    Validation(Vec<String>),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Diesel(e) => Some(e),
            Error::Pool(e) => Some(e),
            Error::Canceled | Error::Validation(_) => None,
        }
    }
}

// Anything that escapes a handler is a plain server fault; validation
// failures are caught before this and never reach the default response.
impl ResponseError for Error {}

impl From<DieselError> for Error {
    fn from(e: DieselError) -> Error {
        Error::Diesel(e)
    }
}

impl From<PoolError> for Error {
    fn from(e: PoolError) -> Error {
        Error::Pool(e)
    }
}

impl From<BlockingError> for Error {
    fn from(_: BlockingError) -> Error {
        Error::Canceled
    }
}
