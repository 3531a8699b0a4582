use thiserror::Error as ThisError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    IndexNotReady,
    InternalInconsistency,
    NotFound,
    AlreadyExists,
    WorkerUnavailable,
}

#[derive(Debug, Clone, PartialEq, ThisError)]
#[error("{kind:?}: {context}")]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    pub fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Error {
            kind,
            context: context.into(),
        }
    }

    pub fn invalid_argument(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InvalidArgument, context)
    }

    pub fn inconsistency(context: impl Into<String>) -> Self {
        Error::new(ErrorKind::InternalInconsistency, context)
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }
}

impl<T> From<crossbeam::channel::SendError<T>> for Error {
    fn from(_: crossbeam::channel::SendError<T>) -> Self {
        Error::new(ErrorKind::WorkerUnavailable, "background worker is no longer accepting jobs")
    }
}

impl From<crossbeam::channel::RecvError> for Error {
    fn from(_: crossbeam::channel::RecvError) -> Self {
        Error::new(ErrorKind::WorkerUnavailable, "background worker stopped before delivering a result")
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorKind::InvalidArgument, format!("invalid configuration: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
