use thiserror::Error;

/// Stage of the export that failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineError {
    #[error("Invalid transform configuration")]
    InvalidConfiguration,
    #[error("Could not connect to Google Sheets")]
    Connection,
    #[error("Could not fetch the sheet")]
    Fetch,
    #[error("Could not write the output file")]
    Write,
}

/// A named unit of work run once by the binary.
#[async_trait::async_trait]
pub trait Routine: Send + Sync {
    fn name(&self) -> &str;

    async fn run(&self) -> error_stack::Result<(), RoutineError>;
}
