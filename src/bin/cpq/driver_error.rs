use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("input file {0} must have the .ou extension")]
    BadExtension(String),
    #[error("compilation failed with {0} error(s)")]
    CompilationFailed(usize),
}
