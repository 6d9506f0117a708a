use thiserror::Error;

pub type PfResult<T> = Result<T, PfError>;

#[derive(Error, Debug)]
pub enum PfError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },

    #[error("Not implemented: {what}")]
    NotImplemented { what: &'static str },
}
