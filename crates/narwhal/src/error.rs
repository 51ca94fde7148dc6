/// Failures an arrangement can report.
///
/// Cancellation is the only recoverable condition. It is returned unchanged through every
/// layer so callers can tell "the user stopped this" apart from anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("arrangement was cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, Error>;
