//! Errors surfaced by configuration and lifecycle operations.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TweenError {
    /// The easing spec named a curve that is not in the registry. Detected at
    /// configure time so a bad name never reaches the tick path.
    #[error("unknown easing curve `{0}`")]
    UnknownEasing(String),

    #[error("duration must be a finite, non-negative number of milliseconds, got {0}")]
    InvalidDuration(f64),

    #[error("delay must be a finite, non-negative number of milliseconds, got {0}")]
    InvalidDelay(f64),

    /// Disposing a queued tween would leave the run queue holding a cleared
    /// instance; stop it first.
    #[error("cannot dispose a tween that is still queued; stop it first")]
    DisposedWhilePlaying,
}
