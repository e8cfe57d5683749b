use core::fmt::Debug;

/// Error type
#[derive(Debug, PartialEq)]
pub enum Error<E: Sized + Debug> {
    /// The driver does not support the requested operation
    NotSupport,
    /// No driver is held and none can be built without one
    NoDriver,
    /// None of the auto-detectable sensors answered
    NotDetected,
    /// (computed, received)
    CrcMismatch(u8, u8),
    BusError(E),
}

impl<E: Sized + Debug> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::BusError(e)
    }
}
