use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
///
/// Every failure is local to one strip instance; nothing here is fatal to
/// the process and no operation retries internally.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A construction parameter was unusable (for example a zero LED count).
    #[display("invalid argument")]
    InvalidArgument,

    /// The pixel buffer does not fit the backing storage.
    #[display("no memory for LED pixel buffer")]
    OutOfMemory,

    // `#[error(not(source))]` below tells `derive_more` that the raw status
    // code is a payload, not an error source; peripheral status codes are
    // plain integers and do not implement `core::error::Error`.
    /// The transmit-channel collaborator failed; carries its raw status.
    #[display("transmit channel failure: status {_0}")]
    Hardware(#[error(not(source))] i32),
}
