use std::collections::TryReserveError;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A scratch allocation failed. The input is left as a permutation of
    /// what the caller passed in.
    #[error("out of memory allocating {bytes} bytes of {what}")]
    OutOfMemory { what: &'static str, bytes: usize },
}

/// Reserves exactly `additional` more slots in `buf`, reporting failure as
/// [`Error::OutOfMemory`] instead of aborting.
pub(crate) fn try_reserve<U>(
    buf: &mut Vec<U>,
    additional: usize,
    what: &'static str,
) -> Result<()> {
    buf.try_reserve_exact(additional)
        .map_err(|err: TryReserveError| out_of_memory::<U>(additional, what, &err))
}

#[cold]
pub(crate) fn out_of_memory<U>(slots: usize, what: &'static str, err: &TryReserveError) -> Error {
    let bytes = slots.saturating_mul(size_of::<U>());
    tracing::warn!(bytes, what, error = %err, "scratch allocation failed");
    Error::OutOfMemory { what, bytes }
}
