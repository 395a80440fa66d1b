//! Remote file storage.
//!
//! The client only ever needs two operations against the blob store:
//! download a full file by path, and replace a full file by path with
//! overwrite semantics. [`FileStore`] captures exactly that, so any
//! backend offering the pair is substitutable; [`DropboxStore`] is the
//! production implementation and tests use an in-memory one.

mod dropbox;

pub use dropbox::DropboxStore;

use crate::error::Result;

/// A remote store holding whole files addressed by path.
pub trait FileStore {
    /// Download the full contents of the file at `path`.
    ///
    /// Fails with a transport error when the file is missing or the
    /// backend is unreachable; an auth error when the credential
    /// handshake fails.
    fn download(&mut self, path: &str) -> Result<Vec<u8>>;

    /// Replace the file at `path` with `bytes`, creating it if absent.
    ///
    /// Unconditional overwrite: no version check, no compare-and-swap.
    fn upload(&mut self, path: &str, bytes: &[u8]) -> Result<()>;
}
