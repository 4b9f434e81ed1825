//! The [`HeadStore`] trait defining the HEAD storage interface.

use lvc_types::ObjectId;

use crate::error::Result;

/// Storage backend for the HEAD pointer.
///
/// HEAD is written only by commit creation and read by history walks and
/// diffs. There is no branch namespace.
pub trait HeadStore: Send + Sync {
    /// Read the current HEAD.
    ///
    /// Returns `Ok(None)` if no commit has been recorded yet.
    fn head(&self) -> Result<Option<ObjectId>>;

    /// Point HEAD at `id`, replacing any previous value.
    fn set_head(&self, id: &ObjectId) -> Result<()>;
}
