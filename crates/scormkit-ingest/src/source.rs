use crate::error::Result;

/// Archive source collaborator.
///
/// The host knows where uploaded archives live (a blob store, a course
/// content service); the pipeline only needs the raw bytes back. How the
/// host locates or authenticates the source is not specified here.
pub trait PackageSource {
    /// Fetch the raw archive bytes for a package reference.
    ///
    /// Implementations should fail with
    /// [`Error::source_unavailable`](crate::Error::source_unavailable).
    fn fetch(&self, reference: &str) -> Result<Vec<u8>>;
}
