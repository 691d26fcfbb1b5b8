//! Image store port.

use salonbook_types::error::RepositoryError;

/// Stores uploaded image bytes and hands back a stable, unique reference.
///
/// The collaborator owns retention; the platform only keeps the returned
/// path. The infra implementation writes to an uploads directory with a
/// uuid-prefixed filename.
pub trait ImageStore: Send + Sync {
    /// Persist `bytes` under a unique name derived from `original_name`.
    /// Returns the stable path reference.
    fn store(
        &self,
        bytes: &[u8],
        original_name: &str,
    ) -> impl std::future::Future<Output = Result<String, RepositoryError>> + Send;
}
