//! IdentityRepository trait definition.

use dumai_types::error::RepositoryError;
use dumai_types::identity::{Identity, UserId};

/// Repository trait for the identity registry.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// There are no update or delete operations.
pub trait IdentityRepository: Send + Sync {
    /// Get an identity by its numeric id.
    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl std::future::Future<Output = Result<Option<Identity>, RepositoryError>> + Send;

    /// Get an identity by exact (case-sensitive) username.
    fn get_by_name(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<Option<Identity>, RepositoryError>> + Send;

    /// Return the identity registered under `username`, creating it if absent.
    ///
    /// An existing identity is returned unchanged (the credential is not
    /// updated). The existence check and the insert must be atomic so that
    /// concurrent first contact with the same name yields one identity.
    fn create_or_get(
        &self,
        username: &str,
        credential: &str,
    ) -> impl std::future::Future<Output = Result<Identity, RepositoryError>> + Send;

    /// Number of registered identities.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
