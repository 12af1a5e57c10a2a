// oversight-core/src/ports/identity.rs

use crate::domain::actor::Actor;
use crate::error::OversightError;
use async_trait::async_trait;

/// Supplies the signed-in user and their role. Role claims come from the
/// provider; they are never inferred from the user name or email.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_actor(&self) -> Result<Actor, OversightError>;
}
