// oversight-core/src/infrastructure/adapters/identity.rs

use async_trait::async_trait;

use crate::domain::actor::Actor;
use crate::error::OversightError;
use crate::ports::identity::IdentityProvider;

/// Identity fixed at construction (CLI flags, tests). No credential check:
/// authentication belongs to the identity provider this stands in for.
#[derive(Debug, Clone)]
pub struct StaticIdentity {
    actor: Actor,
}

impl StaticIdentity {
    pub fn new(actor: Actor) -> Self {
        Self { actor }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_actor(&self) -> Result<Actor, OversightError> {
        Ok(self.actor.clone())
    }
}
