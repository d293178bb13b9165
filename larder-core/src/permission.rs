//! Ownership-based access rules.
//!
//! Every handler classifies what it is about to do as an [`Operation`] and
//! asks a [`Policy`] whether the current [`Actor`] (if any) may do it.
//! Reads are open to everyone; writes depend on the policy.

use uuid::Uuid;

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub is_superuser: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Safe operations never modify state and are allowed for anyone.
    pub fn is_safe(self) -> bool {
        matches!(self, Operation::Read)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No identity was presented (401).
    Unauthenticated,
    /// An identity was presented but may not do this (403).
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Writes are restricted to superusers. Categories.
    AdminOrReadOnly,
    /// Writes need any authenticated user. Creating recipes, reviews, ratings.
    AuthenticatedOrReadOnly,
    /// Writes are restricted to the given owner. For recipes, reviews and
    /// ratings the owner is the object's author; for ingredients and images
    /// it is the author of the parent recipe.
    OwnerOrReadOnly(Uuid),
}

impl Policy {
    pub fn check(self, operation: Operation, actor: Option<&Actor>) -> Result<(), Denial> {
        if operation.is_safe() {
            return Ok(());
        }

        let actor = actor.ok_or(Denial::Unauthenticated)?;

        let allowed = match self {
            Policy::AdminOrReadOnly => actor.is_superuser,
            Policy::AuthenticatedOrReadOnly => true,
            Policy::OwnerOrReadOnly(owner) => actor.id == owner,
        };

        if allowed {
            Ok(())
        } else {
            Err(Denial::Forbidden)
        }
    }
}

/// Check several policies in order, stopping at the first denial.
pub fn check_all(
    policies: &[Policy],
    operation: Operation,
    actor: Option<&Actor>,
) -> Result<(), Denial> {
    policies
        .iter()
        .try_for_each(|policy| policy.check(operation, actor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: u128) -> Actor {
        Actor {
            id: Uuid::from_u128(id),
            is_superuser: false,
        }
    }

    fn admin() -> Actor {
        Actor {
            id: Uuid::from_u128(99),
            is_superuser: true,
        }
    }

    #[test]
    fn test_reads_are_always_allowed() {
        for policy in [
            Policy::AdminOrReadOnly,
            Policy::AuthenticatedOrReadOnly,
            Policy::OwnerOrReadOnly(Uuid::from_u128(1)),
        ] {
            assert_eq!(policy.check(Operation::Read, None), Ok(()));
            assert_eq!(policy.check(Operation::Read, Some(&user(2))), Ok(()));
        }
    }

    #[test]
    fn test_admin_or_read_only() {
        let policy = Policy::AdminOrReadOnly;
        assert_eq!(
            policy.check(Operation::Create, None),
            Err(Denial::Unauthenticated)
        );
        assert_eq!(
            policy.check(Operation::Update, Some(&user(1))),
            Err(Denial::Forbidden)
        );
        assert_eq!(policy.check(Operation::Delete, Some(&admin())), Ok(()));
    }

    #[test]
    fn test_authenticated_or_read_only() {
        let policy = Policy::AuthenticatedOrReadOnly;
        assert_eq!(
            policy.check(Operation::Create, None),
            Err(Denial::Unauthenticated)
        );
        assert_eq!(policy.check(Operation::Create, Some(&user(1))), Ok(()));
    }

    #[test]
    fn test_owner_or_read_only() {
        let policy = Policy::OwnerOrReadOnly(Uuid::from_u128(1));
        assert_eq!(policy.check(Operation::Update, Some(&user(1))), Ok(()));
        assert_eq!(
            policy.check(Operation::Delete, Some(&user(2))),
            Err(Denial::Forbidden)
        );
        assert_eq!(
            policy.check(Operation::Delete, None),
            Err(Denial::Unauthenticated)
        );
    }

    #[test]
    fn test_superuser_is_not_an_owner() {
        let policy = Policy::OwnerOrReadOnly(Uuid::from_u128(1));
        assert_eq!(
            policy.check(Operation::Update, Some(&admin())),
            Err(Denial::Forbidden)
        );
    }

    #[test]
    fn test_check_all_stops_at_first_denial() {
        let policies = [
            Policy::AuthenticatedOrReadOnly,
            Policy::OwnerOrReadOnly(Uuid::from_u128(1)),
        ];
        assert_eq!(
            check_all(&policies, Operation::Update, None),
            Err(Denial::Unauthenticated)
        );
        assert_eq!(
            check_all(&policies, Operation::Update, Some(&user(2))),
            Err(Denial::Forbidden)
        );
        assert_eq!(check_all(&policies, Operation::Update, Some(&user(1))), Ok(()));
    }
}
