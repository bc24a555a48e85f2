use destructure::Destructure;
use error_stack::Report;
use vodca::References;

use crate::entity::{Role, UserId};
use crate::KernelError;

const ACCESS_DENIED: &str = "Access denied";

/// The caller of a merchant or admin operation.
///
/// Every catalog mutation goes through one of the policy checks below
/// instead of comparing roles and owners inline.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Identity {
    user_id: UserId,
    role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), Report<KernelError>> {
        match self.role {
            Role::Admin => Ok(()),
            Role::Merchant => Err(KernelError::Forbidden.with_message(ACCESS_DENIED)),
        }
    }

    pub fn require_merchant(&self) -> Result<(), Report<KernelError>> {
        match self.role {
            Role::Merchant => Ok(()),
            Role::Admin => Err(KernelError::Forbidden.with_message(ACCESS_DENIED)),
        }
    }

    /// Admins may touch any resource, merchants only their own.
    pub fn authorize_owner(&self, owner: &UserId) -> Result<(), Report<KernelError>> {
        if self.is_admin() || &self.user_id == owner {
            Ok(())
        } else {
            Err(KernelError::Forbidden.with_message(ACCESS_DENIED))
        }
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn admin_passes_every_check_but_merchant_only() {
        let admin = Identity::new(UserId::new(Uuid::new_v4()), Role::Admin);
        let someone = UserId::new(Uuid::new_v4());
        assert!(admin.require_admin().is_ok());
        assert!(admin.authorize_owner(&someone).is_ok());
        let err = admin.require_merchant().unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Forbidden);
    }

    #[test]
    fn merchant_is_limited_to_own_resources() {
        let owner = UserId::new(Uuid::new_v4());
        let merchant = Identity::new(owner.clone(), Role::Merchant);
        assert!(merchant.authorize_owner(&owner).is_ok());
        assert!(merchant.require_merchant().is_ok());

        let other = UserId::new(Uuid::new_v4());
        let err = merchant.authorize_owner(&other).unwrap_err();
        assert_eq!(err.current_context(), &KernelError::Forbidden);
        assert!(merchant.require_admin().is_err());
    }
}
