//! Native contracts executed by the VM against the repository.
//!
//! Every native contract is admitted in two phases: a read-only `validate`
//! followed by `execute`, which recomputes everything from the repository and
//! commits the result. `validate` on its own is a dry run.

pub mod param;
pub mod withdraw_expire_unfreeze;

pub use param::WithdrawExpireUnfreezeParam;
pub use withdraw_expire_unfreeze::WithdrawExpireUnfreezeProcessor;

use crate::error::{ChainError, ValidationError};
use crate::repository::Repository;

pub trait NativeProcessor {
    type Param;
    type Output;

    /// Admission check. Never mutates the repository. `None` means the
    /// caller has no store configured, which is always a rejection.
    fn validate<R: Repository + ?Sized>(
        &self,
        param: &Self::Param,
        repo: Option<&R>,
    ) -> Result<(), ValidationError>;

    /// Applies the request. The caller must have validated it against the
    /// same account state and chain clock.
    fn execute<R: Repository + ?Sized>(
        &self,
        param: &Self::Param,
        repo: &mut R,
    ) -> Result<Self::Output, ChainError>;

    /// Validate then execute in one step.
    fn apply<R: Repository + ?Sized>(
        &self,
        param: &Self::Param,
        repo: &mut R,
    ) -> Result<Self::Output, ChainError> {
        self.validate(param, Some(&*repo))?;
        self.execute(param, repo)
    }
}
