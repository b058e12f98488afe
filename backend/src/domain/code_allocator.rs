//! Employee code allocation.
//!
//! Allocation is read-then-check with no lock around the pair. The unique
//! constraint in storage is the final arbiter; callers must still handle a
//! conflict reported by the subsequent write.

use std::sync::Arc;

use crate::domain::EmployeeCode;
use crate::domain::ports::{EmployeeLookup, EmployeeRepository, EmployeeRepositoryError};

/// Code handed out when no employee exists yet.
pub const BASELINE_CODE: EmployeeCode = EmployeeCode::BASELINE;

/// Failures raised while choosing an employee code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodeAllocationError {
    #[error("employee code {code} is already in use")]
    Taken { code: EmployeeCode },
    #[error("no employee codes remain above {highest}")]
    Exhausted { highest: EmployeeCode },
    #[error(transparent)]
    Repository(#[from] EmployeeRepositoryError),
}

/// Chooses the code for a new employee.
#[derive(Clone)]
pub struct CodeAllocator<R> {
    repo: Arc<R>,
}

impl<R> CodeAllocator<R>
where
    R: EmployeeRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Return `requested` if free, otherwise the successor of the highest
    /// existing code (or [`BASELINE_CODE`] for an empty set).
    ///
    /// Either way the chosen value is re-checked against storage before it
    /// is returned.
    pub async fn allocate(
        &self,
        requested: Option<EmployeeCode>,
    ) -> Result<EmployeeCode, CodeAllocationError> {
        let code = match requested {
            Some(code) => code,
            None => self.next_code().await?,
        };
        if self.repo.find(&EmployeeLookup::Code(code)).await?.is_some() {
            return Err(CodeAllocationError::Taken { code });
        }
        Ok(code)
    }

    async fn next_code(&self) -> Result<EmployeeCode, CodeAllocationError> {
        match self.repo.highest_code().await? {
            Some(highest) => highest
                .successor()
                .ok_or(CodeAllocationError::Exhausted { highest }),
            None => Ok(BASELINE_CODE),
        }
    }
}
