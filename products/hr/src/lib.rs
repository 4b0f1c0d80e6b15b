//! HR vertical slice: the employee reporting hierarchy and the department
//! registry built on top of the entity store.

pub mod directory;
pub mod error;
pub mod hierarchy;
pub mod registry;
pub mod types;

use platform_db::DbPool;

pub use directory::EmployeeDirectory;
pub use error::{HrError, HrResult};
pub use hierarchy::{Hierarchy, HierarchyError};
pub use registry::DepartmentRegistry;
pub use types::{EmployeeDraft, EmployeeUpdate};

/// Both halves of the slice sharing one pool.
#[derive(Clone, Debug)]
pub struct HrModule {
    pub employees: EmployeeDirectory,
    pub departments: DepartmentRegistry,
}

impl HrModule {
    pub fn new(db: DbPool) -> Self {
        Self {
            employees: EmployeeDirectory::new(db.clone()),
            departments: DepartmentRegistry::new(db),
        }
    }
}
