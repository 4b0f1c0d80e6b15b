pub mod departments;
pub mod employees;

pub mod prelude {
    pub use crate::departments::Entity as Departments;
    pub use crate::employees::Entity as Employees;
}
