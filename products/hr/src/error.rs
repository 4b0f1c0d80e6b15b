use sea_orm::DbErr;
use thiserror::Error;

use crate::hierarchy::HierarchyError;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("reporting cycle through employee {0}")]
    Cycle(i32),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl HrError {
    pub fn employee_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "employee",
            key: id.to_string(),
        }
    }

    pub fn department_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "department",
            key: id.to_string(),
        }
    }

    pub fn department_name_not_found(name: &str) -> Self {
        Self::NotFound {
            entity: "department",
            key: format!("'{name}'"),
        }
    }
}

impl From<HierarchyError> for HrError {
    fn from(value: HierarchyError) -> Self {
        match value {
            HierarchyError::Unknown(id) => Self::employee_not_found(id),
            HierarchyError::Cycle(id) => Self::Cycle(id),
        }
    }
}

impl From<HrError> for platform_api::ApiError {
    fn from(value: HrError) -> Self {
        use platform_api::ApiError;
        match value {
            HrError::NotFound { .. } => ApiError::NotFound(value.to_string()),
            HrError::Conflict(_) | HrError::Cycle(_) => ApiError::Conflict(value.to_string()),
            HrError::InvalidInput(_) => ApiError::InvalidInput(value.to_string()),
            HrError::Database(err) => ApiError::internal(err.into()),
        }
    }
}
