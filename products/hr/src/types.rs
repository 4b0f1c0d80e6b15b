use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// Input for creating an employee.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub email: String,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
    #[serde(default)]
    pub manager_id: Option<i32>,
    #[serde(default)]
    pub department_id: Option<i32>,
}

impl EmployeeDraft {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        title: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            title: title.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    pub fn with_manager(mut self, manager_id: i32) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn with_department(mut self, department_id: i32) -> Self {
        self.department_id = Some(department_id);
        self
    }

    pub fn with_hire_date(mut self, hire_date: NaiveDate) -> Self {
        self.hire_date = Some(hire_date);
        self
    }

    pub(crate) fn validate(&self) -> HrResult<()> {
        validate_profile(&self.first_name, &self.last_name, &self.title, &self.email)
    }
}

/// Replacement values for an employee's mutable profile. Manager and
/// department are changed through their own operations only.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub email: String,
    #[serde(default)]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeeUpdate {
    pub(crate) fn validate(&self) -> HrResult<()> {
        validate_profile(&self.first_name, &self.last_name, &self.title, &self.email)
    }
}

fn validate_profile(first_name: &str, last_name: &str, title: &str, email: &str) -> HrResult<()> {
    for (field, value) in [
        ("firstName", first_name),
        ("lastName", last_name),
        ("title", title),
        ("email", email),
    ] {
        if value.trim().is_empty() {
            return Err(HrError::InvalidInput(format!("{field} must not be blank")));
        }
    }
    if !email.contains('@') {
        return Err(HrError::InvalidInput(format!("invalid email '{email}'")));
    }
    Ok(())
}

/// Trimmed department name, rejecting blanks.
pub(crate) fn department_name(raw: &str) -> HrResult<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(HrError::InvalidInput(
            "department name must not be blank".into(),
        ));
    }
    Ok(name.to_string())
}
