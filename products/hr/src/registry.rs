//! Department registry: CRUD, manager assignment, rename and merge.

use entity::departments;
use platform_db::{DbPool, departments as department_store, employees as employee_store};
use sea_orm::{ActiveValue::Set, ConnectionTrait, TransactionTrait};
use tracing::{info, instrument};

use crate::{
    directory::{
        self, load_hierarchy, place_employee, remove_employees_of, require_department,
        require_employee,
    },
    error::{HrError, HrResult},
    types::department_name,
};

#[derive(Clone, Debug)]
pub struct DepartmentRegistry {
    db: DbPool,
}

impl DepartmentRegistry {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    #[instrument(name = "hr.department.create", skip(self))]
    pub async fn create(&self, name: &str) -> HrResult<departments::Model> {
        let name = department_name(name)?;
        let txn = self.db.begin().await?;
        ensure_name_free(&txn, &name, None).await?;
        let model = department_store::insert(
            &txn,
            departments::ActiveModel {
                name: Set(name),
                manager_id: Set(None),
                ..Default::default()
            },
        )
        .await?;
        txn.commit().await?;
        info!(department = model.id, name = %model.name, "department created");
        Ok(model)
    }

    pub async fn list(&self) -> HrResult<Vec<departments::Model>> {
        Ok(department_store::all(&self.db).await?)
    }

    pub async fn get(&self, id: i32) -> HrResult<departments::Model> {
        require_department(&self.db, id).await
    }

    pub async fn get_by_name(&self, name: &str) -> HrResult<departments::Model> {
        require_department_named(&self.db, name).await
    }

    /// Deletes a department together with its employees. Unknown ids are a
    /// no-op.
    #[instrument(name = "hr.department.delete", skip(self))]
    pub async fn delete(&self, id: i32) -> HrResult<u64> {
        let txn = self.db.begin().await?;
        let employees = remove_employees_of(&txn, id).await?;
        let removed = department_store::delete(&txn, id).await?;
        txn.commit().await?;
        if removed > 0 {
            info!(department = id, employees, "department deleted");
        }
        Ok(removed)
    }

    /// Makes `employee_id` the manager of `department_id` and moves the
    /// employee into that department.
    #[instrument(name = "hr.department.set_manager", skip(self))]
    pub async fn set_manager(
        &self,
        department_id: i32,
        employee_id: i32,
    ) -> HrResult<departments::Model> {
        let txn = self.db.begin().await?;
        let department = require_department(&txn, department_id).await?;
        let employee = require_employee(&txn, employee_id).await?;
        if employee.department_id != Some(department_id) {
            let manager_id = employee.manager_id;
            place_employee(&txn, employee, manager_id, Some(department_id)).await?;
        }
        let mut active: departments::ActiveModel = department.into();
        active.manager_id = Set(Some(employee_id));
        let model = department_store::update(&txn, active).await?;
        txn.commit().await?;
        info!(department = department_id, manager = employee_id, "department manager assigned");
        Ok(model)
    }

    #[instrument(name = "hr.department.rename", skip(self))]
    pub async fn rename(&self, department_id: i32, name: &str) -> HrResult<departments::Model> {
        let name = department_name(name)?;
        let txn = self.db.begin().await?;
        let department = require_department(&txn, department_id).await?;
        if department.name == name {
            return Ok(department);
        }
        ensure_name_free(&txn, &name, Some(department_id)).await?;
        let previous = department.name.clone();
        let mut active: departments::ActiveModel = department.into();
        active.name = Set(name);
        let model = department_store::update(&txn, active).await?;
        txn.commit().await?;
        info!(department = department_id, from = %previous, to = %model.name, "department renamed");
        Ok(model)
    }

    /// Folds department `b_name` into `a_name`: B's employees move to A, B's
    /// manager reports to A's manager when both exist, then B is deleted.
    #[instrument(name = "hr.department.merge", skip(self))]
    pub async fn merge(&self, a_name: &str, b_name: &str) -> HrResult<departments::Model> {
        let (a_name, b_name) = (a_name.trim(), b_name.trim());
        if a_name == b_name {
            return Err(HrError::InvalidInput(format!(
                "cannot merge department '{a_name}' into itself"
            )));
        }
        let txn = self.db.begin().await?;
        let a = require_department_named(&txn, a_name).await?;
        let b = require_department_named(&txn, b_name).await?;

        let moved = employee_store::move_department(&txn, b.id, Some(a.id)).await?;

        if let (Some(a_manager), Some(b_manager)) = (a.manager_id, b.manager_id) {
            let hierarchy = load_hierarchy(&txn).await?;
            if hierarchy.would_cycle(b_manager, a_manager) {
                return Err(HrError::Cycle(b_manager));
            }
            let employee = require_employee(&txn, b_manager).await?;
            place_employee(&txn, employee, Some(a_manager), Some(a.id)).await?;
        }

        department_store::delete(&txn, b.id).await?;
        txn.commit().await?;
        info!(into = a.id, from = b.id, moved, "departments merged");
        Ok(a)
    }

    /// Deletes every employee of the department; same as
    /// [`crate::EmployeeDirectory::remove_department_employees`].
    #[instrument(name = "hr.department.remove_employees", skip(self))]
    pub async fn remove_employees(&self, department_id: i32) -> HrResult<u64> {
        directory::remove_department_employees(&self.db, department_id).await
    }
}

async fn require_department_named<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> HrResult<departments::Model> {
    department_store::find_by_name(conn, name.trim())
        .await?
        .ok_or_else(|| HrError::department_name_not_found(name))
}

async fn ensure_name_free<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    except: Option<i32>,
) -> HrResult<()> {
    if department_store::name_taken(conn, name, except).await? {
        return Err(HrError::Conflict(format!(
            "department name '{name}' already exists"
        )));
    }
    Ok(())
}
