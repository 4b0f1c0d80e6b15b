//! Employee directory: CRUD plus the reporting-hierarchy queries and bulk
//! removals. Multi-step operations run inside a single transaction.

use std::collections::HashMap;

use entity::employees;
use platform_db::{DbPool, departments as department_store, employees as employee_store};
use sea_orm::{ActiveValue::Set, ConnectionTrait, DbErr, TransactionTrait};
use tracing::{info, instrument};

use crate::{
    error::{HrError, HrResult},
    hierarchy::Hierarchy,
    types::{EmployeeDraft, EmployeeUpdate},
};

#[derive(Clone, Debug)]
pub struct EmployeeDirectory {
    db: DbPool,
}

impl EmployeeDirectory {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    /// Creates an employee. A given manager's department wins over the
    /// draft's department, as with [`EmployeeDirectory::set_manager`].
    #[instrument(name = "hr.employee.create", skip_all)]
    pub async fn create(&self, draft: EmployeeDraft) -> HrResult<employees::Model> {
        draft.validate()?;
        let txn = self.db.begin().await?;
        let mut department_id = draft.department_id;
        if let Some(id) = department_id {
            require_department(&txn, id).await?;
        }
        if let Some(manager_id) = draft.manager_id {
            let manager = require_employee(&txn, manager_id).await?;
            if manager.department_id.is_some() {
                department_id = manager.department_id;
            }
        }
        let model = employee_store::insert(
            &txn,
            employees::ActiveModel {
                first_name: Set(draft.first_name),
                last_name: Set(draft.last_name),
                title: Set(draft.title),
                phone_number: Set(draft.phone_number),
                email: Set(draft.email),
                hire_date: Set(draft.hire_date),
                manager_id: Set(draft.manager_id),
                department_id: Set(department_id),
                ..Default::default()
            },
        )
        .await?;
        txn.commit().await?;
        info!(employee = model.id, name = %model.full_name(), "employee created");
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> HrResult<employees::Model> {
        require_employee(&self.db, id).await
    }

    pub async fn list(&self) -> HrResult<Vec<employees::Model>> {
        Ok(employee_store::all(&self.db).await?)
    }

    #[instrument(name = "hr.employee.update", skip(self, update))]
    pub async fn update(&self, id: i32, update: EmployeeUpdate) -> HrResult<employees::Model> {
        update.validate()?;
        let txn = self.db.begin().await?;
        let existing = require_employee(&txn, id).await?;
        let mut active: employees::ActiveModel = existing.into();
        active.first_name = Set(update.first_name);
        active.last_name = Set(update.last_name);
        active.title = Set(update.title);
        active.phone_number = Set(update.phone_number);
        active.email = Set(update.email);
        active.hire_date = Set(update.hire_date);
        let model = employee_store::update(&txn, active).await?;
        txn.commit().await?;
        Ok(model)
    }

    /// Deletes one employee. Unknown ids are a no-op; direct reports of the
    /// removed employee become roots.
    #[instrument(name = "hr.employee.delete", skip(self))]
    pub async fn delete(&self, id: i32) -> HrResult<u64> {
        self.delete_batch(&[id]).await
    }

    #[instrument(name = "hr.employee.delete_batch", skip(self))]
    pub async fn delete_batch(&self, ids: &[i32]) -> HrResult<u64> {
        let txn = self.db.begin().await?;
        let removed = remove_employees(&txn, ids).await?;
        txn.commit().await?;
        info!(removed, "employees deleted");
        Ok(removed)
    }

    /// Makes `manager_id` the manager of `employee_id`. When the manager
    /// belongs to a department the employee is moved into it.
    #[instrument(name = "hr.employee.set_manager", skip(self))]
    pub async fn set_manager(&self, employee_id: i32, manager_id: i32) -> HrResult<employees::Model> {
        let txn = self.db.begin().await?;
        let employee = require_employee(&txn, employee_id).await?;
        let manager = require_employee(&txn, manager_id).await?;
        let hierarchy = load_hierarchy(&txn).await?;
        if hierarchy.would_cycle(employee_id, manager_id) {
            return Err(HrError::Cycle(employee_id));
        }
        let department_id = manager.department_id.or(employee.department_id);
        let updated = place_employee(&txn, employee, Some(manager_id), department_id).await?;
        txn.commit().await?;
        info!(
            employee = employee_id,
            manager = manager_id,
            department = ?updated.department_id,
            "manager assigned"
        );
        Ok(updated)
    }

    pub async fn direct_reports(&self, manager_id: i32) -> HrResult<Vec<employees::Model>> {
        require_employee(&self.db, manager_id).await?;
        Ok(employee_store::by_manager(&self.db, manager_id).await?)
    }

    /// The employee followed by each manager above them.
    pub async fn reporting_hierarchy(&self, employee_id: i32) -> HrResult<Vec<employees::Model>> {
        let hierarchy = load_hierarchy(&self.db).await?;
        let chain = hierarchy.chain(employee_id)?;
        load_in_order(&self.db, chain).await
    }

    /// Every direct and indirect report, each manager before their reports.
    /// An unknown manager has no reports.
    pub async fn all_reports(&self, manager_id: i32) -> HrResult<Vec<employees::Model>> {
        let hierarchy = load_hierarchy(&self.db).await?;
        if !hierarchy.contains(manager_id) {
            return Ok(Vec::new());
        }
        let reports = hierarchy.descendants(manager_id)?;
        load_in_order(&self.db, reports).await
    }

    pub async fn without_manager(&self) -> HrResult<Vec<employees::Model>> {
        Ok(employee_store::without_manager(&self.db).await?)
    }

    pub async fn by_department(&self, department_id: i32) -> HrResult<Vec<employees::Model>> {
        Ok(employee_store::by_department(&self.db, department_id).await?)
    }

    /// Deletes the whole subtree below `manager_id`, keeping the manager.
    /// Unknown ids are a no-op.
    #[instrument(name = "hr.employee.remove_all_reports", skip(self))]
    pub async fn remove_all_reports(&self, manager_id: i32) -> HrResult<u64> {
        let txn = self.db.begin().await?;
        let hierarchy = load_hierarchy(&txn).await?;
        if !hierarchy.contains(manager_id) {
            return Ok(0);
        }
        let reports = hierarchy.descendants(manager_id)?;
        let removed = remove_employees(&txn, &reports).await?;
        txn.commit().await?;
        info!(manager = manager_id, removed, "reporting subtree removed");
        Ok(removed)
    }

    /// Deletes each direct report of `manager_id` after handing their own
    /// reports up to `manager_id`.
    #[instrument(name = "hr.employee.remove_direct_reports", skip(self))]
    pub async fn remove_direct_reports(&self, manager_id: i32) -> HrResult<u64> {
        let txn = self.db.begin().await?;
        require_employee(&txn, manager_id).await?;
        let mut removed = 0;
        for report in employee_store::by_manager(&txn, manager_id).await? {
            let promoted = employee_store::reassign_reports(&txn, report.id, Some(manager_id)).await?;
            removed += remove_employees(&txn, &[report.id]).await?;
            info!(manager = manager_id, report = report.id, promoted, "direct report flattened");
        }
        txn.commit().await?;
        Ok(removed)
    }

    /// Deletes every employee assigned to `department_id`.
    #[instrument(name = "hr.employee.remove_department", skip(self))]
    pub async fn remove_department_employees(&self, department_id: i32) -> HrResult<u64> {
        remove_department_employees(&self.db, department_id).await
    }
}

pub(crate) async fn remove_department_employees(db: &DbPool, department_id: i32) -> HrResult<u64> {
    let txn = db.begin().await?;
    let removed = remove_employees_of(&txn, department_id).await?;
    txn.commit().await?;
    info!(department = department_id, removed, "department employees removed");
    Ok(removed)
}

pub(crate) async fn remove_employees_of<C: ConnectionTrait>(
    conn: &C,
    department_id: i32,
) -> Result<u64, DbErr> {
    let ids: Vec<i32> = employee_store::by_department(conn, department_id)
        .await?
        .into_iter()
        .map(|employee| employee.id)
        .collect();
    remove_employees(conn, &ids).await
}

pub(crate) async fn require_employee<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> HrResult<employees::Model> {
    employee_store::find(conn, id)
        .await?
        .ok_or_else(|| HrError::employee_not_found(id))
}

pub(crate) async fn require_department<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> HrResult<entity::departments::Model> {
    department_store::find(conn, id)
        .await?
        .ok_or_else(|| HrError::department_not_found(id))
}

pub(crate) async fn load_hierarchy<C: ConnectionTrait>(conn: &C) -> Result<Hierarchy, DbErr> {
    Ok(Hierarchy::from_edges(employee_store::reporting_edges(conn).await?))
}

/// Writes an employee's manager and department. Leaving a department also
/// gives up managing it.
pub(crate) async fn place_employee<C: ConnectionTrait>(
    conn: &C,
    employee: employees::Model,
    manager_id: Option<i32>,
    department_id: Option<i32>,
) -> Result<employees::Model, DbErr> {
    if employee.department_id != department_id {
        for department in department_store::managed_by(conn, employee.id).await? {
            if Some(department.id) != department_id {
                let mut active: entity::departments::ActiveModel = department.into();
                active.manager_id = Set(None);
                department_store::update(conn, active).await?;
            }
        }
    }
    let mut active: employees::ActiveModel = employee.into();
    active.manager_id = Set(manager_id);
    active.department_id = Set(department_id);
    employee_store::update(conn, active).await
}

/// Deletes `ids`, first detaching every reference into the deleted set so
/// no survivor points at a missing manager.
pub(crate) async fn remove_employees<C: ConnectionTrait>(conn: &C, ids: &[i32]) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }
    employee_store::clear_manager_refs(conn, ids).await?;
    department_store::clear_manager_refs(conn, ids).await?;
    employee_store::delete_ids(conn, ids).await
}

async fn load_in_order<C: ConnectionTrait>(
    conn: &C,
    ids: Vec<i32>,
) -> HrResult<Vec<employees::Model>> {
    let records = employee_store::by_ids(conn, &ids).await?;
    Ok(order_by_ids(ids, records))
}

fn order_by_ids(ids: Vec<i32>, records: Vec<employees::Model>) -> Vec<employees::Model> {
    let mut by_id: HashMap<i32, employees::Model> =
        records.into_iter().map(|model| (model.id, model)).collect();
    ids.into_iter().filter_map(|id| by_id.remove(&id)).collect()
}
