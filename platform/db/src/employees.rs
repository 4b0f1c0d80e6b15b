//! Entity store queries for the `employees` table.

use entity::employees::{ActiveModel, Column, Entity, Model};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
    sea_query::{Expr, SimpleExpr},
};

/// `(id, manager_id)` for every employee.
pub type ReportingEdge = (i32, Option<i32>);

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(conn).await
}

pub async fn all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Entity::find().order_by_asc(Column::Id).all(conn).await
}

pub async fn by_ids<C: ConnectionTrait>(conn: &C, ids: &[i32]) -> Result<Vec<Model>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await
}

pub async fn by_manager<C: ConnectionTrait>(conn: &C, manager_id: i32) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::ManagerId.eq(manager_id))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn by_department<C: ConnectionTrait>(
    conn: &C,
    department_id: i32,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::DepartmentId.eq(department_id))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn without_manager<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::ManagerId.is_null())
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

/// Loads only the manager column, enough to rebuild the reporting forest.
pub async fn reporting_edges<C: ConnectionTrait>(conn: &C) -> Result<Vec<ReportingEdge>, DbErr> {
    Entity::find()
        .select_only()
        .column(Column::Id)
        .column(Column::ManagerId)
        .order_by_asc(Column::Id)
        .into_tuple::<ReportingEdge>()
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.insert(conn).await
}

pub async fn update<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.update(conn).await
}

/// Deletes the given ids; unknown ids are ignored.
pub async fn delete_ids<C: ConnectionTrait>(conn: &C, ids: &[i32]) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::delete_many()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Points every report of `from` at `to`.
pub async fn reassign_reports<C: ConnectionTrait>(
    conn: &C,
    from: i32,
    to: Option<i32>,
) -> Result<u64, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::ManagerId, Expr::value(to))
        .filter(Column::ManagerId.eq(from))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Detaches employees whose manager is one of `ids`, making them roots.
pub async fn clear_manager_refs<C: ConnectionTrait>(conn: &C, ids: &[i32]) -> Result<u64, DbErr> {
    if ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::update_many()
        .col_expr(Column::ManagerId, null_id())
        .filter(Column::ManagerId.is_in(ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Moves every employee of department `from` to `to`.
pub async fn move_department<C: ConnectionTrait>(
    conn: &C,
    from: i32,
    to: Option<i32>,
) -> Result<u64, DbErr> {
    let result = Entity::update_many()
        .col_expr(Column::DepartmentId, Expr::value(to))
        .filter(Column::DepartmentId.eq(from))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

fn null_id() -> SimpleExpr {
    Expr::value(None::<i32>)
}
