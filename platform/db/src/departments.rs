//! Entity store queries for the `departments` table.

use entity::departments::{ActiveModel, Column, Entity, Model};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
    sea_query::Expr,
};

pub async fn find<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, DbErr> {
    Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_name<C: ConnectionTrait>(conn: &C, name: &str) -> Result<Option<Model>, DbErr> {
    Entity::find().filter(Column::Name.eq(name)).one(conn).await
}

pub async fn all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>, DbErr> {
    Entity::find().order_by_asc(Column::Id).all(conn).await
}

/// True when a department other than `except` already uses `name`.
pub async fn name_taken<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    except: Option<i32>,
) -> Result<bool, DbErr> {
    let mut query = Entity::find().filter(Column::Name.eq(name));
    if let Some(id) = except {
        query = query.filter(Column::Id.ne(id));
    }
    Ok(query.count(conn).await? > 0)
}

/// Departments currently managed by `employee_id`.
pub async fn managed_by<C: ConnectionTrait>(
    conn: &C,
    employee_id: i32,
) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::ManagerId.eq(employee_id))
        .order_by_asc(Column::Id)
        .all(conn)
        .await
}

pub async fn insert<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.insert(conn).await
}

pub async fn update<C: ConnectionTrait>(conn: &C, model: ActiveModel) -> Result<Model, DbErr> {
    model.update(conn).await
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, DbErr> {
    let result = Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected)
}

/// Clears the manager of every department managed by one of `employee_ids`.
pub async fn clear_manager_refs<C: ConnectionTrait>(
    conn: &C,
    employee_ids: &[i32],
) -> Result<u64, DbErr> {
    if employee_ids.is_empty() {
        return Ok(0);
    }
    let result = Entity::update_many()
        .col_expr(Column::ManagerId, Expr::value(None::<i32>))
        .filter(Column::ManagerId.is_in(employee_ids.iter().copied()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
