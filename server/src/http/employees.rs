use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, put},
};
use chrono::NaiveDate;
use entity::employees;
use platform_api::ApiResult;
use products_hr::{EmployeeDraft, EmployeeUpdate};
use serde::Serialize;

use super::AppState;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub hire_date: Option<NaiveDate>,
    pub manager_id: Option<i32>,
    pub department_id: Option<i32>,
}

impl From<employees::Model> for EmployeeView {
    fn from(model: employees::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            title: model.title,
            phone_number: model.phone_number,
            email: model.email,
            hire_date: model.hire_date,
            manager_id: model.manager_id,
            department_id: model.department_id,
        }
    }
}

fn views(models: Vec<employees::Model>) -> Json<Vec<EmployeeView>> {
    Json(models.into_iter().map(EmployeeView::from).collect())
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/employees", get(list).post(create))
        .route("/employees/batch", delete(delete_batch))
        .route("/employees/no-manager", get(without_manager))
        .route(
            "/employees/manager/{id}/direct",
            get(direct_reports).delete(remove_direct_reports),
        )
        .route(
            "/employees/manager/{id}/all",
            get(all_reports).delete(remove_all_reports),
        )
        .route(
            "/employees/department/{id}",
            get(by_department).delete(remove_department_employees),
        )
        .route("/employees/{id}", get(show).put(update).delete(destroy))
        .route("/employees/{id}/hierarchy", get(reporting_hierarchy))
        .route("/employees/{id}/manager/{manager_id}", put(set_manager))
}

async fn create(
    State(state): State<AppState>,
    Json(draft): Json<EmployeeDraft>,
) -> ApiResult<(StatusCode, Json<EmployeeView>)> {
    let model = state.hr.employees.create(draft).await?;
    Ok((StatusCode::CREATED, Json(model.into())))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeView>>> {
    Ok(views(state.hr.employees.list().await?))
}

async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Json<EmployeeView>> {
    Ok(Json(state.hr.employees.get(id).await?.into()))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(update): Json<EmployeeUpdate>,
) -> ApiResult<Json<EmployeeView>> {
    Ok(Json(state.hr.employees.update(id, update).await?.into()))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    state.hr.employees.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_batch(
    State(state): State<AppState>,
    Json(ids): Json<Vec<i32>>,
) -> ApiResult<StatusCode> {
    state.hr.employees.delete_batch(&ids).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_manager(
    State(state): State<AppState>,
    Path((id, manager_id)): Path<(i32, i32)>,
) -> ApiResult<Json<EmployeeView>> {
    Ok(Json(state.hr.employees.set_manager(id, manager_id).await?.into()))
}

async fn direct_reports(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<EmployeeView>>> {
    Ok(views(state.hr.employees.direct_reports(id).await?))
}

async fn all_reports(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<EmployeeView>>> {
    Ok(views(state.hr.employees.all_reports(id).await?))
}

async fn remove_all_reports(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.hr.employees.remove_all_reports(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_direct_reports(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.hr.employees.remove_direct_reports(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn reporting_hierarchy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<EmployeeView>>> {
    Ok(views(state.hr.employees.reporting_hierarchy(id).await?))
}

async fn by_department(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<Vec<EmployeeView>>> {
    Ok(views(state.hr.employees.by_department(id).await?))
}

async fn remove_department_employees(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.hr.employees.remove_department_employees(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn without_manager(State(state): State<AppState>) -> ApiResult<Json<Vec<EmployeeView>>> {
    Ok(views(state.hr.employees.without_manager().await?))
}
