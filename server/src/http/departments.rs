use axum::{
    Json, Router,
    extract::{FromRequest, Path, Query, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use entity::departments;
use platform_api::ApiResult;
use serde::{Deserialize, Serialize};

use super::AppState;

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentView {
    pub id: i32,
    pub name: String,
    pub manager_id: Option<i32>,
}

impl From<departments::Model> for DepartmentView {
    fn from(model: departments::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            manager_id: model.manager_id,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DepartmentName {
    name: String,
}

/// New department name, sent either as `{"name": ...}` JSON or as a plain
/// text body.
struct NewName(String);

impl<S: Send + Sync> FromRequest<S> for NewName {
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        if is_json {
            let Json(body) = Json::<DepartmentName>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(body.name))
        } else {
            let raw = String::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self(raw))
        }
    }
}

#[derive(Debug, Deserialize)]
struct MergeQuery {
    #[serde(rename = "deptAName")]
    absorbing: String,
    #[serde(rename = "deptBName")]
    absorbed: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/departments", get(list).post(create))
        .route("/departments/merge", post(merge))
        .route("/departments/name/{name}", get(show_by_name))
        .route("/departments/{id}", get(show).delete(destroy))
        .route("/departments/{id}/manager/{employee_id}", put(set_manager))
        .route("/departments/{id}/name", put(rename))
        .route("/departments/{id}/employees", delete(remove_employees))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<DepartmentName>,
) -> ApiResult<(StatusCode, Json<DepartmentView>)> {
    let model = state.hr.departments.create(&body.name).await?;
    Ok((StatusCode::CREATED, Json(model.into())))
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<DepartmentView>>> {
    let models = state.hr.departments.list().await?;
    Ok(Json(models.into_iter().map(DepartmentView::from).collect()))
}

async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<DepartmentView>> {
    Ok(Json(state.hr.departments.get(id).await?.into()))
}

async fn show_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<DepartmentView>> {
    Ok(Json(state.hr.departments.get_by_name(&name).await?.into()))
}

async fn destroy(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<StatusCode> {
    state.hr.departments.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn set_manager(
    State(state): State<AppState>,
    Path((id, employee_id)): Path<(i32, i32)>,
) -> ApiResult<Json<DepartmentView>> {
    Ok(Json(state.hr.departments.set_manager(id, employee_id).await?.into()))
}

async fn rename(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    NewName(name): NewName,
) -> ApiResult<Json<DepartmentView>> {
    Ok(Json(state.hr.departments.rename(id, &name).await?.into()))
}

async fn merge(
    State(state): State<AppState>,
    Query(query): Query<MergeQuery>,
) -> ApiResult<Json<DepartmentView>> {
    let merged = state
        .hr
        .departments
        .merge(&query.absorbing, &query.absorbed)
        .await?;
    Ok(Json(merged.into()))
}

async fn remove_employees(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StatusCode> {
    state.hr.departments.remove_employees(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
