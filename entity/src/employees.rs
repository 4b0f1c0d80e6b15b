use crate::departments;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub phone_number: Option<String>,
    pub email: String,
    pub hire_date: Option<Date>,
    #[sea_orm(indexed)]
    pub manager_id: Option<i32>,
    #[sea_orm(indexed)]
    pub department_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Manager,
    Department,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Manager => Entity::belongs_to(Entity)
                .from(Column::ManagerId)
                .to(Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
            Self::Department => Entity::belongs_to(departments::Entity)
                .from(Column::DepartmentId)
                .to(departments::Column::Id)
                .on_delete(ForeignKeyAction::SetNull)
                .into(),
        }
    }
}

impl Related<departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
