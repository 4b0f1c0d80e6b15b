use migration::{Migrator, MigratorTrait};
use platform_db::{DatabaseSettings, DbPool, connect};
use products_hr::{EmployeeDraft, HrModule};

pub struct TestContext {
    pub db: DbPool,
    pub hr: HrModule,
}

impl TestContext {
    pub async fn new() -> anyhow::Result<Self> {
        // A single connection keeps every query on the same in-memory database.
        let settings = DatabaseSettings {
            url: "sqlite::memory:".into(),
            max_connections: 1,
        };
        let db = connect(&settings).await?;
        Migrator::up(&db, None).await?;
        let hr = HrModule::new(db.clone());
        Ok(Self { db, hr })
    }

    pub async fn hire(&self, first_name: &str, manager: Option<i32>) -> anyhow::Result<i32> {
        let mut draft = EmployeeDraft::new(
            first_name,
            "Tester",
            "Engineer",
            format!("{}@example.com", first_name.to_lowercase()),
        );
        draft.manager_id = manager;
        Ok(self.hr.employees.create(draft).await?.id)
    }

    pub async fn hire_in(&self, first_name: &str, department: i32) -> anyhow::Result<i32> {
        let draft = EmployeeDraft::new(
            first_name,
            "Tester",
            "Engineer",
            format!("{}@example.com", first_name.to_lowercase()),
        )
        .with_department(department);
        Ok(self.hr.employees.create(draft).await?.id)
    }
}

pub fn ids(models: &[entity::employees::Model]) -> Vec<i32> {
    models.iter().map(|model| model.id).collect()
}
