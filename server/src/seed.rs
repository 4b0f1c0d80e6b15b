use anyhow::{Context, Result};
use chrono::NaiveDate;
use products_hr::{EmployeeDraft, HrError, HrModule};
use tracing::info;

const ENGINEERING: &str = "Engineering";
const SALES: &str = "Sales";

/// Seeds two departments with a small reporting tree each. Skips when the
/// demo departments already exist.
pub async fn seed(hr: &HrModule) -> Result<()> {
    match hr.departments.get_by_name(ENGINEERING).await {
        Ok(_) => {
            info!("demo data already present; skipping seed");
            return Ok(());
        }
        Err(HrError::NotFound { .. }) => {}
        Err(err) => return Err(err.into()),
    }

    let engineering = hr.departments.create(ENGINEERING).await?;
    let sales = hr.departments.create(SALES).await?;

    let alice = hr
        .employees
        .create(
            draft("Alice", "Nguyen", "VP Engineering", "2018-04-02")?.with_department(engineering.id),
        )
        .await?;
    hr.departments.set_manager(engineering.id, alice.id).await?;
    let bob = hr
        .employees
        .create(draft("Bob", "Okafor", "Staff Engineer", "2019-09-16")?.with_manager(alice.id))
        .await?;
    hr.employees
        .create(draft("Erin", "Park", "Software Engineer", "2022-01-10")?.with_manager(bob.id))
        .await?;

    let carol = hr
        .employees
        .create(draft("Carol", "Silva", "Head of Sales", "2017-06-05")?.with_department(sales.id))
        .await?;
    hr.departments.set_manager(sales.id, carol.id).await?;
    hr.employees
        .create(draft("Dan", "Moreau", "Account Executive", "2021-11-01")?.with_manager(carol.id))
        .await?;

    let total = hr.employees.list().await?.len();
    info!(departments = 2, employees = total, "demo organisation seeded");
    Ok(())
}

fn draft(first_name: &str, last_name: &str, title: &str, hired: &str) -> Result<EmployeeDraft> {
    let hire_date = NaiveDate::parse_from_str(hired, "%Y-%m-%d")
        .with_context(|| format!("invalid seed hire date {hired}"))?;
    let email = format!(
        "{}.{}@example.com",
        first_name.to_lowercase(),
        last_name.to_lowercase()
    );
    Ok(EmployeeDraft::new(first_name, last_name, title, email).with_hire_date(hire_date))
}
