mod common;

use anyhow::Result;
use chrono::NaiveDate;
use common::{TestContext, ids};
use products_hr::{EmployeeDraft, EmployeeUpdate, HrError};

#[tokio::test]
async fn create_and_read_employee() -> Result<()> {
    let ctx = TestContext::new().await?;
    let hired = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
    let draft = EmployeeDraft::new("Ada", "Lovelace", "Engineer", "ada@example.com")
        .with_hire_date(hired);
    let created = ctx.hr.employees.create(draft).await?;

    let loaded = ctx.hr.employees.get(created.id).await?;
    assert_eq!(loaded, created);
    assert_eq!(loaded.hire_date, Some(hired));
    assert!(loaded.manager_id.is_none());
    assert_eq!(ctx.hr.employees.list().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn missing_employee_is_not_found() -> Result<()> {
    let ctx = TestContext::new().await?;
    let err = ctx.hr.employees.get(404).await.unwrap_err();
    assert!(matches!(err, HrError::NotFound { entity: "employee", .. }));
    Ok(())
}

#[tokio::test]
async fn create_rejects_unknown_references() -> Result<()> {
    let ctx = TestContext::new().await?;
    let draft = EmployeeDraft::new("Ada", "Lovelace", "Engineer", "ada@example.com")
        .with_department(9);
    let err = ctx.hr.employees.create(draft).await.unwrap_err();
    assert!(matches!(err, HrError::NotFound { entity: "department", .. }));

    let draft = EmployeeDraft::new("Ada", "Lovelace", "Engineer", "ada@example.com")
        .with_manager(9);
    let err = ctx.hr.employees.create(draft).await.unwrap_err();
    assert!(matches!(err, HrError::NotFound { entity: "employee", .. }));
    assert!(ctx.hr.employees.list().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn update_replaces_profile_but_not_relations() -> Result<()> {
    let ctx = TestContext::new().await?;
    let eng = ctx.hr.departments.create("Eng").await?;
    let boss = ctx.hire_in("Boss", eng.id).await?;
    let worker = ctx.hire("Worker", Some(boss)).await?;

    let updated = ctx
        .hr
        .employees
        .update(
            worker,
            EmployeeUpdate {
                first_name: "Grace".into(),
                last_name: "Hopper".into(),
                title: "Admiral".into(),
                phone_number: Some("555-0100".into()),
                email: "grace@example.com".into(),
                hire_date: None,
            },
        )
        .await?;
    assert_eq!(updated.full_name(), "Grace Hopper");
    assert_eq!(updated.phone_number.as_deref(), Some("555-0100"));
    assert_eq!(updated.manager_id, Some(boss));
    assert_eq!(updated.department_id, Some(eng.id));
    Ok(())
}

#[tokio::test]
async fn deleting_unknown_ids_is_a_no_op() -> Result<()> {
    let ctx = TestContext::new().await?;
    let ada = ctx.hire("Ada", None).await?;

    assert_eq!(ctx.hr.employees.delete(999).await?, 0);
    assert_eq!(ctx.hr.employees.delete_batch(&[997, 998]).await?, 0);
    assert_eq!(ctx.hr.employees.delete_batch(&[]).await?, 0);
    assert_eq!(ids(&ctx.hr.employees.list().await?), vec![ada]);
    Ok(())
}

#[tokio::test]
async fn reports_of_unknown_manager_are_empty() -> Result<()> {
    let ctx = TestContext::new().await?;
    assert!(ctx.hr.employees.all_reports(4242).await?.is_empty());
    assert_eq!(ctx.hr.employees.remove_all_reports(4242).await?, 0);

    let ada = ctx.hire("Ada", None).await?;
    ctx.hire("Bob", Some(ada)).await?;
    assert_eq!(ctx.hr.employees.remove_all_reports(4242).await?, 0);
    assert_eq!(ctx.hr.employees.list().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn batch_delete_removes_known_ids() -> Result<()> {
    let ctx = TestContext::new().await?;
    let a = ctx.hire("A", None).await?;
    let b = ctx.hire("B", None).await?;
    let c = ctx.hire("C", None).await?;

    assert_eq!(ctx.hr.employees.delete_batch(&[a, c, 1234]).await?, 2);
    assert_eq!(ids(&ctx.hr.employees.list().await?), vec![b]);
    Ok(())
}

#[tokio::test]
async fn deleting_a_manager_promotes_reports_to_roots() -> Result<()> {
    let ctx = TestContext::new().await?;
    let eng = ctx.hr.departments.create("Eng").await?;
    let boss = ctx.hire_in("Boss", eng.id).await?;
    ctx.hr.departments.set_manager(eng.id, boss).await?;
    let worker = ctx.hire("Worker", Some(boss)).await?;

    ctx.hr.employees.delete(boss).await?;

    let worker = ctx.hr.employees.get(worker).await?;
    assert!(worker.manager_id.is_none());
    assert!(ctx.hr.departments.get(eng.id).await?.manager_id.is_none());
    assert_eq!(ids(&ctx.hr.employees.without_manager().await?), vec![worker.id]);
    Ok(())
}

#[tokio::test]
async fn set_manager_adopts_manager_department() -> Result<()> {
    let ctx = TestContext::new().await?;
    let eng = ctx.hr.departments.create("Eng").await?;
    let sales = ctx.hr.departments.create("Sales").await?;
    let boss = ctx.hire_in("Boss", eng.id).await?;
    let seller = ctx.hire_in("Seller", sales.id).await?;

    let updated = ctx.hr.employees.set_manager(seller, boss).await?;
    assert_eq!(updated.manager_id, Some(boss));
    assert_eq!(updated.department_id, Some(eng.id));

    // A manager without a department leaves the report's department alone.
    let loner = ctx.hire("Loner", None).await?;
    let other = ctx.hire_in("Other", sales.id).await?;
    let updated = ctx.hr.employees.set_manager(other, loner).await?;
    assert_eq!(updated.department_id, Some(sales.id));
    Ok(())
}

#[tokio::test]
async fn set_manager_clears_department_managed_elsewhere() -> Result<()> {
    let ctx = TestContext::new().await?;
    let eng = ctx.hr.departments.create("Eng").await?;
    let sales = ctx.hr.departments.create("Sales").await?;
    let boss = ctx.hire_in("Boss", eng.id).await?;
    let seller = ctx.hire_in("Seller", sales.id).await?;
    ctx.hr.departments.set_manager(sales.id, seller).await?;

    ctx.hr.employees.set_manager(seller, boss).await?;

    assert!(ctx.hr.departments.get(sales.id).await?.manager_id.is_none());
    Ok(())
}

#[tokio::test]
async fn set_manager_rejects_unknown_ids() -> Result<()> {
    let ctx = TestContext::new().await?;
    let ada = ctx.hire("Ada", None).await?;
    assert!(matches!(
        ctx.hr.employees.set_manager(ada, 77).await,
        Err(HrError::NotFound { .. })
    ));
    assert!(matches!(
        ctx.hr.employees.set_manager(77, ada).await,
        Err(HrError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn set_manager_rejects_cycles() -> Result<()> {
    let ctx = TestContext::new().await?;
    let a = ctx.hire("A", None).await?;
    let b = ctx.hire("B", Some(a)).await?;
    let c = ctx.hire("C", Some(b)).await?;

    assert!(matches!(
        ctx.hr.employees.set_manager(a, a).await,
        Err(HrError::Cycle(_))
    ));
    assert!(matches!(
        ctx.hr.employees.set_manager(a, c).await,
        Err(HrError::Cycle(_))
    ));
    assert!(ctx.hr.employees.get(a).await?.manager_id.is_none());
    Ok(())
}

#[tokio::test]
async fn reporting_hierarchy_walks_to_the_root() -> Result<()> {
    let ctx = TestContext::new().await?;
    let a = ctx.hire("A", None).await?;
    let b = ctx.hire("B", Some(a)).await?;
    let c = ctx.hire("C", Some(b)).await?;

    assert_eq!(ids(&ctx.hr.employees.reporting_hierarchy(c).await?), vec![c, b, a]);
    assert_eq!(ids(&ctx.hr.employees.reporting_hierarchy(a).await?), vec![a]);
    assert!(matches!(
        ctx.hr.employees.reporting_hierarchy(500).await,
        Err(HrError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn direct_and_transitive_reports() -> Result<()> {
    let ctx = TestContext::new().await?;
    let root = ctx.hire("Root", None).await?;
    let left = ctx.hire("Left", Some(root)).await?;
    let right = ctx.hire("Right", Some(root)).await?;
    let leaf = ctx.hire("Leaf", Some(left)).await?;
    let outsider = ctx.hire("Outsider", None).await?;

    let direct = ids(&ctx.hr.employees.direct_reports(root).await?);
    assert_eq!(direct, vec![left, right]);

    let all = ids(&ctx.hr.employees.all_reports(root).await?);
    assert_eq!(all, vec![left, leaf, right]);
    assert!(direct.iter().all(|id| all.contains(id)));

    assert!(ctx.hr.employees.all_reports(outsider).await?.is_empty());
    assert_eq!(
        ids(&ctx.hr.employees.without_manager().await?),
        vec![root, outsider]
    );
    assert!(matches!(
        ctx.hr.employees.direct_reports(9000).await,
        Err(HrError::NotFound { .. })
    ));
    Ok(())
}

#[tokio::test]
async fn remove_all_reports_keeps_the_manager() -> Result<()> {
    let ctx = TestContext::new().await?;
    let root = ctx.hire("Root", None).await?;
    let mid = ctx.hire("Mid", Some(root)).await?;
    ctx.hire("Leaf", Some(mid)).await?;
    let other = ctx.hire("Other", None).await?;

    assert_eq!(ctx.hr.employees.remove_all_reports(root).await?, 2);
    assert_eq!(ids(&ctx.hr.employees.list().await?), vec![root, other]);
    Ok(())
}

#[tokio::test]
async fn remove_direct_reports_promotes_grandchildren() -> Result<()> {
    let ctx = TestContext::new().await?;
    let a = ctx.hire("A", None).await?;
    let b = ctx.hire("B", Some(a)).await?;
    let c = ctx.hire("C", Some(b)).await?;

    assert_eq!(ctx.hr.employees.remove_direct_reports(a).await?, 1);

    assert!(matches!(
        ctx.hr.employees.get(b).await,
        Err(HrError::NotFound { .. })
    ));
    assert_eq!(ctx.hr.employees.get(c).await?.manager_id, Some(a));
    assert_eq!(ids(&ctx.hr.employees.direct_reports(a).await?), vec![c]);
    Ok(())
}

#[tokio::test]
async fn remove_direct_reports_flattens_every_sibling() -> Result<()> {
    let ctx = TestContext::new().await?;
    let m = ctx.hire("M", None).await?;
    let r1 = ctx.hire("R1", Some(m)).await?;
    let r2 = ctx.hire("R2", Some(m)).await?;
    let g1 = ctx.hire("G1", Some(r1)).await?;
    let g2 = ctx.hire("G2", Some(r2)).await?;
    let g3 = ctx.hire("G3", Some(r2)).await?;
    let deep = ctx.hire("Deep", Some(g3)).await?;

    assert_eq!(ctx.hr.employees.remove_direct_reports(m).await?, 2);

    let remaining = ids(&ctx.hr.employees.list().await?);
    assert!(!remaining.contains(&r1) && !remaining.contains(&r2));
    assert_eq!(
        ids(&ctx.hr.employees.direct_reports(m).await?),
        vec![g1, g2, g3]
    );
    assert_eq!(ctx.hr.employees.get(deep).await?.manager_id, Some(g3));
    for employee in ctx.hr.employees.list().await? {
        assert!(employee.manager_id != Some(r1) && employee.manager_id != Some(r2));
    }
    Ok(())
}

#[tokio::test]
async fn remove_department_employees_detaches_outside_reports() -> Result<()> {
    let ctx = TestContext::new().await?;
    let eng = ctx.hr.departments.create("Eng").await?;
    let sales = ctx.hr.departments.create("Sales").await?;
    let boss = ctx.hire_in("Boss", eng.id).await?;
    let dev = ctx.hire("Dev", Some(boss)).await?;
    let seller = ctx.hire("Seller", Some(boss)).await?;
    // Seller moves to Sales but keeps reporting to Boss.
    ctx.hr.departments.set_manager(sales.id, seller).await?;

    assert_eq!(ids(&ctx.hr.employees.by_department(eng.id).await?), vec![boss, dev]);
    assert_eq!(ctx.hr.employees.remove_department_employees(eng.id).await?, 2);

    let seller = ctx.hr.employees.get(seller).await?;
    assert!(seller.manager_id.is_none());
    assert_eq!(seller.department_id, Some(sales.id));
    assert_eq!(ids(&ctx.hr.employees.list().await?), vec![seller.id]);
    assert_eq!(ctx.hr.employees.remove_department_employees(eng.id).await?, 0);
    Ok(())
}
