//! Shared builders for the service-level tests. Everything goes through the
//! repositories so rows carry real timestamps and pass the same constraint
//! checks the services rely on.

use uuid::Uuid;

use roller_backend::db::Database;
use roller_backend::db::enums::{EmployeeType, RollerKind};
use roller_backend::db::models::category::{Category, NewCategory};
use roller_backend::db::models::issue::{Issue, NewIssue};
use roller_backend::db::models::project::{NewProject, Project};
use roller_backend::db::models::roller_type::{NewRollerType, RollerType};
use roller_backend::db::models::task::{NewTask, Task};
use roller_backend::db::models::user::{NewUser, User};
use roller_backend::db::repositories::categories::CategoryRepo;
use roller_backend::db::repositories::issues::IssueRepo;
use roller_backend::db::repositories::projects::ProjectRepo;
use roller_backend::db::repositories::roller_types::RollerTypeRepo;
use roller_backend::db::repositories::tasks::TaskRepo;
use roller_backend::db::repositories::users::UserRepo;
use roller_backend::services::context::RequestContext;

pub fn user(db: &mut Database, role: Option<EmployeeType>) -> User {
    let tag = Uuid::new_v4();
    UserRepo::insert(
        db,
        NewUser {
            name: format!("user-{}", tag),
            email: format!("{}@example.com", tag),
            employee_type: role,
        },
    )
    .unwrap()
}

pub fn ctx(user: &User) -> RequestContext {
    RequestContext::new(user.clone())
}

pub fn category(db: &mut Database, visible: bool, internal: bool) -> Category {
    CategoryRepo::insert(
        db,
        NewCategory {
            name: format!("category-{}", Uuid::new_v4()),
            visible,
            internal,
        },
    )
    .unwrap()
}

pub fn project(db: &mut Database, category_id: Uuid, visible: bool, internal: bool) -> Project {
    ProjectRepo::insert(
        db,
        NewProject {
            category_id,
            name: format!("project-{}", Uuid::new_v4()),
            visible,
            internal,
        },
    )
    .unwrap()
}

pub fn roller_type(db: &mut Database, kind: RollerKind) -> RollerType {
    RollerTypeRepo::insert(
        db,
        NewRollerType {
            kind,
            name: format!("type-{}", Uuid::new_v4()),
            icon: "bug".to_string(),
            color: "#cc0000".to_string(),
        },
    )
    .unwrap()
}

pub fn issue(db: &mut Database, project_id: Uuid, issue_type_id: Uuid, user_id: Uuid) -> Issue {
    IssueRepo::insert(
        db,
        NewIssue {
            project_id,
            issue_type_id,
            user_id,
            summary: "Something broke".to_string(),
            description: "Steps to reproduce".to_string(),
        },
    )
    .unwrap()
}

pub fn task(
    db: &mut Database,
    project_id: Uuid,
    task_type_id: Uuid,
    issue_id: Option<Uuid>,
    user_id: Uuid,
) -> Task {
    TaskRepo::insert(
        db,
        NewTask {
            project_id,
            task_type_id,
            issue_id,
            user_id,
            summary: "Fix it".to_string(),
            description: "Implementation notes".to_string(),
        },
    )
    .unwrap()
}

/// One user of each role plus a public category/project and both roller
/// types; the starting point for most tests.
pub struct World {
    pub db: Database,
    pub admin: User,
    pub reviewer: User,
    pub worker: User,
    pub reporter: User,
    pub category: Category,
    pub project: Project,
    pub issue_type: RollerType,
    pub task_type: RollerType,
}

pub fn world() -> World {
    let mut db = Database::new();
    let admin = user(&mut db, Some(EmployeeType::Admin));
    let reviewer = user(&mut db, Some(EmployeeType::Reviewer));
    let worker = user(&mut db, Some(EmployeeType::Worker));
    let reporter = user(&mut db, Some(EmployeeType::Reporter));
    let category = category(&mut db, true, false);
    let project = project(&mut db, category.id, true, false);
    let issue_type = roller_type(&mut db, RollerKind::Issue);
    let task_type = roller_type(&mut db, RollerKind::Task);
    World {
        db,
        admin,
        reviewer,
        worker,
        reporter,
        category,
        project,
        issue_type,
        task_type,
    }
}

/// Short pause so rows created on either side carry distinct timestamps;
/// cohort and causality checks compare them.
pub fn tick() {
    std::thread::sleep(std::time::Duration::from_millis(2));
}
