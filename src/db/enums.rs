use serde::{Deserialize, Serialize};

/// Role held by a user through their employee record. A user without one is
/// "unemployed" and only gets the public read surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeType {
    Admin,
    Reviewer,
    Worker,
    Reporter,
}

impl EmployeeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeType::Admin => "admin",
            EmployeeType::Reviewer => "reviewer",
            EmployeeType::Worker => "worker",
            EmployeeType::Reporter => "reporter",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(EmployeeType::Admin),
            "reviewer" => Some(EmployeeType::Reviewer),
            "worker" => Some(EmployeeType::Worker),
            "reporter" => Some(EmployeeType::Reporter),
            _ => None,
        }
    }
}

/// Discriminant shared by everything that exists once for issues and once for
/// tasks (types, comments, closures, reopenings, connections, subscriptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollerKind {
    Issue,
    Task,
}

impl RollerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RollerKind::Issue => "issue",
            RollerKind::Task => "task",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "issue" | "issues" => Some(RollerKind::Issue),
            "task" | "tasks" => Some(RollerKind::Task),
            _ => None,
        }
    }

    pub fn mailer_class(&self) -> &'static str {
        match self {
            RollerKind::Issue => "IssueMailer",
            RollerKind::Task => "TaskMailer",
        }
    }
}

/// Derived task status. Never stored; computed from `closed` and the current
/// assignee count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Open,
    Assigned,
    Closed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Assigned => "assigned",
            TaskStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewState {
    Pending,
    Approved,
    Disapproved,
}

impl ReviewState {
    pub fn from_approved(approved: Option<bool>) -> Self {
        match approved {
            None => ReviewState::Pending,
            Some(true) => ReviewState::Approved,
            Some(false) => ReviewState::Disapproved,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewState::Pending => "pending",
            ReviewState::Approved => "approved",
            ReviewState::Disapproved => "disapproved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationEvent {
    New,
    Comment,
    Status,
}

impl NotificationEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationEvent::New => "new",
            NotificationEvent::Comment => "comment",
            NotificationEvent::Status => "status",
        }
    }
}
