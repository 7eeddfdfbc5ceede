use project_common::grpc::proto::project::{
    MenuMessage, ProjectDetailResponse, ProjectMessage, ProjectTemplateMessage,
    SaveProjectResponse, TaskStagesOnlyName,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SelfListForm {
    #[serde(default)]
    pub select_by: String,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListForm {
    /// -1 all, 0 custom, 1 system.
    pub view_type: Option<i32>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveProjectForm {
    #[serde(default)]
    pub template_code: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 90))]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub id: Option<i64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReadProjectForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub project_code: String,
}

/// A page of results; `list` is never `null`.
#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    pub list: Vec<T>,
    pub total: i64,
}

impl<T> ListPage<T> {
    pub fn new<S, I>(items: I, total: i64) -> Self
    where
        I: IntoIterator<Item = S>,
        T: From<S>,
    {
        Self {
            list: items.into_iter().map(T::from).collect(),
            total,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: i64,
    pub pid: i64,
    pub title: String,
    pub icon: String,
    pub url: String,
    pub file_path: String,
    pub params: String,
    pub node: String,
    pub sort: i32,
    pub status: i32,
    pub is_inner: i32,
    pub full_url: String,
    pub children: Vec<Menu>,
}

impl From<MenuMessage> for Menu {
    fn from(m: MenuMessage) -> Self {
        Menu {
            id: m.id,
            pid: m.pid,
            title: m.title,
            icon: m.icon,
            url: m.url,
            file_path: m.file_path,
            params: m.params,
            node: m.node,
            sort: m.sort,
            status: m.status,
            is_inner: m.is_inner,
            full_url: m.full_url,
            children: m.children.into_iter().map(Menu::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAndMember {
    pub id: i64,
    pub code: String,
    pub cover: String,
    pub name: String,
    pub description: String,
    pub access_control_type: String,
    pub template_code: String,
    pub schedule: f64,
    pub create_time: String,
    pub organization_code: String,
    pub archive: i32,
    pub task_board_theme: String,
    pub member_code: i64,
    pub join_time: String,
    pub is_owner: i64,
    pub owner_name: String,
    pub collected: i32,
}

impl From<ProjectMessage> for ProjectAndMember {
    fn from(p: ProjectMessage) -> Self {
        ProjectAndMember {
            id: p.id,
            code: p.code,
            cover: p.cover,
            name: p.name,
            description: p.description,
            access_control_type: p.access_control_type,
            template_code: p.template_code,
            schedule: p.schedule,
            create_time: p.create_time,
            organization_code: p.organization_code,
            archive: p.archive,
            task_board_theme: p.task_board_theme,
            member_code: p.member_code,
            join_time: p.join_time,
            is_owner: p.is_owner,
            owner_name: p.owner_name,
            collected: p.collected,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TaskStage {
    pub name: String,
}

impl From<TaskStagesOnlyName> for TaskStage {
    fn from(t: TaskStagesOnlyName) -> Self {
        TaskStage { name: t.name }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTemplate {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub description: String,
    pub sort: i32,
    pub create_time: String,
    pub organization_code: String,
    pub cover: String,
    pub member_code: String,
    pub is_system: i32,
    pub task_stages: Vec<TaskStage>,
}

impl From<ProjectTemplateMessage> for ProjectTemplate {
    fn from(t: ProjectTemplateMessage) -> Self {
        ProjectTemplate {
            id: t.id,
            code: t.code,
            name: t.name,
            description: t.description,
            sort: t.sort,
            create_time: t.create_time,
            organization_code: t.organization_code,
            cover: t.cover,
            member_code: t.member_code,
            is_system: t.is_system,
            task_stages: t.task_stages.into_iter().map(TaskStage::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SaveProject {
    pub id: i64,
    pub code: String,
    pub cover: String,
    pub name: String,
    pub description: String,
    pub create_time: String,
    pub task_board_theme: String,
    pub organization_code: String,
}

impl From<SaveProjectResponse> for SaveProject {
    fn from(p: SaveProjectResponse) -> Self {
        SaveProject {
            id: p.id,
            code: p.code,
            cover: p.cover,
            name: p.name,
            description: p.description,
            create_time: p.create_time,
            task_board_theme: p.task_board_theme,
            organization_code: p.organization_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetail {
    pub code: String,
    pub cover: String,
    pub name: String,
    pub description: String,
    pub access_control_type: String,
    pub template_code: String,
    pub schedule: f64,
    pub create_time: String,
    pub organization_code: String,
    pub archive: i32,
    pub task_board_theme: String,
    pub owner_name: String,
    pub owner_avatar: String,
    pub collected: i32,
}

impl From<ProjectDetailResponse> for ProjectDetail {
    fn from(d: ProjectDetailResponse) -> Self {
        ProjectDetail {
            code: d.code,
            cover: d.cover,
            name: d.name,
            description: d.description,
            access_control_type: d.access_control_type,
            template_code: d.template_code,
            schedule: d.schedule,
            create_time: d.create_time,
            organization_code: d.organization_code,
            archive: d.archive,
            task_board_theme: d.task_board_theme,
            owner_name: d.owner_name,
            owner_avatar: d.owner_avatar,
            collected: d.collected,
        }
    }
}
