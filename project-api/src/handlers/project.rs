use axum::extract::State;
use project_common::grpc::proto::project::ProjectRpcRequest;

use crate::middleware::{CurrentMember, ValidForm};
use crate::models::project::{
    ListPage, Menu, ProjectAndMember, ProjectDetail, ProjectTemplate, ReadProjectForm,
    SaveProject, SaveProjectForm, SelfListForm, TemplateListForm,
};
use crate::models::{ApiError, ApiResult, Page};
use crate::services::call_rpc;
use crate::AppState;

#[tracing::instrument(skip_all, fields(member_id = member.member_id))]
pub async fn index(
    State(state): State<AppState>,
    member: CurrentMember,
) -> Result<ApiResult<Vec<Menu>>, ApiError> {
    let rsp = call_rpc("Index", state.rpc_timeout, state.project_rpc.index()).await?;

    Ok(ApiResult::success(
        rsp.menus.into_iter().map(Menu::from).collect(),
    ))
}

#[tracing::instrument(skip_all, fields(member_id = member.member_id))]
pub async fn self_list(
    State(state): State<AppState>,
    member: CurrentMember,
    ValidForm(form): ValidForm<SelfListForm>,
) -> Result<ApiResult<ListPage<ProjectAndMember>>, ApiError> {
    let page = Page::clamp(form.page, form.page_size);
    let request = ProjectRpcRequest {
        member_id: member.member_id,
        select_by: form.select_by,
        page: page.page,
        page_size: page.page_size,
        organization_code: member.organization_code,
        ..Default::default()
    };

    let rsp = call_rpc(
        "FindProjectByMemId",
        state.rpc_timeout,
        state.project_rpc.find_project_by_mem_id(request),
    )
    .await?;

    Ok(ApiResult::success(ListPage::new(rsp.pm, rsp.total)))
}

#[tracing::instrument(skip_all, fields(member_id = member.member_id))]
pub async fn project_template(
    State(state): State<AppState>,
    member: CurrentMember,
    ValidForm(form): ValidForm<TemplateListForm>,
) -> Result<ApiResult<ListPage<ProjectTemplate>>, ApiError> {
    let page = Page::clamp(form.page, form.page_size);
    let request = ProjectRpcRequest {
        member_id: member.member_id,
        view_type: form.view_type.unwrap_or_default(),
        page: page.page,
        page_size: page.page_size,
        organization_code: member.organization_code,
        ..Default::default()
    };

    let rsp = call_rpc(
        "FindProjectTemplate",
        state.rpc_timeout,
        state.project_rpc.find_project_template(request),
    )
    .await?;

    Ok(ApiResult::success(ListPage::new(rsp.ptm, rsp.total)))
}

#[tracing::instrument(skip_all, fields(member_id = member.member_id))]
pub async fn save_project(
    State(state): State<AppState>,
    member: CurrentMember,
    ValidForm(form): ValidForm<SaveProjectForm>,
) -> Result<ApiResult<SaveProject>, ApiError> {
    let request = ProjectRpcRequest {
        member_id: member.member_id,
        organization_code: member.organization_code,
        template_code: form.template_code,
        name: form.name,
        description: form.description,
        id: form.id.unwrap_or_default(),
        ..Default::default()
    };

    let rsp = call_rpc(
        "SaveProject",
        state.rpc_timeout,
        state.project_rpc.save_project(request),
    )
    .await?;

    Ok(ApiResult::success(SaveProject::from(rsp)))
}

#[tracing::instrument(skip_all, fields(member_id = member.member_id))]
pub async fn read_project(
    State(state): State<AppState>,
    member: CurrentMember,
    ValidForm(form): ValidForm<ReadProjectForm>,
) -> Result<ApiResult<ProjectDetail>, ApiError> {
    let request = ProjectRpcRequest {
        member_id: member.member_id,
        project_code: form.project_code,
        organization_code: member.organization_code,
        ..Default::default()
    };

    let rsp = call_rpc(
        "FindProjectDetail",
        state.rpc_timeout,
        state.project_rpc.find_project_detail(request),
    )
    .await?;

    Ok(ApiResult::success(ProjectDetail::from(rsp)))
}
