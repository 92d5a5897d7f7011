use crate::errors::AppError;
use crate::models::{EventForm, GroupForm, Tab, TabQuery, UserForm};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Form,
};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<TabQuery>,
) -> Result<Html<String>, AppError> {
    let tab = match query.tab.as_deref() {
        Some(raw) => raw.parse::<Tab>().map_err(AppError::bad_request)?,
        None => state.controller.active_tab().await,
    };

    state.controller.select_tab(tab).await;
    Ok(render(&state).await)
}

pub async fn create_user(State(state): State<AppState>, Form(form): Form<UserForm>) -> Html<String> {
    state.controller.submit_user(form).await;
    render(&state).await
}

pub async fn create_group(
    State(state): State<AppState>,
    Form(form): Form<GroupForm>,
) -> Html<String> {
    state.controller.submit_group(form).await;
    render(&state).await
}

pub async fn create_event(
    State(state): State<AppState>,
    Form(form): Form<EventForm>,
) -> Html<String> {
    state.controller.submit_event(form).await;
    render(&state).await
}

pub async fn healthz() -> &'static str {
    "ok"
}

async fn render(state: &AppState) -> Html<String> {
    Html(render_index(&state.controller.snapshot().await))
}
