//! UI state and the transitions triggered by tab switches and form submits.

use crate::api::ApiClient;
use crate::errors::ApiError;
use crate::models::{
    Event, EventForm, Group, GroupForm, NewEvent, NewGroup, NewUser, Tab, User, UserForm,
};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub active_tab: Tab,
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub events: Vec<Event>,
    pub user_form: UserForm,
    pub group_form: GroupForm,
    pub event_form: EventForm,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

enum Listing {
    Users(Vec<User>),
    Groups(Vec<Group>),
    Events(Vec<Event>),
}

impl UiState {
    fn apply(&mut self, listing: Listing) {
        match listing {
            Listing::Users(users) => self.users = users,
            Listing::Groups(groups) => self.groups = groups,
            Listing::Events(events) => self.events = events,
        }
    }
}

pub struct Controller {
    api: ApiClient,
    state: Mutex<UiState>,
}

impl Controller {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Mutex::new(UiState::default()),
        }
    }

    pub async fn snapshot(&self) -> UiState {
        self.state.lock().await.clone()
    }

    pub async fn active_tab(&self) -> Tab {
        self.state.lock().await.active_tab
    }

    /// Activate `tab` and reload its lists. Results are dropped if another
    /// activation started while this one was waiting on the backend.
    pub async fn select_tab(&self, tab: Tab) {
        let generation = {
            let mut state = self.state.lock().await;
            state.active_tab = tab;
            state.loading = true;
            state.error = None;
            state.generation += 1;
            state.generation
        };

        for &resource in tab.resources() {
            let result = self.fetch(resource).await;
            let mut state = self.state.lock().await;
            if state.generation != generation {
                debug!(%tab, generation, "discarding stale tab load");
                return;
            }
            match result {
                Ok(listing) => state.apply(listing),
                Err(err) => {
                    state.error = Some(err.message);
                    state.loading = false;
                    return;
                }
            }
        }

        let mut state = self.state.lock().await;
        if state.generation == generation {
            state.loading = false;
        }
    }

    pub async fn submit_user(&self, form: UserForm) {
        self.begin_submit(|state| state.user_form = form.clone()).await;
        match self.api.create_user(&NewUser::from(&form)).await {
            Ok(user) => {
                info!(id = user.id, "created user");
                self.state.lock().await.user_form = UserForm::default();
                self.refresh(Tab::Users).await;
            }
            Err(err) => self.fail(err).await,
        }
    }

    pub async fn submit_group(&self, form: GroupForm) {
        self.begin_submit(|state| state.group_form = form.clone()).await;
        match self.api.create_group(&NewGroup::from(&form)).await {
            Ok(group) => {
                info!(id = group.id, "created group");
                self.state.lock().await.group_form = GroupForm::default();
                self.refresh(Tab::Groups).await;
            }
            Err(err) => self.fail(err).await,
        }
    }

    pub async fn submit_event(&self, form: EventForm) {
        self.begin_submit(|state| state.event_form = form.clone()).await;
        let Ok(group_id) = form.group_id.trim().parse::<i64>() else {
            self.fail(ApiError::new("Select a group")).await;
            return;
        };
        match self.api.create_event(group_id, &NewEvent::from(&form)).await {
            Ok(event) => {
                info!(id = event.id, group_id, "created event");
                self.state.lock().await.event_form = EventForm::default();
                self.refresh(Tab::Events).await;
            }
            Err(err) => self.fail(err).await,
        }
    }

    /// Also clears `loading`: a tab load whose request was dropped mid-fetch
    /// never gets to reset it.
    async fn begin_submit(&self, store_form: impl FnOnce(&mut UiState)) {
        let mut state = self.state.lock().await;
        store_form(&mut state);
        state.error = None;
        state.loading = false;
    }

    async fn fail(&self, err: ApiError) {
        warn!("action failed: {err}");
        self.state.lock().await.error = Some(err.message);
    }

    async fn refresh(&self, resource: Tab) {
        match self.fetch(resource).await {
            Ok(listing) => self.state.lock().await.apply(listing),
            Err(err) => self.fail(err).await,
        }
    }

    async fn fetch(&self, resource: Tab) -> Result<Listing, ApiError> {
        match resource {
            Tab::Users => self.api.list_users().await.map(Listing::Users),
            Tab::Groups => self.api.list_groups().await.map(Listing::Groups),
            Tab::Events => self.api.list_events().await.map(Listing::Events),
        }
    }
}
