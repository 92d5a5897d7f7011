use crate::api::ApiClient;
use crate::controller::Controller;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<Controller>,
}

impl AppState {
    pub fn new(api: ApiClient) -> Self {
        Self {
            controller: Arc::new(Controller::new(api)),
        }
    }
}
