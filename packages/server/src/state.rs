use std::sync::Arc;

use crate::service::IntegrationService;
use crate::views::Templates;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<IntegrationService>,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(service: IntegrationService) -> Result<Self, minijinja::Error> {
        Ok(Self {
            service: Arc::new(service),
            templates: Arc::new(Templates::new()?),
        })
    }
}
