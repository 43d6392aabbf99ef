//! Navigation collaborator

/// Moves the host application to another route.
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, route: &str);
}

/// Navigator that only logs the requested route.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate_to(&self, route: &str) {
        log::info!("Navigation requested: {}", route);
    }
}
