use anyhow::Result;
use ratatui::{Frame, crossterm::event::KeyCode, layout::Rect};
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::{
    routes::{log::LogRoute, playback::PlaybackRoute, queue::QueueRoute},
    state::AppState,
};

/// Trait that all routes must implement
pub trait RouteHandler: std::fmt::Debug {
    /// Render this route's UI
    fn render(&self, frame: &mut Frame, area: Rect, state: &AppState);

    /// Handle keyboard input for this route
    fn handle_input(&mut self, key: KeyCode, state: &mut AppState) -> Result<RouteAction>;

    /// Get the display name for breadcrumbs/navigation
    fn name(&self) -> &str;

    /// Optional: Called when entering this route
    fn on_enter(&mut self, _state: &mut AppState) -> Result<()> {
        Ok(())
    }

    fn help_items(&self, _state: &AppState) -> Vec<(&str, &str)> {
        vec![("Tab", "Switch Tab"), ("Q", "Quit")]
    }
}

/// Actions that can be returned from route handlers
#[derive(Debug)]
pub enum RouteAction {
    /// Do nothing, stay on current route
    None,
    /// Go back to previous route
    Pop,
    /// Navigate to a new route
    Push(Box<dyn RouteHandler>),
}

/// Main tabs, in sidebar order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Tab {
    Playback,
    Queue,
    Log,
}

impl Tab {
    pub fn route(self) -> Box<dyn RouteHandler> {
        match self {
            Tab::Playback => Box::new(PlaybackRoute),
            Tab::Queue => Box::new(QueueRoute),
            Tab::Log => Box::new(LogRoute::new()),
        }
    }

    pub fn from_name(name: &str) -> Option<Tab> {
        Tab::iter().find(|tab| tab.to_string() == name)
    }

    /// Next tab, wrapping around
    pub fn cycle(self) -> Tab {
        let tabs: Vec<Tab> = Tab::iter().collect();
        let idx = tabs.iter().position(|t| *t == self).unwrap_or(0);
        tabs[(idx + 1) % tabs.len()]
    }
}

/// Router manages the navigation stack
pub struct Router {
    /// Stack of route handlers, last element is current route
    stack: Vec<Box<dyn RouteHandler>>,
}

impl Router {
    pub fn new(initial_route: Box<dyn RouteHandler>) -> Self {
        Self {
            stack: vec![initial_route],
        }
    }

    /// Get current route (top of stack)
    pub fn current(&self) -> &dyn RouteHandler {
        self.stack
            .last()
            .expect("Stack should never be empty")
            .as_ref()
    }

    /// Get mutable reference to current route
    pub fn current_mut(&mut self) -> &mut Box<dyn RouteHandler> {
        self.stack.last_mut().expect("Stack should never be empty")
    }

    /// Tab the current route belongs to, if it is a main tab
    pub fn current_tab(&self) -> Option<Tab> {
        Tab::from_name(self.current().name())
    }

    /// Execute a route action
    pub fn execute_action(&mut self, action: RouteAction, state: &mut AppState) -> Result<()> {
        match action {
            RouteAction::None => Ok(()),
            RouteAction::Pop => {
                self.pop();
                Ok(())
            }
            RouteAction::Push(route) => self.push(route, state),
        }
    }

    /// Navigate to a new route (push onto stack)
    pub fn push(&mut self, mut route: Box<dyn RouteHandler>, state: &mut AppState) -> Result<()> {
        route.on_enter(state)?;
        self.stack.push(route);
        Ok(())
    }

    /// Go back (pop from stack)
    pub fn pop(&mut self) {
        // Keep at least one route in the stack
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    /// Clear stack and navigate to route
    pub fn reset_to(&mut self, mut route: Box<dyn RouteHandler>, state: &mut AppState) -> Result<()> {
        self.stack.clear();
        route.on_enter(state)?;
        self.stack.push(route);
        Ok(())
    }

    /// Get the depth of navigation
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_cycle_in_sidebar_order() {
        assert_eq!(Tab::Playback.cycle(), Tab::Queue);
        assert_eq!(Tab::Queue.cycle(), Tab::Log);
        assert_eq!(Tab::Log.cycle(), Tab::Playback);
    }

    #[test]
    fn tab_routes_carry_the_tab_name() {
        for tab in Tab::iter() {
            assert_eq!(Tab::from_name(tab.route().name()), Some(tab));
        }
        assert_eq!(Tab::from_name("Equalizer"), None);
    }

    #[test]
    fn pop_keeps_the_root_route() {
        let mut router = Router::new(Tab::Queue.route());
        router.pop();
        assert_eq!(router.depth(), 1);
        assert_eq!(router.current_tab(), Some(Tab::Queue));
    }
}
