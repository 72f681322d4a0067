//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: post id, jobs in flight, status line
//! - `NavigationPanel`: viewport channel, selection record, activity log
//! - `Toasts`: dispatcher notices
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `PostMenu`: the "AI Actions" overlay
//!
//! Components receive external data as props, never by reaching into `App`.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

pub mod navigation_panel;
pub mod post_menu;
pub mod title_bar;
pub mod toast;

pub use navigation_panel::NavigationPanel;
pub use post_menu::{MenuEvent, PostMenu, PostMenuState};
pub use title_bar::TitleBar;
pub use toast::Toasts;

/// A `width` x `height` rect centered in `outer`, clamped to fit.
pub fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let [center_v] = Layout::vertical([Constraint::Length(height.min(outer.height))])
        .flex(Flex::Center)
        .areas(outer);
    let [center] = Layout::horizontal([Constraint::Length(width.min(outer.width))])
        .flex(Flex::Center)
        .areas(center_v);
    center
}
