use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Span;

use crate::core::navigation::NavigationState;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{NavigationPanel, PostMenu, TitleBar, Toasts};

const HELP_TEXT: &str = " . menu  s/t/r run  x dismiss  q quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [title_area, main_area, help_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());

    TitleBar {
        target: app.target.message_id(),
        status_message: &app.status_message,
        in_flight: app.in_flight,
    }
    .render(frame, title_area);

    NavigationPanel {
        active_channel: app.active_channel.as_deref(),
        selection: app.navigation.current(),
        activity: &app.activity,
    }
    .render(frame, main_area);

    frame.render_widget(
        Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray)),
        help_area,
    );

    if let Some(menu) = tui.menu.as_mut() {
        PostMenu::new(menu, app.target.message_id()).render(frame, main_area);
    }

    Toasts {
        notices: &app.notices,
    }
    .render(frame, main_area);
}
