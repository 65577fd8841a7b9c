//! Application state and page switching
//!
//! Fixed set of pages, each with its own persistent state. All pages share
//! one query client so cached lists survive navigation.

use macroquad::prelude::*;

use crate::api::DataAccess;
use crate::config::StudioConfig;
use crate::editor::{draw_editor, EditorState};
use crate::pages::{draw_dashboard, DesignersPage};
use crate::query::QueryClient;
use crate::ui::{
    draw_sidebar, draw_toasts, draw_tooltip, icon, ClickTracker, MouseState, NavEntry, Rect, UiContext, BG_COLOR,
    SIDEBAR_WIDTH,
};

/// The available pages (fixed set, one sidebar entry each)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard = 0,
    Designers = 1,
    Editor = 2,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Dashboard, Page::Designers, Page::Editor];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Designers => "Designers",
            Page::Editor => "3D Editor",
        }
    }

    pub fn from_index(i: usize) -> Option<Page> {
        Page::ALL.get(i).copied()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

const NAV: [NavEntry; 3] = [
    NavEntry::new(icon::HOUSE, "Dashboard"),
    NavEntry::new(icon::USERS, "Designers"),
    NavEntry::new(icon::LAYERS, "3D Editor"),
];

/// Main application state containing all page states
pub struct AppState {
    /// Currently shown page
    pub page: Page,

    /// Synchronous data access, driven by the query client's request queue
    pub api: DataAccess,

    /// Cached lists, in-flight writes and toasts
    pub query: QueryClient,

    pub designers: DesignersPage,

    pub editor: EditorState,

    /// Icon font (Lucide)
    pub icon_font: Option<Font>,

    ui: UiContext,
    clicks: ClickTracker,
}

impl AppState {
    pub fn new(config: &StudioConfig, api: DataAccess, icon_font: Option<Font>) -> Self {
        Self {
            page: Page::Dashboard,
            api,
            query: QueryClient::new(config.latency_scale, config.toast_seconds),
            designers: DesignersPage::new(),
            editor: EditorState::new(config.drag_threshold_px),
            icon_font,
            ui: UiContext::new(),
            clicks: ClickTracker::default(),
        }
    }

    pub fn set_page(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        log::debug!("page {} -> {}", self.page.label(), page.label());
        if self.page == Page::Editor {
            // Leaving mid-drag must not leave the pointer captured
            self.editor.drag.cancel();
        }
        self.page = page;
    }

    /// A dialog on the current page owns the mouse
    fn modal_open(&self) -> bool {
        match self.page {
            Page::Dashboard => false,
            Page::Designers => self.designers.has_dialog(),
            Page::Editor => self.editor.create_dialog.is_some(),
        }
    }

    /// Run one frame: poll input, settle requests, draw everything
    pub fn frame(&mut self) {
        let now = get_time();
        self.ui.begin_frame(MouseState::poll(&mut self.clicks, now));
        self.query.tick(now, &mut self.api);

        clear_background(BG_COLOR);
        let screen = Rect::screen(screen_width(), screen_height());
        let (sidebar_rect, content) = screen.split_h_px(SIDEBAR_WIDTH);

        let modal = self.modal_open();
        if modal {
            self.ui.suspend_input();
        }
        let clicked = draw_sidebar(&mut self.ui, sidebar_rect, &NAV, self.page.index(), self.icon_font.as_ref());
        if modal {
            self.ui.resume_input();
        }
        if let Some(page) = clicked.and_then(Page::from_index) {
            self.set_page(page);
        }

        let icon_font = self.icon_font.as_ref();
        match self.page {
            Page::Dashboard => {
                if let Some(page) = draw_dashboard(&mut self.ui, content, &mut self.query, icon_font) {
                    self.set_page(page);
                }
            }
            Page::Designers => self.designers.draw(&mut self.ui, content, &mut self.query, icon_font),
            Page::Editor => draw_editor(&mut self.ui, content, &mut self.editor, &mut self.query, icon_font),
        }

        draw_toasts(&mut self.ui, &mut self.query.toasts);
        draw_tooltip(&self.ui);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::tests::seeded;

    #[test]
    fn test_page_indices() {
        for (i, page) in Page::ALL.iter().enumerate() {
            assert_eq!(page.index(), i);
            assert_eq!(Page::from_index(i), Some(*page));
            assert_eq!(NAV[i].label, page.label());
        }
        assert_eq!(Page::from_index(3), None);
    }

    #[test]
    fn test_leaving_editor_releases_capture() {
        let mut app = AppState::new(&StudioConfig::default(), seeded(), None);
        app.set_page(Page::Editor);

        let capture = app.editor.captures.acquire().unwrap();
        app.editor.drag.pointer_down("o1", (10.0, 10.0), [0.0, 0.5, 0.0], 0.5, capture);
        assert!(app.editor.captures.is_captured());

        app.set_page(Page::Designers);
        assert!(!app.editor.drag.is_active());
        assert!(!app.editor.captures.is_captured());
    }

    #[test]
    fn test_modal_follows_page() {
        let mut app = AppState::new(&StudioConfig::default(), seeded(), None);
        app.set_page(Page::Designers);
        assert!(!app.modal_open());
        app.designers.open_create();
        assert!(app.modal_open());
        app.set_page(Page::Dashboard);
        assert!(!app.modal_open());
    }
}
