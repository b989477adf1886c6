// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ScreenKind, SortDirection, StatusFilter, ViewState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub active: ScreenKind,
    pub view: ViewState,
    pub page: usize,
    pub status_line: Option<String>,
}

impl AppState {
    pub fn new(active: ScreenKind) -> Self {
        Self {
            active,
            view: active.spec().default_view,
            page: 0,
            status_line: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ScreenKind::Cases)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    SwitchScreen(ScreenKind),
    NextScreen,
    PrevScreen,
    SetSearch(String),
    SetStatusFilter(StatusFilter),
    SortBy(String),
    ClearSort,
    NextPage,
    PrevPage,
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ScreenChanged(ScreenKind),
    SearchChanged(String),
    StatusFilterChanged(StatusFilter),
    SortChanged {
        key: Option<String>,
        direction: SortDirection,
    },
    PageChanged(usize),
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SwitchScreen(screen) => self.switch_to(screen),
            AppCommand::NextScreen => self.rotate_screen(1),
            AppCommand::PrevScreen => self.rotate_screen(-1),
            AppCommand::SetSearch(text) => {
                self.view.search_text = text.clone();
                let mut events = vec![AppEvent::SearchChanged(text)];
                events.extend(self.reset_page());
                events
            }
            AppCommand::SetStatusFilter(filter) => {
                self.view.status_filter = filter.clone();
                let label = format!("status: {}", filter.label());
                let mut events = vec![AppEvent::StatusFilterChanged(filter)];
                events.extend(self.reset_page());
                events.push(self.set_status(&label));
                events
            }
            AppCommand::SortBy(key) => {
                self.view.sort_by_column(&key);
                vec![self.sort_event()]
            }
            AppCommand::ClearSort => {
                self.view.clear_sort();
                vec![self.sort_event(), self.set_status("sort cleared")]
            }
            AppCommand::NextPage => {
                self.page += 1;
                vec![AppEvent::PageChanged(self.page)]
            }
            AppCommand::PrevPage => {
                if self.page == 0 {
                    return Vec::new();
                }
                self.page -= 1;
                vec![AppEvent::PageChanged(self.page)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Pulls the page index back into range once the visible set is known.
    pub fn clamp_page(&mut self, page_count: usize) {
        self.page = self.page.min(page_count.saturating_sub(1));
    }

    fn switch_to(&mut self, screen: ScreenKind) -> Vec<AppEvent> {
        self.active = screen;
        self.view = screen.spec().default_view;
        self.page = 0;
        vec![
            AppEvent::ScreenChanged(screen),
            self.set_status(screen.label()),
        ]
    }

    fn rotate_screen(&mut self, delta: isize) -> Vec<AppEvent> {
        let screens = ScreenKind::ALL;
        let current = screens
            .iter()
            .position(|screen| *screen == self.active)
            .unwrap_or(0) as isize;
        let len = screens.len() as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        self.switch_to(screens[next])
    }

    fn reset_page(&mut self) -> Option<AppEvent> {
        if self.page == 0 {
            return None;
        }
        self.page = 0;
        Some(AppEvent::PageChanged(0))
    }

    fn sort_event(&self) -> AppEvent {
        AppEvent::SortChanged {
            key: self.view.sort_key.clone(),
            direction: self.view.sort_direction,
        }
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
