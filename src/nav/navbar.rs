use std::rc::Rc;

use crate::{
    foundation::config::TrackerConfig,
    foundation::error::ScrollcueResult,
    host::HostRef,
    nav::menu::MenuToggleController,
    scroll::spy::ScrollState,
    scroll::tracker::ScrollTracker,
    sections::registry::SectionRegistry,
};

/// Where a selected navigation link leads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkTarget {
    /// In-page anchor of this section id.
    Section(String),
    /// External page; the active section is left alone.
    External(String),
    /// No section has this title.
    Unknown,
}

/// The site header: scroll-spy plus collapsible menu, driven by the header's user intents.
pub struct Navbar {
    host: HostRef,
    tracker: ScrollTracker,
    menu: MenuToggleController,
}

impl std::fmt::Debug for Navbar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navbar")
            .field("tracker", &self.tracker)
            .field("menu", &self.menu)
            .finish()
    }
}

impl Navbar {
    /// Mount the tracker over `registry` and the menu controller for `menu_element`.
    #[tracing::instrument(skip(host, registry))]
    pub fn mount(
        host: HostRef,
        registry: Rc<SectionRegistry>,
        config: TrackerConfig,
        menu_element: &str,
    ) -> ScrollcueResult<Self> {
        let tracker = ScrollTracker::mount(host.clone(), registry, config)?;
        let menu = MenuToggleController::mount(host.clone(), menu_element)?;
        Ok(Self {
            host,
            tracker,
            menu,
        })
    }

    /// The scroll-spy.
    pub fn tracker(&self) -> &ScrollTracker {
        &self.tracker
    }

    /// The menu controller.
    pub fn menu(&self) -> &MenuToggleController {
        &self.menu
    }

    /// Latest scroll state.
    pub fn scroll_state(&self) -> ScrollState {
        self.tracker.state()
    }

    /// True while the collapsible menu is shown.
    pub fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Logo selected: back to the default section, menu closed, smooth scroll to the top.
    pub fn logo_clicked(&self) {
        self.tracker.reset_to_default();
        self.menu.close_menu();
        self.host.smooth_scroll_to(0.0);
    }

    /// A link in the desktop bar was selected.
    pub fn desktop_link_clicked(&self, title: &str) -> LinkTarget {
        let target = self.resolve_link(title);
        if matches!(target, LinkTarget::Section(_)) {
            self.tracker.set_active(title);
        }
        target
    }

    /// A link in the collapsible menu was selected; the menu closes either way.
    pub fn mobile_link_clicked(&self, title: &str) -> LinkTarget {
        let target = self.desktop_link_clicked(title);
        self.menu.close_menu();
        target
    }

    /// The hamburger button was pressed.
    pub fn menu_button_clicked(&self) {
        self.menu.toggle();
    }

    /// True when the link with this title should be highlighted.
    pub fn is_link_active(&self, title: &str) -> bool {
        let registry = self.tracker.registry();
        let Some(section) = registry.by_title(title) else {
            return false;
        };
        !section.is_external() && self.tracker.state().is_active(&section.id)
    }

    /// Header uses its solid background once scrolled, or when the banner above it is hidden.
    pub fn header_is_solid(&self, banner_hidden: bool) -> bool {
        self.tracker.state().is_scrolled || banner_hidden
    }

    /// Tear down both components; equivalent to dropping.
    pub fn unmount(self) {}

    fn resolve_link(&self, title: &str) -> LinkTarget {
        let registry = self.tracker.registry();
        match registry.by_title(title) {
            Some(section) => match &section.external_link {
                Some(url) => LinkTarget::External(url.clone()),
                None => LinkTarget::Section(section.id.clone()),
            },
            None => {
                tracing::debug!(title, "unknown navigation link");
                LinkTarget::Unknown
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/nav/navbar.rs"]
mod tests;
