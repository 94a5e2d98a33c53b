//! scrollcue drives the scroll-dependent behavior of a single-page site without owning any
//! rendering.
//!
//! - A [`ScrollTracker`] turns scroll and resize events into a [`ScrollState`]: the active
//!   section (scroll-spy) and whether the page has left the top. Work is coalesced to one
//!   recompute per animation frame.
//! - An [`AnimationSequencer`] binds staged [`Timeline`]s to [`TriggerRegion`]s and plays them
//!   forward or backward (or scrubs them) as the region is crossed.
//! - A [`MenuToggleController`] owns the collapsible menu's open state and outside-click
//!   dismissal; [`Navbar`] wires it to the tracker and the header's user intents.
//!
//! The page is reached only through the [`Host`] traits. [`HeadlessPage`] implements them in
//! memory, and [`SiteConfig`] loads a whole site description from JSON and mounts it.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub(crate) mod animation;
mod foundation;
pub(crate) mod host;
pub(crate) mod nav;
pub(crate) mod scroll;
pub(crate) mod sections;
/// Site configuration and mounting.
pub mod site;

pub use crate::foundation::config::TrackerConfig;
pub use crate::foundation::core::{ElementRect, Lerp, VisualProps};
pub use crate::foundation::error::{ScrollcueError, ScrollcueResult};
pub use crate::foundation::observe::ObserverId;

pub use crate::host::headless::{FRAME_INTERVAL_MS, HeadlessPage};
pub use crate::host::{
    EventKind, EventTarget, FrameCallback, FrameHandle, FrameScheduler, GeometryProvider, Host,
    HostEvent, HostRef, Listener, ListenerId, StyleStore, Task, TaskHandle, Viewport,
};

pub use crate::sections::registry::{SectionDescriptor, SectionRegistry};

pub use crate::scroll::spy::{ScrollState, compute_scroll_state, resolve_active_section};
pub use crate::scroll::tracker::ScrollTracker;

pub use crate::animation::ease::Ease;
pub use crate::animation::playhead::{Direction, Playhead};
pub use crate::animation::sequencer::{AnimationSequencer, Playback, TimelineHandle};
pub use crate::animation::timeline::{
    AnimationStage, ScheduledStage, Timeline, TimelineBuilder, TimelineDef,
};
pub use crate::animation::trigger::{
    Anchor, Crossing, RegionPosition, ScrollRange, ToggleAction, ToggleActions, TriggerEdge,
    TriggerRegion, detect_crossings,
};

pub use crate::nav::menu::{MenuToggleController, ToggleState};
pub use crate::nav::navbar::{LinkTarget, Navbar};

pub use crate::site::{ScrollAnimationDef, Site, SiteConfig};
