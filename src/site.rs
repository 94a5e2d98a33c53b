//! JSON site description and the mount that wires every component to one host.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;

use crate::{
    animation::sequencer::{AnimationSequencer, Playback, TimelineHandle},
    animation::timeline::{Timeline, TimelineDef},
    animation::trigger::TriggerRegion,
    foundation::config::TrackerConfig,
    foundation::error::{ScrollcueError, ScrollcueResult},
    host::HostRef,
    nav::navbar::Navbar,
    sections::registry::{SectionDescriptor, SectionRegistry},
};

/// One scroll-driven timeline as written in a site config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScrollAnimationDef {
    /// Region that drives the timeline.
    pub trigger: TriggerRegion,
    /// Toggle actions or scrub; toggled with `"play reverse play reverse"` when omitted.
    #[serde(default)]
    pub playback: Playback,
    /// The stages.
    pub timeline: TimelineDef,
}

impl ScrollAnimationDef {
    /// Validate and schedule the timeline.
    pub fn build(&self) -> ScrollcueResult<Timeline> {
        Timeline::new(self.timeline.clone())
    }
}

/// Everything needed to mount the navigation and the scroll animations of a page.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// Sections in page order.
    pub sections: Vec<SectionDescriptor>,
    /// Section selected near the top; the first section when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_section: Option<String>,
    /// Scroll-spy tunables.
    #[serde(default)]
    pub tracker: TrackerConfig,
    /// Scroll-driven timelines.
    #[serde(default)]
    pub timelines: Vec<ScrollAnimationDef>,
}

impl SiteConfig {
    /// Parse and validate a site config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollcueResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| ScrollcueError::serde(format!("parse site config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a site config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollcueResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollcueError::config(format!("open site config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse and validate a site config from a JSON string.
    pub fn from_json_str(s: &str) -> ScrollcueResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Pretty JSON form.
    pub fn to_json_pretty(&self) -> ScrollcueResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScrollcueError::serde(format!("serialize site config: {e}")))
    }

    /// Section registry with the configured default.
    pub fn registry(&self) -> ScrollcueResult<SectionRegistry> {
        let registry = SectionRegistry::new(self.sections.clone())?;
        match &self.default_section {
            Some(id) => registry.with_default(id),
            None => Ok(registry),
        }
    }

    /// Check sections, tracker constants and every timeline.
    pub fn validate(&self) -> ScrollcueResult<()> {
        self.registry()?;
        self.tracker.validate()?;
        for (i, anim) in self.timelines.iter().enumerate() {
            anim.build().map_err(|e| {
                ScrollcueError::animation(format!(
                    "timeline #{i} (trigger '{}'): {e}",
                    anim.trigger.element
                ))
            })?;
        }
        Ok(())
    }

    /// Mount the navbar and bind every timeline on `host`.
    #[tracing::instrument(
        skip(self, host),
        fields(sections = self.sections.len(), timelines = self.timelines.len())
    )]
    pub fn mount(&self, host: HostRef, menu_element: &str) -> ScrollcueResult<Site> {
        let timelines = self
            .timelines
            .iter()
            .map(|anim| Ok((anim.build()?, anim)))
            .collect::<ScrollcueResult<Vec<_>>>()?;

        let navbar = Navbar::mount(
            host.clone(),
            Rc::new(self.registry()?),
            self.tracker,
            menu_element,
        )?;
        let sequencer = AnimationSequencer::new(host);
        let animations = timelines
            .into_iter()
            .map(|(timeline, anim)| {
                sequencer.register(timeline, anim.trigger.clone(), anim.playback)
            })
            .collect();

        Ok(Site {
            navbar,
            sequencer,
            animations,
        })
    }
}

/// A mounted site. Dropping it unmounts the navbar and disposes every timeline.
#[derive(Debug)]
pub struct Site {
    navbar: Navbar,
    sequencer: AnimationSequencer,
    animations: Vec<TimelineHandle>,
}

impl Site {
    /// The mounted navbar.
    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    /// The sequencer the timelines were bound with.
    pub fn sequencer(&self) -> &AnimationSequencer {
        &self.sequencer
    }

    /// Bound timelines, in config order.
    pub fn animations(&self) -> &[TimelineHandle] {
        &self.animations
    }

    /// Tear everything down; equivalent to dropping.
    pub fn unmount(self) {}
}
