use crate::foundation::error::{ScrollcueError, ScrollcueResult};

/// One navigable page section.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SectionDescriptor {
    /// Stable DOM anchor id (`#id`).
    pub id: String,
    /// Label shown in the navigation.
    pub title: String,
    /// When set, the nav entry opens this URL instead of scrolling to the section.
    #[serde(default, rename = "link", skip_serializing_if = "Option::is_none")]
    pub external_link: Option<String>,
}

impl SectionDescriptor {
    /// Internal section with an anchor id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            external_link: None,
        }
    }

    /// Attach an external link.
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.external_link = Some(link.into());
        self
    }

    /// True when selecting this entry leaves the page.
    pub fn is_external(&self) -> bool {
        self.external_link.is_some()
    }
}

/// Immutable, ordered section list with a designated default entry.
///
/// Order is top-to-bottom page order; it is both the scan order of the scroll-spy and its
/// tie-break.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionRegistry {
    sections: Vec<SectionDescriptor>,
    default_id: Option<String>,
}

impl SectionRegistry {
    /// Build a registry whose default is the first section.
    pub fn new(sections: Vec<SectionDescriptor>) -> ScrollcueResult<Self> {
        for (i, s) in sections.iter().enumerate() {
            if s.id.trim().is_empty() {
                return Err(ScrollcueError::validation(format!(
                    "section #{i} has an empty id"
                )));
            }
            if sections[..i].iter().any(|prev| prev.id == s.id) {
                return Err(ScrollcueError::validation(format!(
                    "duplicate section id '{}'",
                    s.id
                )));
            }
        }
        let default_id = sections.first().map(|s| s.id.clone());
        Ok(Self {
            sections,
            default_id,
        })
    }

    /// Designate another registered section as the top-of-page default.
    pub fn with_default(mut self, id: &str) -> ScrollcueResult<Self> {
        if self.get(id).is_none() {
            return Err(ScrollcueError::validation(format!(
                "default section '{id}' is not registered"
            )));
        }
        self.default_id = Some(id.to_owned());
        Ok(self)
    }

    /// Sections in page order.
    pub fn sections(&self) -> &[SectionDescriptor] {
        &self.sections
    }

    /// Iterate in page order.
    pub fn iter(&self) -> std::slice::Iter<'_, SectionDescriptor> {
        self.sections.iter()
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// True when no section is registered.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Id selected near the top of the page; `None` only for an empty registry.
    pub fn default_id(&self) -> Option<&str> {
        self.default_id.as_deref()
    }

    /// Look up by id.
    pub fn get(&self, id: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Look up by navigation title.
    pub fn by_title(&self, title: &str) -> Option<&SectionDescriptor> {
        self.sections.iter().find(|s| s.title == title)
    }

    /// Page-order position of `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

impl<'a> IntoIterator for &'a SectionRegistry {
    type Item = &'a SectionDescriptor;
    type IntoIter = std::slice::Iter<'a, SectionDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sections/registry.rs"]
mod tests;
