use serde::{Deserialize, Serialize};

/// Portal pages in navigation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Home,
    Predict,
    Monitor,
    Support,
}

impl Page {
    pub const ORDER: [Page; 4] = [Page::Home, Page::Predict, Page::Monitor, Page::Support];

    pub fn index(&self) -> usize {
        match self {
            Page::Home => 0,
            Page::Predict => 1,
            Page::Monitor => 2,
            Page::Support => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ORDER.get(index).copied()
    }

    /// Stable tag used in URLs
    pub fn tag(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Predict => "predict",
            Page::Monitor => "monitor",
            Page::Support => "support",
        }
    }

    /// Presentation label for navigation widgets
    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::Predict => "🔮 Predict Claim",
            Page::Monitor => "📊 Monitor",
            Page::Support => "📞 Support",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        Self::ORDER
            .into_iter()
            .find(|p| p.tag().eq_ignore_ascii_case(tag.trim()))
    }
}

/// Cursor over `Page::ORDER`
///
/// The index is private and only moved through the methods below, so it
/// never leaves `[0, Page::ORDER.len() - 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    index: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Page {
        Page::ORDER[self.index]
    }

    pub fn goto(&mut self, page: Page) -> Page {
        self.index = page.index();
        self.current()
    }

    /// Advance one page, staying put on the last page
    pub fn next(&mut self) -> Page {
        if self.index + 1 < Page::ORDER.len() {
            self.index += 1;
        }
        self.current()
    }

    /// Go back one page, staying put on the first page
    pub fn back(&mut self) -> Page {
        self.index = self.index.saturating_sub(1);
        self.current()
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.index + 1 < Page::ORDER.len()
    }
}
