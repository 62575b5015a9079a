//! The fixed set of renderers

use crate::color::Rgb;

/// Every renderer the dispatcher knows about
///
/// Resolved from the configuration's identifier once, when the registry
/// loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RendererKind {
    /// Title, version and control hints
    Welcome,
    /// Live clock
    Time,
    /// Calendar date
    Date,
    /// Memory, display and connectivity diagnostics
    System,
    /// Free-form wrapped text
    Text,
}

impl RendererKind {
    pub const ALL: [RendererKind; 5] = [
        RendererKind::Welcome,
        RendererKind::Time,
        RendererKind::Date,
        RendererKind::System,
        RendererKind::Text,
    ];

    /// Canonical configuration identifier
    pub fn id(self) -> &'static str {
        match self {
            RendererKind::Welcome => "welcome",
            RendererKind::Time => "time",
            RendererKind::Date => "date",
            RendererKind::System => "system",
            RendererKind::Text => "text",
        }
    }

    /// Resolve a configuration identifier
    ///
    /// Matching is case-insensitive, and a trailing `Renderer` is accepted
    /// so `TimeRenderer` resolves like `time`.
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        const SUFFIX: &str = "renderer";
        let stem = match id.len().checked_sub(SUFFIX.len()).and_then(|at| {
            id.get(at..)
                .filter(|tail| tail.eq_ignore_ascii_case(SUFFIX))
                .map(|_| &id[..at])
        }) {
            Some(stem) => stem,
            None => id,
        };

        Self::ALL
            .into_iter()
            .find(|kind| kind.id().eq_ignore_ascii_case(stem))
    }

    /// Indicator category
    pub fn category(self) -> Category {
        match self {
            RendererKind::Welcome => Category::Greeting,
            RendererKind::Time | RendererKind::Date => Category::Clock,
            RendererKind::System => Category::Info,
            RendererKind::Text => Category::Message,
        }
    }
}

/// Groups of workspaces that share an indicator colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    Greeting,
    Clock,
    Info,
    Message,
    /// Diagnostics screen reporting a configuration error
    Fault,
}

impl Category {
    /// Full-brightness indicator colour
    pub fn color(self) -> Rgb {
        match self {
            Category::Greeting => Rgb::YELLOW,
            Category::Clock => Rgb::BLUE,
            Category::Info => Rgb::GREEN,
            Category::Message => Rgb::WHITE,
            Category::Fault => Rgb::RED,
        }
    }
}
