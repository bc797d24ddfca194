//! The six dashboard tabs. Tab selection itself belongs to the Presentation
//! layer; this enum only names which view records to build.

use core::fmt;
use core::str::FromStr;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    Overview,
    Eda,
    Comparison,
    Unsupervised,
    Process,
    Recommendations,
}

impl Tab {
    /// Display order of the tab strip.
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Eda,
        Tab::Comparison,
        Tab::Unsupervised,
        Tab::Process,
        Tab::Recommendations,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Overview => "overview",
            Tab::Eda => "eda",
            Tab::Comparison => "comparison",
            Tab::Unsupervised => "unsupervised",
            Tab::Process => "process",
            Tab::Recommendations => "recommendations",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Eda => "EDA Insights",
            Tab::Comparison => "Model Comparison",
            Tab::Unsupervised => "Unsupervised",
            Tab::Process => "Process Flow",
            Tab::Recommendations => "Recommendations",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTab(pub String);

impl fmt::Display for UnknownTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tab {:?} (expected one of: overview, eda, comparison, unsupervised, process, recommendations)", self.0)
    }
}

impl std::error::Error for UnknownTab {}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim().to_ascii_lowercase();
        Tab::ALL
            .iter()
            .copied()
            .find(|tab| tab.id() == t)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}
