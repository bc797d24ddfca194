//! dash_view/src/lib.rs — Display-ready view records for the dashboard tabs.
//!
//! Rules:
//! - No I/O. Callers pass a validated document and its `DerivedMetrics`.
//! - No new numbers: builders only select, format and default.
//! - Strings are final: percentages carry their `%`, missing values read `N/A`.
//!
//! One module per tab, each exposing `build(..) -> <Tab>View`. The
//! `render_json` feature adds the JSON renderer used at the Presentation
//! boundary.

#![forbid(unsafe_code)]

use dash_core::document::ReportDocument;
use dash_metrics::DerivedMetrics;
use serde::Serialize;

pub mod comparison;
pub mod eda;
pub mod format;
pub mod overview;
pub mod process;
pub mod recommendations;
pub mod shell;
pub mod tabs;
pub mod unsupervised;

#[cfg(feature = "render_json")]
pub mod render_json;

pub use comparison::ComparisonView;
pub use eda::EdaView;
pub use overview::OverviewView;
pub use process::ProcessView;
pub use recommendations::RecommendationsView;
pub use shell::{Footer, Header, TabEntry};
pub use tabs::{Tab, UnknownTab};
pub use unsupervised::UnsupervisedView;

// ===== Model =====

/// One tab's record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "tab", rename_all = "snake_case")]
pub enum TabView {
    Overview(OverviewView),
    Eda(EdaView),
    Comparison(ComparisonView),
    Unsupervised(UnsupervisedView),
    Process(ProcessView),
    Recommendations(RecommendationsView),
}

impl TabView {
    pub fn tab(&self) -> Tab {
        match self {
            TabView::Overview(_) => Tab::Overview,
            TabView::Eda(_) => Tab::Eda,
            TabView::Comparison(_) => Tab::Comparison,
            TabView::Unsupervised(_) => Tab::Unsupervised,
            TabView::Process(_) => Tab::Process,
            TabView::Recommendations(_) => Tab::Recommendations,
        }
    }
}

/// The whole dashboard: shell plus the requested tabs in strip order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardView {
    pub header: Header,
    pub tabs: Vec<TabEntry>,
    pub views: Vec<TabView>,
    pub footer: Footer,
}

impl DashboardView {
    pub fn view(&self, tab: Tab) -> Option<&TabView> {
        self.views.iter().find(|v| v.tab() == tab)
    }
}

// ===== Builders =====

pub fn build_tab(tab: Tab, doc: &ReportDocument, derived: &DerivedMetrics) -> TabView {
    match tab {
        Tab::Overview => TabView::Overview(overview::build(doc, derived)),
        Tab::Eda => TabView::Eda(eda::build(doc, derived)),
        Tab::Comparison => TabView::Comparison(comparison::build(doc, derived)),
        Tab::Unsupervised => TabView::Unsupervised(unsupervised::build(doc, derived)),
        Tab::Process => TabView::Process(process::build(doc)),
        Tab::Recommendations => TabView::Recommendations(recommendations::build(doc, derived)),
    }
}

/// Build the shell and the selected tabs. An empty selection builds all six.
/// Duplicates collapse; order follows `Tab::ALL`.
pub fn build_dashboard(doc: &ReportDocument, derived: &DerivedMetrics, selection: &[Tab]) -> DashboardView {
    let views = Tab::ALL
        .iter()
        .copied()
        .filter(|t| selection.is_empty() || selection.contains(t))
        .map(|t| build_tab(t, doc, derived))
        .collect::<Vec<_>>();
    tracing::debug!(tabs = views.len(), "built dashboard views");

    DashboardView {
        header: shell::header(doc, derived),
        tabs: shell::tab_strip(),
        views,
        footer: shell::footer(doc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_deduplicated_and_ordered() {
        let doc = ReportDocument::default();
        let derived = dash_metrics::derive(&doc).unwrap();
        let v = build_dashboard(&doc, &derived, &[Tab::Process, Tab::Overview, Tab::Process]);
        let got: Vec<Tab> = v.views.iter().map(TabView::tab).collect();
        assert_eq!(got, vec![Tab::Overview, Tab::Process]);
        assert_eq!(v.tabs.len(), 6);
        assert!(v.view(Tab::Eda).is_none());
    }

    #[test]
    fn empty_selection_builds_all() {
        let doc = ReportDocument::default();
        let derived = dash_metrics::derive(&doc).unwrap();
        assert_eq!(build_dashboard(&doc, &derived, &[]).views.len(), 6);
    }
}
