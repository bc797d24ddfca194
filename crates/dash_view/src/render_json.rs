//! render_json.rs — JSON renderer for the Presentation boundary.
//!
//! Records serialize in field-declaration order. Callers that need canonical
//! (sorted-key) bytes pass the returned `Value` through
//! `dash_io::canonical_json`.

use serde_json::Value;

use crate::{DashboardView, TabView};

/// Whole dashboard as one JSON object:
/// `{ header, tabs, views: [{ "tab": "<id>", .. }], footer }`.
pub fn render_dashboard_json(view: &DashboardView) -> Result<Value, serde_json::Error> {
    serde_json::to_value(view)
}

/// One tab's record, tagged with its id.
pub fn render_tab_json(view: &TabView) -> Result<Value, serde_json::Error> {
    serde_json::to_value(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_dashboard, Tab};
    use dash_core::document::ReportDocument;

    #[test]
    fn tab_records_are_tagged() {
        let doc = ReportDocument::default();
        let derived = dash_metrics::derive(&doc).unwrap();
        let dash = build_dashboard(&doc, &derived, &[Tab::Eda]);
        let v = render_dashboard_json(&dash).unwrap();
        assert_eq!(v["views"][0]["tab"], "eda");
        assert_eq!(v["tabs"][1]["label"], "EDA Insights");
        assert_eq!(v["header"]["title"], "ML Model Dashboard");

        let one = render_tab_json(&dash.views[0]).unwrap();
        assert_eq!(one["outliers"]["method"], "IQR");
    }
}
