pub mod endpoint;
pub mod route;

use crate::domain::model::{EndpointRow, QueryResult, RouteRow, SearchReport};
use crate::domain::search::SearchFamily;
use comfy_table::Table;
use serde_json::Value;
use std::fmt::Write;

pub use endpoint::build_endpoint_row;
pub use route::build_route_row;

/// String or number attribute, stringified. Anything else counts as missing.
pub(crate) fn attr(attributes: &Value, key: &str) -> Option<String> {
    match attributes.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Drops the first `n` characters, e.g. `vlan-` from `vlan-3101`.
pub(crate) fn drop_chars(s: &str, n: usize) -> String {
    s.chars().skip(n).collect()
}

fn imdata<'a>(result: &'a QueryResult) -> &'a [Value] {
    match result
        .payload()
        .and_then(|payload| payload.get("imdata"))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
    {
        Some(entries) => entries,
        None => {
            if result.payload().is_some() {
                tracing::debug!("Response from {} has no imdata", result.host);
            }
            &[]
        }
    }
}

pub fn endpoint_rows(results: &[QueryResult]) -> Vec<EndpointRow> {
    results
        .iter()
        .flat_map(|result| {
            imdata(result)
                .iter()
                .map(|entry| build_endpoint_row(&result.host, entry))
        })
        .collect()
}

pub fn route_rows(results: &[QueryResult]) -> Vec<RouteRow> {
    results
        .iter()
        .flat_map(|result| {
            imdata(result)
                .iter()
                .map(|entry| build_route_row(&result.host, entry))
        })
        .collect()
}

pub fn build_table(report: &SearchReport) -> Table {
    let mut table = Table::new();
    match report.mode.family() {
        SearchFamily::Endpoint => {
            table.set_header(EndpointRow::HEADERS);
            for row in endpoint_rows(&report.results) {
                table.add_row(row.cells());
            }
        }
        SearchFamily::Route => {
            table.set_header(RouteRow::HEADERS);
            for row in route_rows(&report.results) {
                table.add_row(row.cells());
            }
        }
    }
    table
}

/// Summary lines followed by the result table.
pub fn render_report(report: &SearchReport) -> String {
    let mut out = String::from("\n");
    let skipped = report.skipped_hosts();
    if !skipped.is_empty() {
        let _ = writeln!(out, "Skipped Hosts: {}", skipped.join(", "));
    }
    let _ = writeln!(out, "Query Type: {}", report.mode.name());
    let _ = writeln!(
        out,
        "Time taken: {:.2} seconds.",
        report.elapsed.as_secs_f64()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", build_table(report));
    out
}

pub fn print_report(report: &SearchReport) {
    print!("{}", render_report(report));
}
