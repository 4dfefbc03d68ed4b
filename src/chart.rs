//! Scope Chart - Inline SVG visualization of the three scope totals
//!
//! Pure string rendering; the dashboard injects the markup as-is. Geometry
//! scales against the largest scope so the chart stays readable from a
//! handful of kilograms up to megaton-scale inventories.

use crate::inventory::EmissionTotals;

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 260.0;
const PLOT_HEIGHT: f64 = 200.0;
const BASELINE_Y: f64 = 220.0;
const BAR_WIDTH: f64 = 120.0;

const BAR_COLORS: [&str; 3] = ["#6366f1", "#818cf8", "#a855f7"];

/// Render the three scope totals as a bar chart, one labeled bar per scope.
pub fn scope_chart_svg(totals: &EmissionTotals) -> String {
    let scopes = totals.scopes();
    let max = scopes
        .iter()
        .map(|(_, v)| *v)
        .fold(0.0_f64, f64::max);

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Emissions by scope">"#
    );
    svg.push_str(&format!(
        r#"<line x1="20" y1="{BASELINE_Y}" x2="{}" y2="{BASELINE_Y}" stroke="rgba(255,255,255,0.25)" stroke-width="1"/>"#,
        WIDTH - 20.0
    ));

    for (i, (label, value)) in scopes.iter().enumerate() {
        // Degenerate all-zero inventory draws flat bars, never divides.
        let height = if max > 0.0 {
            (value / max) * PLOT_HEIGHT
        } else {
            0.0
        };
        let x = 50.0 + i as f64 * (BAR_WIDTH + 50.0);
        let y = BASELINE_Y - height;
        let color = BAR_COLORS[i];
        svg.push_str(&format!(
            r#"<rect x="{x:.1}" y="{y:.1}" width="{BAR_WIDTH}" height="{height:.1}" rx="4" fill="{color}" fill-opacity="0.85"/>"#
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="12" fill="#e0e0e0">{:.0} kg</text>"##,
            x + BAR_WIDTH / 2.0,
            y - 8.0,
            value
        ));
        svg.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="13" fill="#9ca3af">{label}</text>"##,
            x + BAR_WIDTH / 2.0,
            BASELINE_Y + 22.0
        ));
    }

    svg.push_str("</svg>");
    svg
}
