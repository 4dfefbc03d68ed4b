//! HTTP surface: the dashboard page, the compute endpoint, and the gated
//! report download.

use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::access::{LicenseGate, LOCKED_MESSAGE};
use crate::chart::scope_chart_svg;
use crate::config::AetherConfig;
use crate::inventory::{compute, EmissionTotals, RawInputs};
use crate::report::{self, REPORT_FILE_NAME};

// --- Robust Error Handling ---
struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Aether Server Error: {}", self.0),
        );
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<LicenseGate>,
}

impl AppState {
    pub fn new(config: &AetherConfig) -> Self {
        Self {
            gate: Arc::new(LicenseGate::new(&config.license_key)),
        }
    }
}

#[derive(Serialize)]
struct ComputeResponse {
    totals: EmissionTotals,
    method_label: String,
    chart_svg: String,
}

#[derive(Deserialize)]
struct ReportRequest {
    #[serde(default)]
    inputs: RawInputs,
    #[serde(default)]
    license_key: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/v1/compute", post(compute_inventory))
        .route("/v1/report", post(download_report))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: AetherConfig) -> Result<()> {
    let state = AppState::new(&config);
    let app = router(state);

    info!(addr = %config.addr, "dashboard ready");
    println!("🚀 Aether Climate Core ready: http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn compute_inventory(Json(inputs): Json<RawInputs>) -> Response {
    if let Err(e) = inputs.validate() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response();
    }

    let totals = compute(&inputs);
    Json(ComputeResponse {
        totals,
        method_label: inputs.supply_method.label().to_string(),
        chart_svg: scope_chart_svg(&totals),
    })
    .into_response()
}

async fn download_report(
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> Result<Response, ServerError> {
    // Gating branch, not an error: withhold the download with a notice.
    if !state.gate.is_authorized(&req.license_key) {
        return Ok((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "locked": true, "message": LOCKED_MESSAGE })),
        )
            .into_response());
    }

    if let Err(e) = req.inputs.validate() {
        return Ok((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({ "error": e.to_string() })),
        )
            .into_response());
    }

    let totals = compute(&req.inputs);
    info!(total_kg = totals.total_kg, "generating compliance dossier");
    let bytes = report::render(&totals, req.inputs.supply_method.label())?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{REPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn dashboard() -> Html<String> {
    // NOTE: HTML content uses double braces {{ }} for escaping in format! macro.
    Html(format!(
        r####"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>AETHER CLIMATE CORE</title>
    <style>
        :root {{ --bg-color: #0b0e14; --panel-bg: rgba(255,255,255,0.05); --border-color: rgba(255,255,255,0.1); --accent: #818cf8; --font-ui: -apple-system, BlinkMacSystemFont, "SF Pro Display", sans-serif; }}
        body {{ background: radial-gradient(circle at top right, #0B0E14, #1B212C); color: #e0e0e0; font-family: var(--font-ui); margin: 0; min-height: 100vh; }}
        header {{ padding: 25px 40px 5px; }}
        h1 {{ color: #fff; margin: 0; }}
        .tagline {{ color: var(--accent); margin-top: 4px; }}
        main {{ display: grid; grid-template-columns: 340px 1fr; gap: 20px; padding: 20px 40px; }}
        .glass-card {{ background: var(--panel-bg); border: 1px solid var(--border-color); padding: 25px; border-radius: 15px; backdrop-filter: blur(15px); }}
        label {{ display: block; font-size: 12px; color: #9ca3af; margin: 14px 0 4px; }}
        input[type=number], input[type=password] {{ width: 100%; box-sizing: border-box; background: #111722; border: 1px solid #2a3344; color: #fff; padding: 9px; border-radius: 8px; }}
        .radio-row {{ font-size: 13px; margin: 6px 0; }}
        button {{ background: linear-gradient(135deg, #6366f1 0%, #a855f7 100%); color: white; border: none; padding: 15px; border-radius: 10px; font-weight: bold; width: 100%; cursor: pointer; margin-top: 18px; }}
        .total-line {{ font-size: 22px; color: #fff; margin-bottom: 10px; }}
        .notice {{ font-size: 13px; color: var(--accent); min-height: 18px; margin-top: 10px; }}
        .status {{ font-size: 11px; color: #6b7280; margin-top: 20px; }}
    </style>
</head>
<body>
    <header>
        <h1>💎 AETHER CLIMATE CORE</h1>
        <div class="tagline">Statutory Carbon Intelligence &amp; Regulatory Disclosure</div>
    </header>
    <main>
        <div class="glass-card">
            <h3>📊 Operational Inventory</h3>
            <label for="fuel">Scope 1: Fleet/Fuel (Gal)</label>
            <input type="number" id="fuel" value="2500" min="0" step="any">
            <label for="grid">Scope 2: Grid Power (kWh)</label>
            <input type="number" id="grid" value="48000" min="0" step="any">
            <label>Supply Chain Data Source</label>
            <div class="radio-row"><input type="radio" name="method" id="weight" value="weight_based" checked> <label for="weight" style="display:inline">Shipment Weights (kg)</label></div>
            <div class="radio-row"><input type="radio" name="method" id="spend" value="spend_based"> <label for="spend" style="display:inline">Financials (Spend-Based)</label></div>
            <label for="supply" id="supply-label">Total Weight (kg)</label>
            <input type="number" id="supply" value="142000" min="0" step="any">
            <label for="key">License Key</label>
            <input type="password" id="key" placeholder="Enter key...">
            <button onclick="downloadReport()">📥 DOWNLOAD 7-PAGE SIGNED REPORT</button>
            <div class="notice" id="notice"></div>
            <div class="status">v0.3.6 Enterprise Edition · System Status: Operational · Compliance: CA SB 253</div>
        </div>
        <div class="glass-card">
            <div class="total-line">Total: <span id="total">—</span> kg CO2e</div>
            <div id="chart"></div>
            <div class="status" id="method-label"></div>
        </div>
    </main>
    <script>
        function gatherInputs() {{
            return {{
                fuel_gallons: parseFloat(document.getElementById('fuel').value) || 0,
                grid_kwh: parseFloat(document.getElementById('grid').value) || 0,
                supply_method: document.querySelector('input[name=method]:checked').value,
                supply_value: parseFloat(document.getElementById('supply').value) || 0
            }};
        }}

        async function refresh() {{
            const res = await fetch('/v1/compute', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify(gatherInputs())
            }});
            const notice = document.getElementById('notice');
            if (!res.ok) {{
                const err = await res.json();
                notice.textContent = '⚠️ ' + err.error;
                return;
            }}
            notice.textContent = '';
            const data = await res.json();
            document.getElementById('total').textContent = data.totals.total_kg.toLocaleString();
            document.getElementById('chart').innerHTML = data.chart_svg;
            document.getElementById('method-label').textContent = 'Scope 3 Logic: ' + data.method_label;
        }}

        async function downloadReport() {{
            const res = await fetch('/v1/report', {{
                method: 'POST',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify({{ inputs: gatherInputs(), license_key: document.getElementById('key').value }})
            }});
            const notice = document.getElementById('notice');
            if (res.status === 403) {{
                const body = await res.json();
                notice.textContent = '🔒 ' + body.message;
                return;
            }}
            if (!res.ok) {{
                const err = await res.json();
                notice.textContent = '⚠️ ' + err.error;
                return;
            }}
            notice.textContent = '';
            const blob = await res.blob();
            const url = URL.createObjectURL(blob);
            const a = document.createElement('a');
            a.href = url;
            a.download = '{report_file_name}';
            a.click();
            URL.revokeObjectURL(url);
        }}

        document.querySelectorAll('input[type=number], input[type=radio]').forEach(el => el.addEventListener('input', () => {{
            document.getElementById('supply-label').textContent =
                document.getElementById('weight').checked ? 'Total Weight (kg)' : 'Annual Supplier Spend ($)';
            refresh();
        }}));
        refresh();
    </script>
</body>
</html>"####,
        report_file_name = REPORT_FILE_NAME
    ))
}
