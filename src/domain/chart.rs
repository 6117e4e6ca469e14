// Chart series handed to rendering collaborators

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ChartPoint {
    pub x: f64,
    pub y: f64,
}

impl ChartPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(id: &str, name: &str, color: Option<&str>, points: Vec<ChartPoint>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            color: color.map(str::to_string),
            points,
        }
    }
}

/// Horizontal reference line at a fixed y value.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OverlayLine {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Scatter,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub kind: ChartKind,
    pub series: Vec<SeriesData>,
    pub overlays: Vec<OverlayLine>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HliCharts {
    pub hli_by_day: ChartData,
    pub hli_by_temperature: ChartData,
}
