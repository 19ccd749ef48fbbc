use reviews::LabelShare;
use serde::Serialize;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const LEFT: f64 = 60.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 30.0;
const BOTTOM: f64 = 50.0;
const BAR_FILL: f64 = 0.8;

/// Annotation sits this many percentage points above the bar top.
const ANNOTATION_OFFSET: f64 = 2.0;

#[derive(Clone, Debug, Serialize)]
pub struct Bar {
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub center_x: f64,
    pub color: String,
    pub annotation: String,
    pub annotation_y: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Tick {
    pub value: u32,
    pub y: f64,
}

/// Percentage bar chart geometry, y-axis fixed to 0..=100.
#[derive(Clone, Debug, Serialize)]
pub struct BarChart {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
    pub bars: Vec<Bar>,
    pub ticks: Vec<Tick>,
}

impl BarChart {
    pub fn from_distribution(distribution: &[LabelShare]) -> Self {
        let plot_width = WIDTH - LEFT - RIGHT;
        let band = plot_width / distribution.len().max(1) as f64;
        let n = distribution.len();

        let bars = distribution
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let top = y_for(share.percent);
                let x = LEFT + band * i as f64 + band * (1.0 - BAR_FILL) / 2.0;
                Bar {
                    label: share.label.to_string(),
                    x: round1(x),
                    y: round1(top),
                    width: round1(band * BAR_FILL),
                    height: round1(y_for(0.0) - top),
                    center_x: round1(LEFT + band * (i as f64 + 0.5)),
                    color: coolwarm((i + 1) as f64 / (n + 1) as f64),
                    annotation: format!("{:.1}%", share.percent),
                    annotation_y: round1(y_for(share.percent + ANNOTATION_OFFSET)),
                }
            })
            .collect();

        let ticks = (0..=100)
            .step_by(20)
            .map(|value| Tick { value, y: round1(y_for(value as f64)) })
            .collect();

        Self {
            width: WIDTH,
            height: HEIGHT,
            plot_left: LEFT,
            plot_right: WIDTH - RIGHT,
            plot_top: TOP,
            plot_bottom: HEIGHT - BOTTOM,
            bars,
            ticks,
        }
    }
}

/// Maps a percentage to a pixel row; 100 is the plot top.
fn y_for(percent: f64) -> f64 {
    let plot_height = HEIGHT - TOP - BOTTOM;
    TOP + plot_height * (1.0 - percent / 100.0)
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Diverging blue-grey-red ramp, `t` in 0..=1.
fn coolwarm(t: f64) -> String {
    const COOL: [f64; 3] = [59.0, 76.0, 192.0];
    const MID: [f64; 3] = [221.0, 221.0, 221.0];
    const WARM: [f64; 3] = [180.0, 4.0, 38.0];

    let t = t.clamp(0.0, 1.0);
    let (from, to, f) = if t < 0.5 { (COOL, MID, t * 2.0) } else { (MID, WARM, (t - 0.5) * 2.0) };
    let c: Vec<u8> = (0..3).map(|i| (from[i] + (to[i] - from[i]) * f).round() as u8).collect();
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}
