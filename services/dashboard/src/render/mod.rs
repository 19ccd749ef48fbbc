//! HTML pages and SVG figures, rendered from the templates under `templates/`.

pub mod chart;
pub mod wordcloud;

use minijinja::{context, AutoEscape, Environment, Value};
use reviews::{AggregateReport, Recommendation};
use textmodel::{Label, ModelInfo};
use uuid::Uuid;

use chart::BarChart;
use wordcloud::{WordCloud, NEGATIVE_STYLE, POSITIVE_STYLE};

pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|name| {
            if name.ends_with(".html") || name.ends_with(".svg") {
                AutoEscape::Html
            } else {
                AutoEscape::None
            }
        });
        env.add_template("layout.html", include_str!("../../templates/layout.html"))?;
        env.add_template("index.html", include_str!("../../templates/index.html"))?;
        env.add_template("report.html", include_str!("../../templates/report.html"))?;
        env.add_template("label.html", include_str!("../../templates/label.html"))?;
        env.add_template("error.html", include_str!("../../templates/error.html"))?;
        env.add_template("bar_chart.svg", include_str!("../../templates/bar_chart.svg"))?;
        env.add_template("word_cloud.svg", include_str!("../../templates/word_cloud.svg"))?;
        Ok(Self { env })
    }

    fn render(&self, name: &str, ctx: Value) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    pub fn index(&self, info: &ModelInfo) -> Result<String, minijinja::Error> {
        self.render("index.html", context! { model => model_view(info) })
    }

    pub fn bar_chart(&self, chart: &BarChart) -> Result<String, minijinja::Error> {
        self.render("bar_chart.svg", context! { chart => chart })
    }

    pub fn word_cloud(&self, cloud: &WordCloud) -> Result<String, minijinja::Error> {
        self.render("word_cloud.svg", context! { cloud => cloud })
    }

    pub fn report(
        &self,
        analysis_id: Uuid,
        strategy: &str,
        report: &AggregateReport,
        info: &ModelInfo,
    ) -> Result<String, minijinja::Error> {
        let chart = self.bar_chart(&BarChart::from_distribution(&report.distribution))?;
        let positive = self.word_cloud(&WordCloud::generate(&report.positive_text, &POSITIVE_STYLE))?;
        let negative = self.word_cloud(&WordCloud::generate(&report.negative_text, &NEGATIVE_STYLE))?;

        self.render(
            "report.html",
            context! {
                analysis_id => analysis_id.to_string(),
                strategy => strategy,
                report => report,
                rating => rating_text(report.avg_stars),
                band => band_class(report.recommendation),
                recommendation => report.recommendation.message(),
                chart_svg => Value::from_safe_string(chart),
                positive_svg => Value::from_safe_string(positive),
                negative_svg => Value::from_safe_string(negative),
                model => model_view(info),
            },
        )
    }

    pub fn label(&self, review: &str, label: Label, info: &ModelInfo) -> Result<String, minijinja::Error> {
        self.render(
            "label.html",
            context! {
                review => review,
                label => label.as_str(),
                model => model_view(info),
            },
        )
    }

    pub fn error(&self, title: &str, message: &str, details: &[String]) -> Result<String, minijinja::Error> {
        self.render(
            "error.html",
            context! { title => title, message => message, details => details },
        )
    }
}

/// Already rounded to two places; whole ratings keep one decimal ("3.0").
fn rating_text(avg_stars: f64) -> String {
    if avg_stars.fract() == 0.0 {
        format!("{avg_stars:.1}")
    } else {
        avg_stars.to_string()
    }
}

fn band_class(rec: Recommendation) -> &'static str {
    match rec {
        Recommendation::Strong => "success",
        Recommendation::Mixed => "warning",
        Recommendation::ActionRequired => "danger",
    }
}

fn model_view(info: &ModelInfo) -> Value {
    let manifest = hex::encode(info.manifest_hash);
    context! {
        manifest_short => manifest.get(..12).unwrap_or(&manifest).to_string(),
        classes => info.classes.iter().map(Label::as_str).collect::<Vec<_>>(),
        n_features => info.n_features,
    }
}
