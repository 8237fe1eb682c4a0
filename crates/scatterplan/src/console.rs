//! Colorful console output for evaluation events.
//!
//! Provides a custom `tracing` layer that formats evaluation events with
//! colors. Enabled with the `console` feature.
//!
//! ## Log Levels
//!
//! - **INFO**: One line per evaluation, suite start and end
//! - **WARN**: Structural mismatches and capacity violations
//! - **DEBUG**: Blueprint construction and cost breakdowns

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Initializes the evaluation console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the ScatterPlan banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(EvaluationConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let banner = r#"
 ____            _   _            ____  _
/ ___|  ___ __ _| |_| |_ ___ _ __|  _ \| | __ _ _ __
\___ \ / __/ _` | __| __/ _ \ '__| |_) | |/ _` | '_ \
 ___) | (_| (_| | |_| ||  __/ |  |  __/| | (_| | | | |
|____/ \___\__,_|\__|\__\___|_|  |_|   |_|\__,_|_| |_|
"#;

    let version_line = format!(
        "                 v{} - Multi-Plane Reduce-Scatter Planner\n",
        env!("CARGO_PKG_VERSION")
    );

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats ScatterPlan events with colors.
pub struct EvaluationConsoleLayer;

impl<S: Subscriber> Layer<S> for EvaluationConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("scatterplan") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    strategy: Option<String>,
    validity: Option<String>,
    suite: Option<String>,
    rating: Option<String>,
    error: Option<String>,
    ranks: Option<u64>,
    planes: Option<u64>,
    phase_count: Option<u64>,
    transfers: Option<u64>,
    cases: Option<u64>,
    rank: Option<u64>,
    degree: Option<u64>,
    duration_ms: Option<u64>,
    score: Option<f64>,
    estimated_time: Option<f64>,
    min_time: Option<f64>,
    average_score: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "strategy" => self.strategy = Some(s),
            "validity" => self.validity = Some(s),
            "suite" => self.suite = Some(s),
            "rating" => self.rating = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "strategy" => self.strategy = Some(value.to_string()),
            "validity" => self.validity = Some(value.to_string()),
            "suite" => self.suite = Some(value.to_string()),
            "rating" => self.rating = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "ranks" => self.ranks = Some(value),
            "planes" => self.planes = Some(value),
            "phase_count" => self.phase_count = Some(value),
            "transfers" => self.transfers = Some(value),
            "cases" => self.cases = Some(value),
            "rank" => self.rank = Some(value),
            "degree" => self.degree = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "score" => self.score = Some(value),
            "estimated_time" => self.estimated_time = Some(value),
            "min_time" => self.min_time = Some(value),
            "average_score" => self.average_score = Some(value),
            _ => {}
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "evaluation" => format_evaluation(v),
        "structural_mismatch" | "capacity_violation" if level <= Level::WARN => {
            format_rejection(v)
        }
        "suite_started" => format_suite_started(v),
        "suite_finished" => format_suite_finished(v),
        _ => String::new(),
    }
}

fn format_evaluation(v: &EventVisitor) -> String {
    let strategy = v.strategy.as_deref().unwrap_or("?");
    let validity = v.validity.as_deref().unwrap_or("?");
    let score = v.score.unwrap_or(0.0);

    let time = match v.estimated_time {
        Some(t) if t.is_finite() => format!("{:.6}s", t),
        _ => "-".to_string(),
    };

    format!(
        "{} {} {} N={:<4} P={:<3} | {} phases, {} transfers | T {} / T_min {} | {} {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        format!("[{}]", strategy).bright_cyan(),
        v.ranks.unwrap_or(0).to_string().yellow(),
        v.planes.unwrap_or(0).to_string().yellow(),
        v.phase_count.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        v.transfers.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        time.yellow(),
        format!("{:.6}s", v.min_time.unwrap_or(0.0)).white(),
        format_score(score),
        format_validity(validity),
    )
}

fn format_rejection(v: &EventVisitor) -> String {
    let detail = match (&v.error, v.rank, v.degree, v.planes) {
        (Some(error), ..) => error.clone(),
        (None, Some(rank), Some(degree), Some(planes)) => {
            format!("rank {} needs {} partners, {} planes", rank, degree, planes)
        }
        _ => String::new(),
    };

    format!(
        "{} {} {} {}",
        timestamp().bright_black(),
        "WARN".bright_yellow(),
        "[Validator]".bright_cyan(),
        detail.yellow()
    )
}

fn format_suite_started(v: &EventVisitor) -> String {
    format!(
        "{} {} {} Suite {} started ({} cases)",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Suite]".bright_cyan(),
        v.suite.as_deref().unwrap_or("?").white().bold(),
        v.cases.unwrap_or(0).to_formatted_string(&Locale::en).yellow()
    )
}

fn format_suite_finished(v: &EventVisitor) -> String {
    let average = v.average_score.unwrap_or(0.0);
    let rating = v.rating.as_deref().unwrap_or("?");

    let mut output = format!(
        "{} {} {} Suite {} finished in {}: average {}",
        timestamp().bright_black(),
        "INFO".bright_green(),
        "[Suite]".bright_cyan(),
        v.suite.as_deref().unwrap_or("?").white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        format_score(average)
    );

    output.push_str("\n\n");
    output.push_str(&"╔══════════════════════════════════════════════════════════╗".bright_cyan().to_string());
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Average Score:",
        format!("{:.2}/100", average),
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Rating:",
        rating,
        "║".bright_cyan()
    ));
    output.push('\n');
    output.push_str(&"╚══════════════════════════════════════════════════════════╝".bright_cyan().to_string());
    output.push('\n');

    output
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_score(score: f64) -> String {
    let text = format!("{:.2}", score);
    if score >= 90.0 {
        text.bright_green().bold().to_string()
    } else if score >= 60.0 {
        text.yellow().to_string()
    } else {
        text.bright_red().to_string()
    }
}

fn format_validity(validity: &str) -> String {
    if validity == "VALID" {
        validity.bright_green().to_string()
    } else {
        validity.bright_red().to_string()
    }
}
