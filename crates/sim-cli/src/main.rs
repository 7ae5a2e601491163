use serde::Serialize;
use simpilot::{build_report, load_bundle, AppConfig, CoreError, DashboardReport};
use sim_core::{CellHealthSummary, StationHealthScore};
use sim_domain::WorkflowBottleneckStatus;
use sim_policies::BottleneckStats;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "Uso: simpilot <report|health|bottlenecks> --input <ARCHIVO.json> [--limit <N>] [--json]";

struct CliArgs {
    command: String,
    input: Option<String>,
    limit: Option<usize>,
    json: bool,
}

#[derive(Serialize)]
struct HealthView<'a> {
    summaries: &'a [CellHealthSummary],
    scores: &'a [StationHealthScore],
}

#[derive(Serialize)]
struct BottleneckView<'a> {
    bottlenecks: &'a [WorkflowBottleneckStatus],
    stats: &'a BottleneckStats,
}

fn parse_args(args: &[String]) -> Option<CliArgs> {
    let command = args.get(1)?.clone();
    let mut parsed = CliArgs { command, input: None, limit: None, json: false };
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => { i += 1; if i < args.len() { parsed.input = Some(args[i].clone()); } }
            "--limit" => {
                i += 1;
                // un límite ilegible es error de uso, no "sin límite"
                parsed.limit = Some(args.get(i)?.parse::<usize>().ok()?);
            }
            "--json" => parsed.json = true,
            other => {
                eprintln!("[simpilot] argumento desconocido: {other}");
                return None;
            }
        }
        i += 1;
    }
    Some(parsed)
}

fn init_logging(filter: &str) {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Nombre serializado (SCREAMING_SNAKE_CASE) de un enum.
fn label<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => "?".into(),
    }
}

fn exit_code(err: &CoreError) -> i32 {
    match err {
        CoreError::Json(_) | CoreError::Domain(_) => 4,
        _ => 5,
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => { eprintln!("[simpilot] error serializando salida: {e}"); std::process::exit(5); }
    }
}

fn print_health(report: &DashboardReport) {
    println!("{:<10} {:<8} {:>5} {:<6} {:>8} {:>8}", "ESTACION", "RIESGO", "SCORE", "LUZ", "1RA", "FINAL");
    for (summary, score) in report.summaries.iter().zip(&report.scores) {
        println!("{:<10} {:<8} {:>5} {:<6} {:>8} {:>8}",
                 summary.station_key.as_str(),
                 label(&summary.risk),
                 score.score,
                 label(&score.light),
                 summary.first_stage_completion.to_string(),
                 summary.final_deliverables_completion.to_string());
        print_reasons(summary);
    }
    for flag in &report.cross_ref.global_flags {
        println!("  [global] {}: {}", flag.kind, flag.message);
    }
}

fn print_reasons(summary: &CellHealthSummary) {
    for reason in &summary.critical_reasons {
        println!("  ! {reason}");
    }
    for reason in &summary.warning_reasons {
        println!("  - {reason}");
    }
}

fn print_bottlenecks(report: &DashboardReport) {
    println!("{:<12} {:<10} {:<10} {:<22} {:<12} {:<9} {:>6}",
             "ITEM", "TIPO", "CONTEXTO", "MOTIVO", "ETAPA", "SEVERIDAD", "PUNTAJE");
    for b in &report.bottlenecks {
        println!("{:<12} {:<10} {:<10} {:<22} {:<12} {:<9} {:>6.1}",
                 b.item_id,
                 label(&b.kind),
                 b.context_key,
                 label(&b.reason),
                 b.dominant_stage.to_string(),
                 label(&b.severity),
                 b.severity_score);
    }
    let stats = &report.bottleneck_stats;
    let by_severity: Vec<String> = stats.by_severity.iter().map(|(k, v)| format!("{}={v}", label(k))).collect();
    println!("total={} {}", stats.total, by_severity.join(" "));
}

fn main() {
    // Cargar .env si existe
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();
    let Some(cli) = parse_args(&args) else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    if !matches!(cli.command.as_str(), "report" | "health" | "bottlenecks") {
        eprintln!("[simpilot] comando desconocido: {}", cli.command);
        eprintln!("{USAGE}");
        std::process::exit(2);
    }
    let Some(input) = cli.input.clone() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let mut config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => { eprintln!("[simpilot] {e}"); std::process::exit(5); }
    };
    init_logging(&config.log_filter);
    if cli.limit.is_some() {
        config.bottleneck_limit = cli.limit;
    }

    let bundle = match load_bundle(&input) {
        Ok(b) => b,
        Err(e) => { eprintln!("[simpilot] {input}: {e}"); std::process::exit(exit_code(&e)); }
    };
    let report = match build_report(&bundle, &config) {
        Ok(r) => r,
        Err(e) => { eprintln!("[simpilot] {e}"); std::process::exit(exit_code(&e)); }
    };
    log::debug!("reporte {} huella={}", report.report_id, report.fingerprint);

    match (cli.command.as_str(), cli.json) {
        ("report", true) => print_json(&report),
        ("health", true) => print_json(&HealthView { summaries: &report.summaries, scores: &report.scores }),
        ("bottlenecks", true) => print_json(&BottleneckView { bottlenecks: &report.bottlenecks,
                                                              stats: &report.bottleneck_stats }),
        ("report", false) => {
            println!("reporte {} ({}) motor {} huella {}",
                     report.report_id, report.generated_at, report.engine_version, report.fingerprint);
            let stats = &report.cross_ref.stats;
            println!("estaciones={} con_flags={} flags={}", stats.total_stations, stats.stations_with_flags, stats.total_flags);
            println!();
            print_health(&report);
            println!();
            print_bottlenecks(&report);
        }
        ("health", false) => print_health(&report),
        ("bottlenecks", false) => print_bottlenecks(&report),
        (other, _) => {
            eprintln!("[simpilot] comando desconocido: {other}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}
