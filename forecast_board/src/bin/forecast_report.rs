use clap::Parser;
use forecast_board::report::load_submissions;
use forecast_board::{
    telemetry, BoardConfig, BoardError, DataLoader, ForecastReport, ReportInputs, ScoreSettings,
};
use std::path::{Path, PathBuf};
use survey_scores::QuestionRecord;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "forecast_report",
    about = "Build a volume forecast report from a volume matrix and survey scores",
    version
)]
struct Cli {
    /// Volume matrix, CSV or JSON (chosen by extension)
    #[arg(long)]
    volumes: PathBuf,
    /// Matrix rows to forecast; repeat to sum several rows
    #[arg(long = "row")]
    rows: Vec<String>,
    /// Question list as JSON
    #[arg(long)]
    questions: PathBuf,
    /// Submissions as JSON, grouped or as joined score rows
    #[arg(long)]
    submissions: PathBuf,
    /// Score settings JSON with `yearNames` and `scoreLabels`
    #[arg(long)]
    settings: PathBuf,
    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("forecast_report: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), BoardError> {
    let cli = Cli::parse();
    let config = BoardConfig::load()?;
    telemetry::init(&config)?;

    let volumes = load_volumes(&cli.volumes)?;
    let questions: Vec<QuestionRecord> =
        serde_json::from_str(&std::fs::read_to_string(&cli.questions)?)?;
    let submissions = load_submissions(&std::fs::read_to_string(&cli.submissions)?)?;
    let settings = ScoreSettings::from_file(&cli.settings)?;

    let inputs = ReportInputs {
        volumes,
        rows: cli.rows,
        questions,
        submissions,
        settings,
    };
    let report = ForecastReport::build(&inputs, &config)?;
    let json = report.to_json()?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn load_volumes(path: &Path) -> Result<forecast_board::VolumeMatrix, BoardError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        DataLoader::matrix_from_json_file(path)
    } else {
        DataLoader::matrix_from_csv(path)
    }
}
