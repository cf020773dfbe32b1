use chrono::Utc;
use forecast_board::{BoardConfig, DataLoader, ForecastReport, ReportInputs, ScoreSettings};
use survey_scores::{QuestionRecord, QuestionResponse, SubmissionRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Board: Basic Forecasting Example");
    println!("=========================================\n");

    // Volume sheet as exported from the dashboard
    let sheet = "Country,2020,2021,2022,2023,2024\n\
                 PERU,\"12,000\",\"12,600\",\"13,100\",\"13,900\",\"14,500\"\n\
                 CHILE,\"8,000\",\"7,800\",\"7,900\",\"7,600\",\"7,500\"\n";
    let volumes = DataLoader::matrix_from_reader(sheet.as_bytes())?;
    println!("Loaded {} rows over {:?}\n", volumes.rows().len(), volumes.columns());

    let settings = ScoreSettings {
        year_names: vec!["2025".to_string(), "2026".to_string(), "2027".to_string()],
        score_labels: ["Very Low", "Low", "Medium", "High", "Very High"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    };

    let questions: Vec<QuestionRecord> = serde_json::from_str(
        r#"[
            {"id": 1, "text": "Market demand", "weight": 0.6, "type": "positive"},
            {"id": 2, "text": "Regulatory pressure", "weight": 0.3, "type": "negative"}
        ]"#,
    )?;

    // Two respondents fill in the score card
    let card = settings.score_card(BoardConfig::default().score_scale)?;
    let answers = [
        r#"[{"questionId": 1, "selections": ["High", "High", "Medium"]},
            {"questionId": 2, "selections": ["Low", "Low", "Low"]}]"#,
        r#"[{"questionId": 1, "selections": ["Very High", "Medium", "Medium"]},
            {"questionId": 2, "skipped": true}]"#,
    ];
    let mut submissions = Vec::new();
    for (i, json) in answers.iter().enumerate() {
        let responses: Vec<QuestionResponse> = serde_json::from_str(json)?;
        submissions.push(SubmissionRecord {
            id: (i as i64 + 1).into(),
            created_at: Utc::now(),
            scores: card.records(&responses),
        });
    }

    for rows in [vec!["PERU".to_string()], vec!["CHILE".to_string()]] {
        let inputs = ReportInputs {
            volumes: volumes.clone(),
            rows,
            questions: questions.clone(),
            submissions: submissions.clone(),
            settings: settings.clone(),
        };
        let report = ForecastReport::build(&inputs, &BoardConfig::default())?;

        println!("Forecast for {:?}", report.rows);
        println!("  Yearly scores: {:?}", report.yearly_scores.values());
        for row in report.chart.rows() {
            println!(
                "  {:>6}  value={:>10}  linear={:>10}  score={:>10}",
                row.period,
                fmt_volume(row.value),
                fmt_volume(row.forecast_linear),
                fmt_volume(row.forecast_score)
            );
        }
        println!();
    }

    Ok(())
}

fn fmt_volume(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.0}", v))
}
