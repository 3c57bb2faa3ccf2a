use anyhow::Context;
use clap::Args;

use crate::cli::{OutputFormat, SourceArgs};
use crate::client::error::PredictionError;
use crate::client::wire::PredictResponse;
use crate::client::{LocalPredictor, PredictionClient};
use crate::core::disease::Disease;
use crate::core::symptoms::SymptomSet;
use crate::core::types::Likelihood;
use crate::matching::engine::{MatchResult, MatchingConfig, DEFAULT_LIMIT};

#[derive(Args)]
pub struct PredictArgs {
    /// Free-text symptom description
    /// Use '-' to read it from stdin
    #[arg(required_unless_present = "symptoms", conflicts_with = "symptoms")]
    pub text: Option<String>,

    /// Symptom label (repeatable, or comma-separated)
    #[arg(short, long = "symptom", value_delimiter = ',')]
    pub symptoms: Vec<String>,

    /// Number of conditions to show
    #[arg(short = 'n', long, default_value_t = DEFAULT_LIMIT)]
    pub max_results: usize,

    /// Seed for the local matcher, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Execute predict subcommand
///
/// # Errors
///
/// Returns an error if the input is empty, the catalog cannot be loaded, or
/// the prediction request fails.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PredictArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_async(&args, format, verbose))
}

async fn run_async(args: &PredictArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let matching = MatchingConfig::default().with_limit(args.max_results);
    let client = args.source.build_client(matching, args.seed)?;

    if verbose {
        eprintln!(
            "Using {} predictions",
            if client.is_remote() { "remote" } else { "local" }
        );
    }
    if args.seed.is_some() && client.is_remote() {
        tracing::warn!("--seed only applies to local predictions; ignoring it for the remote service");
    }

    let input = if args.symptoms.is_empty() {
        Input::Text(read_text(args.text.as_deref().unwrap_or_default())?)
    } else {
        Input::Symptoms(args.symptoms.iter().collect())
    };

    // Score breakdowns are only available from the local matcher
    let explain = verbose && matches!(format, OutputFormat::Text);
    let (mut response, mut breakdown) = match &client {
        PredictionClient::Local(predictor) if explain => explain_locally(predictor, &input),
        _ => request_prediction(&client, &input).await.map(|r| (r, Vec::new())),
    }
    .map_err(|err| {
        let message = err.user_message();
        anyhow::Error::new(err).context(message)
    })?;
    response.predictions.truncate(args.max_results);
    breakdown.truncate(args.max_results);

    if response.predictions.is_empty() {
        eprintln!(
            "{}",
            response
                .message
                .as_deref()
                .unwrap_or("No matching conditions found.")
        );
        if matches!(format, OutputFormat::Json) {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_results(&response, &breakdown, verbose),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Tsv => print_tsv_results(&response.predictions),
    }

    Ok(())
}

enum Input {
    Text(String),
    Symptoms(SymptomSet),
}

async fn request_prediction(
    client: &PredictionClient,
    input: &Input,
) -> Result<PredictResponse, PredictionError> {
    match input {
        Input::Text(text) => client.fetch_prediction_response(text).await,
        Input::Symptoms(symptoms) => {
            client
                .fetch_prediction_for(symptoms)
                .await
                .map(|predictions| PredictResponse {
                    symptoms_found: symptoms.labels().map(str::to_string).collect(),
                    ..PredictResponse::new(predictions)
                })
        }
    }
}

fn explain_locally<'c>(
    predictor: &'c LocalPredictor,
    input: &Input,
) -> Result<(PredictResponse, Vec<MatchResult<'c>>), PredictionError> {
    match input {
        Input::Text(text) => predictor.explain_text(text),
        Input::Symptoms(symptoms) => {
            let matches = predictor.explain_symptoms(symptoms)?;
            let response = PredictResponse {
                symptoms_found: symptoms.labels().map(str::to_string).collect(),
                ..PredictResponse::new(matches.iter().map(MatchResult::to_disease).collect())
            };
            Ok((response, matches))
        }
    }
}

fn read_text(arg: &str) -> anyhow::Result<String> {
    use std::io::{self, Read};

    if arg == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read symptom description from stdin")?;
        return Ok(buffer);
    }
    Ok(arg.to_string())
}

fn print_text_results(response: &PredictResponse, breakdown: &[MatchResult<'_>], verbose: bool) {
    if verbose && !response.symptoms_found.is_empty() {
        println!("Recognized symptoms: {}", response.symptoms_found.join(", "));
    }

    for (i, disease) in response.predictions.iter().enumerate() {
        if i > 0 {
            println!("\n{}", "─".repeat(60));
        }

        println!(
            "\n#{} {} ({})",
            i + 1,
            disease.name,
            Likelihood::from_probability(disease.probability)
        );
        println!("   Probability: {:.0}%", disease.percent());
        println!("   Severity: {}", disease.severity);
        if let Some(result) = breakdown.get(i) {
            print_score_breakdown(result);
        }
        println!("   {}", disease.description);
        if let Some(advice) = &disease.advice {
            println!("   Advice: {advice}");
        }
    }

    println!(
        "\nThis prediction is for informational purposes only and does not provide medical advice."
    );
}

fn print_score_breakdown(result: &MatchResult<'_>) {
    let matched = if result.matched_symptoms.is_empty() {
        "none, baseline probability".to_string()
    } else {
        result.matched_symptoms.join(", ")
    };
    println!(
        "   Matched: {}/{} symptoms ({:.0}%): {matched}",
        result.score.match_count,
        result.condition.symptom_count(),
        result.score.match_rate * 100.0
    );
}

fn print_tsv_results(predictions: &[Disease]) {
    println!("rank\tname\tprobability\tseverity\tlikelihood");
    for (i, disease) in predictions.iter().enumerate() {
        println!(
            "{}\t{}\t{:.4}\t{}\t{}",
            i + 1,
            disease.name,
            disease.probability,
            disease.severity,
            Likelihood::from_probability(disease.probability)
        );
    }
}
