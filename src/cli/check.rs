use crate::cli::commands::CheckArgs;
use crate::config::NavGuardConfig;
use crate::errors::NavGuardError;
use crate::models::AnalysisBundle;
use crate::pipeline::RiskPipeline;
use crate::utils::parse_web_url;

pub async fn handle_check(args: CheckArgs, mut config: NavGuardConfig) -> Result<(), NavGuardError> {
    parse_web_url(&args.url)?;
    if args.offline {
        config.oracle.enabled = false;
    }

    let pipeline = RiskPipeline::from_config(&config)?;
    let bundle = pipeline.analyze(&args.url, Vec::new()).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print!("{}", render_summary(&bundle, &config));
    }
    Ok(())
}

fn render_summary(bundle: &AnalysisBundle, config: &NavGuardConfig) -> String {
    let verdict = &bundle.verdict;
    let thresholds = &config.scoring.thresholds;
    let level = verdict
        .display_level(thresholds)
        .map(|l| l.to_string())
        .unwrap_or_else(|| "UNKNOWN".to_string());

    let mut out = String::new();
    out.push_str(&format!("URL:        {}\n", bundle.context.url));
    out.push_str(&format!("Host:       {}\n", bundle.context.hostname));
    out.push_str(&format!("Source:     {}\n", verdict.source.display_label()));
    out.push_str(&format!("Risk:       {} ({}/100)\n", level, verdict.risk_score));
    if let Some(confidence) = verdict.confidence {
        out.push_str(&format!("Confidence: {:.1}%\n", confidence));
    }
    if verdict.is_phishing {
        out.push_str("Phishing:   yes\n");
    }
    for finding in &verdict.findings {
        out.push_str(&format!("  - {}\n", finding));
    }
    for warning in &verdict.warnings {
        out.push_str(&format!("  ! {}\n", warning));
    }
    if verdict.requires_confirmation(thresholds) {
        out.push_str("Continuing would require a second confirmation.\n");
    }
    out
}
