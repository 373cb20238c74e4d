use crate::domain::prediction::{OutcomeLine, PredictionReport};

const UNKNOWN: &str = "?";

pub fn format_prediction_report(report: &PredictionReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "Amount of time required to ship {} to {} tickets (and the number of simulations that arrived at that result):",
        report.low_ticket_target, report.high_ticket_target
    ));
    lines.push(String::new());
    for outcome in &report.outcomes {
        lines.push(format_outcome_line(outcome));
    }
    lines.push(String::new());

    let (confidence, days) = match &report.result_above_threshold {
        Some(result) => (
            format_percent(result.cumulative_percentage),
            result.days.to_string(),
        ),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };
    lines.push(format!(
        "We are {confidence}% confident all {low} to {high} tickets will take no more than {days} days to complete.",
        low = report.low_ticket_target,
        high = report.high_ticket_target,
    ));

    lines.join("\n")
}

fn format_outcome_line(outcome: &OutcomeLine) -> String {
    let plural = if outcome.trials == 1 { "" } else { "s" };
    format!(
        "{days} days, {confidence}% confidence ({trials} simulation{plural})",
        days = outcome.days,
        confidence = format_percent(outcome.cumulative_percentage),
        trials = outcome.trials,
    )
}

fn format_percent(value: f64) -> String {
    format!("{}", value.floor() as u64)
}
