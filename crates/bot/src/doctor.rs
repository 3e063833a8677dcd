use serde::Serialize;

use badgey_core::config::{AppConfig, LoadOptions};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum CheckStatus {
    Pass,
    Fail,
    Skipped,
}

#[derive(Debug, Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: CheckStatus,
    details: String,
}

#[derive(Debug, Serialize)]
struct DoctorReport {
    overall_status: CheckStatus,
    summary: String,
    checks: Vec<DoctorCheck>,
}

pub fn run(options: LoadOptions, json_output: bool) -> (u8, String) {
    let report = build_report(options);
    let exit_code = match report.overall_status {
        CheckStatus::Fail => 1,
        _ => 0,
    };

    let output = if json_output {
        serde_json::to_string_pretty(&report).unwrap_or_else(|error| {
            format!(
                "{{\"overall_status\":\"fail\",\"summary\":\"doctor serialization failed\",\"error\":\"{}\"}}",
                escape_json(&error.to_string())
            )
        })
    } else {
        render_human(&report)
    };

    (exit_code, output)
}

fn build_report(options: LoadOptions) -> DoctorReport {
    let mut checks = Vec::new();

    match AppConfig::load(options) {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Pass,
                details: "configuration loaded and validated".to_string(),
            });
            checks.push(check_acclaim_credential(&config));
        }
        Err(error) => {
            checks.push(DoctorCheck {
                name: "config_validation",
                status: CheckStatus::Fail,
                details: error.to_string(),
            });
            checks.push(DoctorCheck {
                name: "acclaim_credential",
                status: CheckStatus::Skipped,
                details: "skipped because configuration did not load".to_string(),
            });
        }
    }

    let any_fail = checks.iter().any(|check| check.status == CheckStatus::Fail);
    let overall_status = if any_fail { CheckStatus::Fail } else { CheckStatus::Pass };
    let summary = if any_fail {
        "doctor: one or more readiness checks failed".to_string()
    } else {
        "doctor: all readiness checks passed".to_string()
    };

    DoctorReport { overall_status, summary, checks }
}

fn check_acclaim_credential(config: &AppConfig) -> DoctorCheck {
    match &config.acclaim.token {
        Some(_) => DoctorCheck {
            name: "acclaim_credential",
            status: CheckStatus::Pass,
            details: format!("credential configured for `{}`", config.acclaim.base_url),
        },
        // Badge lookups degrade to call-time errors without a credential, so
        // its absence is not a readiness failure.
        None => DoctorCheck {
            name: "acclaim_credential",
            status: CheckStatus::Skipped,
            details: "no Acclaim token configured; badge lookups will be unavailable".to_string(),
        },
    }
}

fn render_human(report: &DoctorReport) -> String {
    let mut lines = Vec::new();
    lines.push(report.summary.clone());

    for check in &report.checks {
        let marker = match check.status {
            CheckStatus::Pass => "ok",
            CheckStatus::Fail => "fail",
            CheckStatus::Skipped => "skip",
        };
        lines.push(format!("- [{marker}] {}: {}", check.name, check.details));
    }

    lines.join("\n")
}

fn escape_json(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use badgey_core::config::{ConfigOverrides, LoadOptions};

    use super::run;

    fn options(slack_token: &str, acclaim_token: Option<&str>) -> LoadOptions {
        LoadOptions {
            overrides: ConfigOverrides {
                slack_token: Some(slack_token.to_owned()),
                acclaim_token: acclaim_token.map(str::to_owned),
                ..ConfigOverrides::default()
            },
            ..LoadOptions::default()
        }
    }

    #[test]
    fn passing_report_lists_both_checks() {
        let (exit_code, output) = run(options("xoxb-test", Some("acclaim-test")), false);

        assert_eq!(exit_code, 0);
        assert!(output.contains("all readiness checks passed"));
        assert!(output.contains("[ok] config_validation"));
        assert!(output.contains("[ok] acclaim_credential"));
    }

    #[test]
    fn missing_acclaim_credential_is_a_skip_not_a_failure() {
        let (exit_code, output) = run(options("xoxb-test", None), false);

        assert_eq!(exit_code, 0);
        assert!(output.contains("[skip] acclaim_credential"));
    }

    #[test]
    fn missing_slack_token_fails_the_report() {
        let (exit_code, output) = run(options("", None), true);

        assert_eq!(exit_code, 1);
        assert!(output.contains("\"overall_status\": \"fail\""));
        assert!(output.contains("slack.token"));
    }
}
