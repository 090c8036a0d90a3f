//! Console rendering of command responses.

use anyhow::Result;
use clap::ValueEnum;

use crate::domain::model::{InstallOutcome, RemoveOutcome};

use super::Response;

/// Report line indentation used by the text format.
const INDENT: &str = "   ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report lines
    #[default]
    Text,
    /// One JSON object per response
    Json,
}

/// Turn a response into the lines to print, without trailing newlines.
pub fn render(response: &Response, format: OutputFormat) -> Result<Vec<String>> {
    match format {
        OutputFormat::Text => Ok(render_text(response)),
        OutputFormat::Json => match response {
            Response::Ignored { .. } => Ok(Vec::new()),
            other => Ok(vec![serde_json::to_string(other)?]),
        },
    }
}

fn render_text(response: &Response) -> Vec<String> {
    match response {
        Response::Install(InstallOutcome::AlreadyInstalled { name }) => {
            vec![format!("{INDENT}{name} is already installed.")]
        }
        Response::Install(InstallOutcome::Installed { installed }) => installed
            .iter()
            .map(|i| format!("{INDENT}Installing {}", i.name))
            .collect(),
        Response::InstallRejected { name, cycle } => vec![format!(
            "{INDENT}Cannot install {name}: cyclic dependency {}.",
            cycle.join(" -> ")
        )],
        Response::Remove(RemoveOutcome::NotInstalled { name }) => {
            vec![format!("{INDENT}{name} is not installed.")]
        }
        Response::Remove(RemoveOutcome::StillNeeded { name, .. }) => {
            vec![format!("{INDENT}{name} is still needed.")]
        }
        Response::Remove(outcome @ RemoveOutcome::Removed { .. }) => outcome
            .removed_names()
            .into_iter()
            .map(|name| format!("{INDENT}Removing {name}"))
            .collect(),
        Response::List { installed } => installed
            .iter()
            .map(|name| format!("{INDENT} {name}"))
            .collect(),
        Response::Declared { .. } | Response::End | Response::Ignored { .. } => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Installation;

    fn text(response: Response) -> Vec<String> {
        render(&response, OutputFormat::Text).unwrap()
    }

    #[test]
    fn test_text_install_lines() {
        let lines = text(Response::Install(InstallOutcome::Installed {
            installed: vec![
                Installation {
                    name: "NETCARD".into(),
                    implicit: true,
                },
                Installation {
                    name: "TCPIP".into(),
                    implicit: false,
                },
            ],
        }));
        assert_eq!(lines, vec!["   Installing NETCARD", "   Installing TCPIP"]);

        let lines = text(Response::Install(InstallOutcome::AlreadyInstalled {
            name: "TCPIP".into(),
        }));
        assert_eq!(lines, vec!["   TCPIP is already installed."]);
    }

    #[test]
    fn test_text_remove_lines() {
        assert_eq!(
            text(Response::Remove(RemoveOutcome::NotInstalled {
                name: "DNS".into()
            })),
            vec!["   DNS is not installed."]
        );
        assert_eq!(
            text(Response::Remove(RemoveOutcome::StillNeeded {
                name: "TCPIP".into(),
                needed_by: vec!["TELNET".into()],
            })),
            vec!["   TCPIP is still needed."]
        );
        assert_eq!(
            text(Response::Remove(RemoveOutcome::Removed {
                name: "TELNET".into(),
                cascaded: vec!["TCPIP".into(), "NETCARD".into()],
            })),
            vec![
                "   Removing TELNET",
                "   Removing TCPIP",
                "   Removing NETCARD"
            ]
        );
    }

    #[test]
    fn test_text_list_lines() {
        let lines = text(Response::List {
            installed: vec!["NETCARD".into(), "TCPIP".into()],
        });
        assert_eq!(lines, vec!["    NETCARD", "    TCPIP"]);

        assert!(text(Response::List { installed: vec![] }).is_empty());
    }

    #[test]
    fn test_text_cycle_line() {
        let lines = text(Response::InstallRejected {
            name: "A".into(),
            cycle: vec!["A".into(), "B".into(), "A".into()],
        });
        assert_eq!(
            lines,
            vec!["   Cannot install A: cyclic dependency A -> B -> A."]
        );
    }

    #[test]
    fn test_silent_responses() {
        assert!(
            text(Response::Declared {
                name: "A".into(),
                dependencies: vec!["B".into()],
            })
            .is_empty()
        );
        assert!(text(Response::End).is_empty());
        assert!(text(Response::Ignored { verb: "X".into() }).is_empty());
        assert!(
            render(&Response::Ignored { verb: "X".into() }, OutputFormat::Json)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_json_list_line() {
        let lines = render(
            &Response::List {
                installed: vec!["APP".into()],
            },
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(lines, vec![r#"{"kind":"list","installed":["APP"]}"#]);
    }
}
