use anyhow::{Result, anyhow};
use std::str::FromStr;

/// One line of the command protocol.
///
/// Format: `VERB [ARG ...]`, whitespace-delimited, verbs case-sensitive.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Command {
    /// `DEPEND <name> [dep ...]`
    Depend {
        name: String,
        dependencies: Vec<String>,
    },
    /// `INSTALL <name>`
    Install { name: String },
    /// `REMOVE <name>`
    Remove { name: String },
    /// `LIST`
    List,
    /// `END`
    End,
    /// Any verb the protocol does not define
    Unknown { verb: String },
}

impl Command {
    pub fn verb(&self) -> &str {
        match self {
            Command::Depend { .. } => "DEPEND",
            Command::Install { .. } => "INSTALL",
            Command::Remove { .. } => "REMOVE",
            Command::List => "LIST",
            Command::End => "END",
            Command::Unknown { verb } => verb,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Depend { name, dependencies } => {
                write!(f, "DEPEND {}", name)?;
                for dep in dependencies {
                    write!(f, " {}", dep)?;
                }
                Ok(())
            }
            Command::Install { name } => write!(f, "INSTALL {}", name),
            Command::Remove { name } => write!(f, "REMOVE {}", name),
            other => write!(f, "{}", other.verb()),
        }
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let verb = tokens
            .next()
            .ok_or_else(|| anyhow!("Empty command line."))?;

        let command = match verb {
            "DEPEND" => {
                let name = required_name(verb, &mut tokens)?;
                Command::Depend {
                    name,
                    dependencies: tokens.map(str::to_string).collect(),
                }
            }
            "INSTALL" => Command::Install {
                name: required_name(verb, &mut tokens)?,
            },
            "REMOVE" => Command::Remove {
                name: required_name(verb, &mut tokens)?,
            },
            "LIST" => Command::List,
            "END" => Command::End,
            other => Command::Unknown {
                verb: other.to_string(),
            },
        };
        Ok(command)
    }
}

fn required_name<'a>(verb: &str, tokens: &mut impl Iterator<Item = &'a str>) -> Result<String> {
    tokens
        .next()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("{} requires a component name.", verb))
}
