//! ---
//! seva_section: "05-external-interfaces"
//! seva_subsection: "binary"
//! seva_type: "source"
//! seva_scope: "code"
//! seva_description: "Operator shell for the Apki Seva portal core."
//! seva_version: "v0.0.0-prealpha"
//! seva_owner: "tbd"
//! ---
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use seva_identity::{Account, Role};
use seva_portal::{CertificateKind, Portal, ResourceId};

/// One shell input line.
#[derive(Debug, Parser)]
#[command(
    name = "sevactl shell",
    no_binary_name = true,
    disable_version_flag = true,
    help_template = "{all-args}"
)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    #[command(about = "Sign in with email and password")]
    Login {
        email: String,
        #[arg(allow_hyphen_values = true)]
        password: String,
    },
    #[command(about = "Create a User account and sign in")]
    Register {
        email: String,
        #[arg(allow_hyphen_values = true)]
        password: String,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        display_name: Vec<String>,
    },
    #[command(about = "Request a password reset")]
    Forgot { email: String },
    #[command(about = "Sign out")]
    Logout,
    #[command(about = "Show the signed-in account and active view")]
    Whoami,
    #[command(about = "List role views the session may switch to")]
    Views,
    #[command(about = "Switch the active role view")]
    View {
        #[arg(value_parser = Role::from_str)]
        role: Role,
    },
    #[command(about = "List certificate requests")]
    Certs,
    #[command(about = "Request a certificate (User view)")]
    Request {
        #[arg(value_parser = CertificateKind::from_str)]
        kind: CertificateKind,
        #[arg(value_parser = clap::value_parser!(u32))]
        hours: u32,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        event: Vec<String>,
    },
    #[command(about = "Approve a pending request (Admin or Staff view)")]
    Approve { id: String },
    #[command(about = "Reject a pending request (Admin or Staff view)")]
    Reject { id: String },
    #[command(about = "List the resource inventory")]
    Resources,
    #[command(about = "Book an available resource")]
    Book {
        #[arg(value_parser = clap::value_parser!(ResourceId))]
        id: ResourceId,
    },
    #[command(about = "Show dashboard counters as JSON")]
    Stats,
    #[command(about = "Leave the shell", alias = "exit")]
    Quit,
}

/// Parse one line. Blank lines yield `None`.
fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }
    ShellLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

fn describe(account: &Account) -> String {
    format!("{} <{}> ({})", account.display_name, account.email, account.role)
}

/// Drives a [`Portal`] from line-oriented input. Plays the part of the presentation shell.
pub struct Shell {
    portal: Portal,
    auth_latency: Duration,
}

impl Shell {
    pub fn new(portal: Portal, auth_latency: Duration) -> Self {
        Self {
            portal,
            auth_latency,
        }
    }

    /// Process lines until EOF or `quit`. Command failures are reported and the loop continues.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        for line in input.lines() {
            let line = line?;
            let reply = match parse(&line) {
                Ok(None) => continue,
                Ok(Some(Command::Quit)) => break,
                Ok(Some(command)) => self
                    .execute(command)
                    .unwrap_or_else(|err| format!("error: {}", err)),
                // clap renders help and usage errors itself, `error:` prefix included.
                Err(err) => err.to_string(),
            };
            writeln!(output, "{}", reply.trim_end())?;
            output.flush()?;
        }
        output.flush()?;
        Ok(())
    }

    fn execute(&mut self, command: Command) -> Result<String> {
        let identity = self.portal.identity().clone();
        let reply = match command {
            Command::Login { email, password } => {
                self.pause();
                let account = identity.login(&email, &password)?;
                format!("signed in as {}", describe(&account))
            }
            Command::Register {
                email,
                password,
                display_name,
            } => {
                self.pause();
                let account = identity.register(&display_name.join(" "), &email, &password)?;
                format!("account created; signed in as {}", describe(&account))
            }
            Command::Forgot { email } => {
                self.pause();
                identity.request_password_reset(&email)?.message
            }
            Command::Logout => {
                identity.logout();
                "signed out".to_owned()
            }
            Command::Whoami => match identity.current_account() {
                Some(account) => format!(
                    "{} viewing as {}",
                    describe(&account),
                    identity.active_role_view()
                ),
                None => "not signed in".to_owned(),
            },
            Command::Views => {
                let views = identity.available_role_views();
                if views.is_empty() {
                    "no role switcher for this session".to_owned()
                } else {
                    let labels: Vec<_> = views.iter().map(Role::to_string).collect();
                    format!(
                        "views: {} (active: {})",
                        labels.join(", "),
                        identity.active_role_view()
                    )
                }
            }
            Command::View { role } => {
                identity.set_active_role_view(role)?;
                format!("viewing as {}", role)
            }
            Command::Certs => {
                let lines: Vec<_> = self
                    .portal
                    .certificates()?
                    .iter()
                    .map(|cert| {
                        format!(
                            "{}  {:<8}  {}  {}  {}  {}h  {}",
                            cert.id,
                            cert.status.to_string(),
                            cert.applicant,
                            cert.kind,
                            cert.event,
                            cert.hours,
                            cert.date
                        )
                    })
                    .collect();
                if lines.is_empty() {
                    "no certificate requests".to_owned()
                } else {
                    lines.join("\n")
                }
            }
            Command::Request { kind, hours, event } => {
                let request = self
                    .portal
                    .request_certificate(kind, &event.join(" "), hours)?;
                format!("submitted {} ({})", request.id, request.status)
            }
            Command::Approve { id } => {
                let request = self.portal.approve(&id)?;
                format!("{} {}", request.id, request.status)
            }
            Command::Reject { id } => {
                let request = self.portal.reject(&id)?;
                format!("{} {}", request.id, request.status)
            }
            Command::Resources => {
                let lines: Vec<_> = self
                    .portal
                    .resources()?
                    .into_iter()
                    .map(|res| {
                        format!(
                            "{}  {:<11}  {}  {}  capacity {}",
                            res.id,
                            res.status.to_string(),
                            res.name,
                            res.kind,
                            res.capacity
                        )
                    })
                    .collect();
                if lines.is_empty() {
                    "no resources".to_owned()
                } else {
                    lines.join("\n")
                }
            }
            Command::Book { id } => {
                let resource = self.portal.book_resource(id)?;
                format!("booked {}", resource.name)
            }
            Command::Stats => serde_json::to_string(&self.portal.stats()?)?,
            Command::Quit => String::new(),
        };
        Ok(reply)
    }

    fn pause(&self) {
        if !self.auth_latency.is_zero() {
            std::thread::sleep(self.auth_latency);
        }
    }
}
