use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `skx` binary.
#[derive(Debug, Parser)]
#[command(name = "skx", version, about = "Skill exchange engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (overrides `database.path`)
    #[arg(short, long, global = true)]
    pub database: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            database: self.database.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{
        ConnectionCommands, EventCommands, MatchCommands, ReviewCommands, UserCommands,
    };
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "skx", "--format", "raw", "--limit", "10", "--verbose", "match", "list", "usr-1",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Match { action: MatchCommands::List { ref user } } if user == "usr-1"
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["skx", "config", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["skx", "--format", "xml", "config"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["skx", "--database", "/tmp/skx.db", "config"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.database.as_deref(), Some("/tmp/skx.db"));
    }

    #[test]
    fn user_create_collects_repeated_skills() {
        let cli = Cli::try_parse_from([
            "skx", "user", "create", "--name", "Ana", "--teach", "Guitar", "--teach", "Chess",
            "--learn", "Spanish",
        ])
        .expect("cli should parse");

        let Commands::User {
            action: UserCommands::Create { name, teach, learn, location },
        } = cli.command
        else {
            panic!("expected user create");
        };
        assert_eq!(name, "Ana");
        assert_eq!(teach, vec!["Guitar", "Chess"]);
        assert_eq!(learn, vec!["Spanish"]);
        assert_eq!(location, None);
    }

    #[test]
    fn connection_respond_takes_positional_decision() {
        let cli = Cli::try_parse_from([
            "skx", "connection", "respond", "con-1", "accepted", "--as", "usr-2",
        ])
        .expect("cli should parse");

        let Commands::Connection {
            action: ConnectionCommands::Respond { id, decision, responder },
        } = cli.command
        else {
            panic!("expected connection respond");
        };
        assert_eq!(id, "con-1");
        assert_eq!(decision, "accepted");
        assert_eq!(responder, "usr-2");
    }

    #[test]
    fn review_submit_requires_session_parties() {
        let parsed = Cli::try_parse_from([
            "skx", "review", "submit", "--session", "ses-1", "--reviewer", "usr-1", "--rating",
            "5",
        ]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from([
            "skx", "review", "submit", "--session", "ses-1", "--teacher", "usr-1", "--learner",
            "usr-2", "--duration", "90", "--reviewer", "usr-2", "--rating", "5", "--covers",
            "skl-1", "--covers", "skl-2", "--skill", "skl-1:4", "--skill", "skl-2:5",
        ])
        .expect("cli should parse");
        let Commands::Review {
            action: ReviewCommands::Submit { duration, covers, skill, rating, .. },
        } = cli.command
        else {
            panic!("expected review submit");
        };
        assert_eq!(duration, 90);
        assert_eq!(rating, 5);
        assert_eq!(covers, vec!["skl-1", "skl-2"]);
        assert_eq!(skill, vec!["skl-1:4", "skl-2:5"]);
    }

    #[test]
    fn event_create_and_filtered_list() {
        let cli = Cli::try_parse_from([
            "skx", "event", "create", "--host", "usr-1", "--type", "teach", "--skill", "Guitar",
            "--level", "beginner", "--description", "Open chords", "--date", "2026-11-02",
            "--time", "18:30",
        ])
        .expect("cli should parse");
        let Commands::Event {
            action: EventCommands::Create { event_type, duration, .. },
        } = cli.command
        else {
            panic!("expected event create");
        };
        assert_eq!(event_type, "teach");
        assert_eq!(duration, 60);

        let cli = Cli::try_parse_from(["skx", "event", "list", "--search", "guitar"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Event {
                action: EventCommands::List { event_type: None, level: None, search: Some(ref s) }
            } if s == "guitar"
        ));
    }
}
