//! Argument parsing and configuration overrides

use std::path::PathBuf;

use clap::Parser;
use fixtures::{AdminRole, MemberStatus};
use shared::HarnessConfig;
use tester::{Args, Command, SeedCommand};

#[test]
fn test_reset_with_global_flags() {
    let args = Args::try_parse_from(["tester", "reset", "--project-root", "/srv/app", "--log-level", "debug"]).unwrap();

    assert_eq!(args.command, Command::Reset);
    assert_eq!(args.project_root, Some(PathBuf::from("/srv/app")));
    assert_eq!(args.log_level.as_deref(), Some("debug"));
}

#[test]
fn test_seed_counts_default_to_three() {
    let args = Args::try_parse_from(["tester", "seed", "bios"]).unwrap();
    assert_eq!(args.command, Command::Seed { what: SeedCommand::Bios { count: 3 } });

    let args = Args::try_parse_from(["tester", "seed", "gallery", "7"]).unwrap();
    assert_eq!(args.command, Command::Seed { what: SeedCommand::Gallery { count: 7 } });
}

#[test]
fn test_seed_admin_parses_role() {
    let args = Args::try_parse_from(["tester", "seed", "admin", "--email", "ed@test.example.com", "--role", "editor"]).unwrap();

    match args.command {
        Command::Seed { what: SeedCommand::Admin { email, role, first_name, .. } } => {
            assert_eq!(email.as_deref(), Some("ed@test.example.com"));
            assert_eq!(role, AdminRole::Editor);
            assert_eq!(first_name, None);
        }
        other => panic!("Unexpected command: {other:?}"),
    }
}

#[test]
fn test_seed_member_rejects_unknown_status() {
    assert!(Args::try_parse_from(["tester", "seed", "member", "--status", "banned"]).is_err());

    let args = Args::try_parse_from(["tester", "seed", "member", "--status", "expired", "--year", "2025"]).unwrap();
    match args.command {
        Command::Seed { what: SeedCommand::Member { status, year, first_name, .. } } => {
            assert_eq!(status, MemberStatus::Expired);
            assert_eq!(year, Some(2025));
            assert_eq!(first_name, "Test");
        }
        other => panic!("Unexpected command: {other:?}"),
    }
}

#[test]
fn test_serve_defaults() {
    let args = Args::try_parse_from(["tester", "serve"]).unwrap();

    assert_eq!(args.command, Command::Serve { check: false, startup_timeout_secs: 30 });
}

#[test]
fn test_query_and_count_take_positional_arguments() {
    let args = Args::try_parse_from(["tester", "query", "SELECT COUNT(*) AS n FROM members"]).unwrap();
    assert_eq!(args.command, Command::Query { sql: "SELECT COUNT(*) AS n FROM members".to_string() });

    let args = Args::try_parse_from(["tester", "count", "payments"]).unwrap();
    assert_eq!(args.command, Command::Count { table: "payments".to_string() });

    assert!(Args::try_parse_from(["tester", "count"]).is_err());
}

#[test]
fn test_flags_override_loaded_configuration() {
    let args = Args::try_parse_from(["tester", "--project-root", "/srv/app", "reset"]).unwrap();
    let config = args.apply_to(HarnessConfig::default()).unwrap();

    assert_eq!(config.project_root, PathBuf::from("/srv/app"));
    assert_eq!(config.db_path, PathBuf::from("/srv/app/data/ysh-robot.db"));

    let args = Args::try_parse_from(["tester", "--db-path", "/tmp/x.db", "--project-root", "/srv/app", "reset"]).unwrap();
    let config = args.apply_to(HarnessConfig::default()).unwrap();
    assert_eq!(config.db_path, PathBuf::from("/tmp/x.db"));
}

#[test]
fn test_invalid_log_level_flag_is_rejected() {
    let args = Args::try_parse_from(["tester", "--log-level", "chatty", "reset"]).unwrap();

    assert!(args.apply_to(HarnessConfig::default()).is_err());
}
