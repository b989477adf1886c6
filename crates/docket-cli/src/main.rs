// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod runtime;

use anyhow::{Context, Result, anyhow};
use config::Config;
use docket_api::Client;
use docket_app::{
    AppCommand, AppState, ClientStorage, ModeStrategy, ProfileRole, ScreenKind, SessionHints,
    SortDirection, StatusFilter, load_profile, load_profile_image, store_profile,
    store_profile_image,
};
use docket_db::Store;
use runtime::{Session, parse_field_args};
use std::env;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::{debug, info};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    logging::init(options.verbose)?;

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `docket --print-example-config` to generate a v1 template",
            options.config_path.display()
        )
    })?;

    let db_path = if options.demo {
        PathBuf::from(":memory:")
    } else {
        config.db_path()?
    };
    if options.print_db_path {
        println!("{}", db_path.display());
        return Ok(());
    }

    let mut store = Store::open(&db_path).with_context(|| {
        format!(
            "open database {} -- if this path is wrong, set [storage].db_path or {}",
            db_path.display(),
            docket_db::DB_PATH_ENV
        )
    })?;
    store.bootstrap()?;

    let client = Client::new(
        config.api_base_url(),
        config.api_token(),
        config.api_timeout()?,
    )
    .with_context(|| {
        format!(
            "invalid [api] config in {}; fix base_url/token/timeout values",
            options.config_path.display()
        )
    })?;
    if options.check_only {
        return Ok(());
    }

    let hints = apply_profile(&mut store, &options)?;
    if let Some(image) = &options.profile_image {
        store_profile_image(&mut store, image)?;
    }

    let strategy = if options.demo {
        ModeStrategy::Demo
    } else {
        config.strategy()
    };
    let screen = options.screen.unwrap_or_else(|| config.default_screen());
    info!(
        screen = screen.as_str(),
        strategy = strategy.as_str(),
        "starting session"
    );

    let today = OffsetDateTime::now_utc().date();
    let mut session = Session::open(screen, strategy, Some(client), today)?;

    if options.create {
        let raw = parse_field_args(&options.fields)?;
        let key = session.create(&raw)?;
        println!("Created {} record {key}", screen.label());
    }

    let mut state = initial_state(screen, &options);
    state.clamp_page(session.page_count(&state, config.page_size()));
    debug!(view = ?state.view, page = state.page, "rendering view");

    if let Some(email) = &hints.email {
        let role = hints.role.as_deref().unwrap_or("unknown role");
        println!("Signed in as {email} ({role})");
        println!("Profile image: {}", load_profile_image(&store)?);
        if let Some(role) = hints.profile_role() {
            for (label, value) in load_profile(&store, role)? {
                println!("{label}: {value}");
            }
        }
    }
    print!("{}", session.render(&state, config.page_size()));
    Ok(())
}

/// Remembers `--role`/`--email` and stores a completed profile for the
/// given or remembered role.
fn apply_profile<S: ClientStorage + ?Sized>(
    storage: &mut S,
    options: &CliOptions,
) -> Result<SessionHints> {
    let mut hints = SessionHints::load(&*storage)?;
    if options.role.is_some() || options.email.is_some() {
        hints.role = options
            .role
            .map(|role| role.as_str().to_owned())
            .or(hints.role);
        hints.email = options.email.clone().or(hints.email);
        hints.save(&mut *storage)?;
    }

    if !options.profile_fields.is_empty() {
        let role = hints.profile_role().ok_or_else(|| {
            anyhow!(
                "--profile-field needs a role; pass --role with one of: {}",
                role_names()
            )
        })?;
        let raw = parse_field_args(&options.profile_fields)?;
        store_profile(storage, role, &raw)
            .with_context(|| format!("complete {} profile", role.as_str()))?;
    }
    Ok(hints)
}

fn role_names() -> String {
    ProfileRole::ALL.map(ProfileRole::as_str).join(", ")
}

fn initial_state(screen: ScreenKind, options: &CliOptions) -> AppState {
    let mut state = AppState::new(screen);
    if let Some(search) = &options.search {
        state.dispatch(AppCommand::SetSearch(search.clone()));
    }
    if let Some(status) = &options.status {
        state.dispatch(AppCommand::SetStatusFilter(StatusFilter::parse(status)));
    }
    if let Some(sort) = &options.sort {
        state.view.sort_key = Some(sort.clone());
        state.view.sort_direction = SortDirection::Asc;
    }
    if options.descending {
        state.view.sort_direction = SortDirection::Desc;
    }
    state.page = options.page.saturating_sub(1);
    state
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    screen: Option<ScreenKind>,
    search: Option<String>,
    status: Option<String>,
    sort: Option<String>,
    descending: bool,
    page: usize,
    create: bool,
    fields: Vec<String>,
    role: Option<ProfileRole>,
    email: Option<String>,
    profile_fields: Vec<String>,
    profile_image: Option<String>,
    print_config_path: bool,
    print_db_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    verbose: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        screen: None,
        search: None,
        status: None,
        sort: None,
        descending: false,
        page: 1,
        create: false,
        fields: Vec::new(),
        role: None,
        email: None,
        profile_fields: Vec::new(),
        profile_image: None,
        print_config_path: false,
        print_db_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        verbose: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let path = next_value(&mut iter, "--config", "a file path")?;
                options.config_path = PathBuf::from(path);
            }
            "--screen" => {
                let name = next_value(&mut iter, "--screen", "a screen name")?;
                options.screen = Some(ScreenKind::parse(&name).ok_or_else(|| {
                    anyhow!(
                        "unknown screen {name:?}; expected one of: {}",
                        ScreenKind::ALL.map(ScreenKind::as_str).join(", ")
                    )
                })?);
            }
            "--search" => {
                options.search = Some(next_value(&mut iter, "--search", "search text")?);
            }
            "--status" => {
                options.status = Some(next_value(&mut iter, "--status", "a status value")?);
            }
            "--sort" => {
                options.sort = Some(next_value(&mut iter, "--sort", "a field name")?);
            }
            "--desc" => {
                options.descending = true;
            }
            "--page" => {
                let raw = next_value(&mut iter, "--page", "a page number")?;
                options.page = raw
                    .parse::<usize>()
                    .ok()
                    .filter(|page| *page > 0)
                    .ok_or_else(|| anyhow!("--page expects a positive number, got {raw:?}"))?;
            }
            "--create" => {
                options.create = true;
            }
            "--field" => {
                options.fields.push(next_value(&mut iter, "--field", "name=value")?);
            }
            "--role" => {
                let name = next_value(&mut iter, "--role", "a role name")?;
                options.role = Some(ProfileRole::parse(&name).ok_or_else(|| {
                    anyhow!("unknown role {name:?}; expected one of: {}", role_names())
                })?);
            }
            "--email" => {
                options.email = Some(next_value(&mut iter, "--email", "an email address")?);
            }
            "--profile-field" => {
                let pair = next_value(&mut iter, "--profile-field", "name=value")?;
                options.profile_fields.push(pair);
            }
            "--profile-image" => {
                let image = next_value(&mut iter, "--profile-image", "an image URL")?;
                options.profile_image = Some(image);
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-path" => {
                options.print_db_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--verbose" | "-v" => {
                options.verbose = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    if !options.fields.is_empty() && !options.create {
        return Err(anyhow!("--field only applies together with --create"));
    }

    Ok(options)
}

fn next_value<I, S>(iter: &mut I, flag: &str, what: &str) -> Result<String>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    iter.next()
        .map(|value| value.as_ref().to_owned())
        .ok_or_else(|| anyhow!("{flag} requires {what}"))
}

fn print_help() {
    println!("docket");
    println!("  --config <path>          Use a specific config path");
    println!("  --screen <name>          Screen to show (cases, billing, appeals, documents,");
    println!("                           calendar, rooms, registrar-cases, registrar-appeals)");
    println!("  --search <text>          Free-text search over the screen's searchable fields");
    println!("  --status <value>         Only show records with this status (All for every record)");
    println!("  --sort <field>           Sort ascending by field");
    println!("  --desc                   Sort descending");
    println!("  --page <n>               Page to show, starting at 1");
    println!("  --create                 Create a record from --field values before listing");
    println!("  --field <name=value>     Form input for --create (repeatable)");
    println!("  --role <role>            Remember the signed-in role (Client, Case Participant,");
    println!("                           CourtRegistrar, Lawyer, Judge)");
    println!("  --email <address>        Remember the signed-in email");
    println!("  --profile-field <n=v>    Complete the role's profile (repeatable)");
    println!("  --profile-image <url>    Store the profile image");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-path             Print resolved database path");
    println!("  --print-example-config   Print a v1 config template");
    println!("  --demo                   Use seed data; accept failed creates locally");
    println!("  --check                  Validate config + DB + backend settings");
    println!("  --verbose                Debug logging on stderr (RUST_LOG overrides)");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, apply_profile, initial_state, parse_cli_args};
    use anyhow::Result;
    use docket_app::{
        ClientStorage, MemoryStorage, ProfileRole, ScreenKind, SortDirection, StatusFilter,
        USER_ROLE_KEY,
    };
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/docket-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                screen: None,
                search: None,
                status: None,
                sort: None,
                descending: false,
                page: 1,
                create: false,
                fields: Vec::new(),
                role: None,
                email: None,
                profile_fields: Vec::new(),
                profile_image: None,
                print_config_path: false,
                print_db_path: false,
                demo: false,
                print_example: false,
                check_only: false,
                verbose: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(vec!["--page", "0"], default_options_path())
            .expect_err("page zero should fail");
        assert!(error.to_string().contains("positive number"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument_and_screen() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));

        let error = parse_cli_args(vec!["--screen", "inbox"], default_options_path())
            .expect_err("unknown screen should fail");
        assert!(error.to_string().contains("registrar-appeals"));
    }

    #[test]
    fn parse_cli_args_reads_view_flags() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--screen", "billing", "--search", "smith", "--status", "Paid", "--sort",
                "amount", "--desc", "--page", "2",
            ],
            default_options_path(),
        )?;
        assert_eq!(options.screen, Some(ScreenKind::Billing));
        assert_eq!(options.search.as_deref(), Some("smith"));
        assert_eq!(options.status.as_deref(), Some("Paid"));
        assert_eq!(options.sort.as_deref(), Some("amount"));
        assert!(options.descending);
        assert_eq!(options.page, 2);
        Ok(())
    }

    #[test]
    fn parse_cli_args_collects_fields_for_create() -> Result<()> {
        let options = parse_cli_args(
            vec!["--create", "--field", "number=401", "--field", "name=Annex"],
            default_options_path(),
        )?;
        assert!(options.create);
        assert_eq!(options.fields, vec!["number=401", "name=Annex"]);

        let error = parse_cli_args(vec!["--field", "number=401"], default_options_path())
            .expect_err("fields without --create should fail");
        assert!(error.to_string().contains("--create"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_print_check_demo_and_verbose_flags() -> Result<()> {
        let options = parse_cli_args(
            vec![
                "--print-config-path",
                "--print-example-config",
                "--check",
                "--demo",
                "--print-path",
                "-v",
            ],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_db_path);
        assert!(options.demo);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(options.verbose);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_accepts_known_roles_only() -> Result<()> {
        let options = parse_cli_args(
            vec!["--role", "Case Participant", "--profile-field", "address=1 Main St"],
            default_options_path(),
        )?;
        assert_eq!(options.role, Some(ProfileRole::CaseParticipant));
        assert_eq!(options.profile_fields, vec!["address=1 Main St"]);

        let error = parse_cli_args(vec!["--role", "admin"], default_options_path())
            .expect_err("unknown role should fail");
        let message = error.to_string();
        assert!(message.contains("unknown role \"admin\""));
        assert!(message.contains("CourtRegistrar"));
        Ok(())
    }

    #[test]
    fn profile_fields_are_validated_for_the_given_role() -> Result<()> {
        let mut storage = MemoryStorage::new();
        let options = parse_cli_args(
            vec![
                "--role",
                "Judge",
                "--email",
                "bench@example.com",
                "--profile-field",
                "position=Presiding",
                "--profile-field",
                "specialization=Criminal Law",
                "--profile-field",
                "experience=12",
            ],
            default_options_path(),
        )?;
        let hints = apply_profile(&mut storage, &options)?;
        assert_eq!(hints.profile_role(), Some(ProfileRole::Judge));
        assert_eq!(storage.get(USER_ROLE_KEY)?.as_deref(), Some("Judge"));
        assert_eq!(storage.get("profile.experience")?.as_deref(), Some("12"));

        let options = parse_cli_args(
            vec!["--profile-field", "position=Presiding"],
            default_options_path(),
        )?;
        let error = apply_profile(&mut storage, &options)
            .expect_err("incomplete judge profile should fail");
        assert!(format!("{error:#}").contains("Specialization is required"));
        Ok(())
    }

    #[test]
    fn profile_fields_need_a_role() -> Result<()> {
        let mut storage = MemoryStorage::new();
        let options = parse_cli_args(
            vec!["--profile-field", "address=1 Main St"],
            default_options_path(),
        )?;
        let error = apply_profile(&mut storage, &options).expect_err("no role should fail");
        assert!(error.to_string().contains("--role"));
        assert!(storage.is_empty());
        Ok(())
    }

    #[test]
    fn initial_state_applies_view_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--status", "all", "--sort", "date", "--desc", "--page", "3"],
            default_options_path(),
        )?;
        let state = initial_state(ScreenKind::Calendar, &options);
        assert_eq!(state.view.status_filter, StatusFilter::All);
        assert_eq!(state.view.sort_key.as_deref(), Some("date"));
        assert_eq!(state.view.sort_direction, SortDirection::Desc);
        assert_eq!(state.page, 2);
        Ok(())
    }

    #[test]
    fn initial_state_keeps_screen_default_sort_without_flags() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        let state = initial_state(ScreenKind::Cases, &options);
        assert_eq!(state.view.sort_key.as_deref(), Some("lastActivity"));
        assert_eq!(state.view.sort_direction, SortDirection::Desc);
        Ok(())
    }
}
