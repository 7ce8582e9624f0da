use anyhow::Context;
use clap::Parser;
use course_platform::app::commands;
use course_platform::config::{Command, Settings};
use course_platform::core::Storage;
use course_platform::utils::error::{ErrorSeverity, PlatformError};
use course_platform::utils::logger;
use course_platform::{CliConfig, Course, LocalStorage, MemoryStorage};
use std::io::Write;
use std::path::Path;

fn dispatch<S: Storage, W: Write>(
    command: Command,
    storage: &S,
    settings: &Settings,
    out: &mut W,
) -> course_platform::Result<()> {
    match command {
        Command::Demo => commands::demo(storage, settings, out),
        Command::List => commands::list(storage, settings, out),
        Command::Show { title } => commands::show(storage, settings, &title, out),
        Command::Popular { n } => commands::popular(storage, settings, n, out),
        Command::Add {
            kind,
            title,
            instructor,
            start_date,
            end_date,
            max_students,
            attribute,
        } => {
            let course = Course::new(title, instructor, start_date, end_date, max_students)
                .with_kind(kind.into_kind(attribute)?);
            commands::add(storage, settings, course, out)
        }
        Command::Enroll { title, student } => commands::enroll(storage, settings, &title, &student, out),
        Command::Remove { title } => commands::remove(storage, settings, &title, out),
    }
}

fn run(config: CliConfig) -> course_platform::Result<()> {
    let settings = config.settings()?;
    tracing::debug!("Settings: {:?}", settings);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if settings.dry_run {
        tracing::info!("🔍 DRY RUN MODE - {} will not be modified", settings.data_path);

        // 以磁碟上的資料為起點，所有寫入只留在記憶體中
        let storage = MemoryStorage::new();
        match LocalStorage::new().read_file(Path::new(&settings.data_path)) {
            Ok(data) => storage.insert_file(&settings.data_path, data),
            Err(PlatformError::FileNotFound { .. }) => {}
            Err(e) => return Err(e),
        }
        dispatch(config.command, &storage, &settings, &mut out)
    } else {
        dispatch(config.command, &LocalStorage::new(), &settings, &mut out)
    }
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config) {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    std::io::stdout().flush().context("failed to flush stdout")?;
    Ok(())
}
