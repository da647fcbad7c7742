//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `student_core` linkage and schema bootstrap from the shell.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `student_cli [DB_PATH] [LOG_DIR]`. Without a path an in-memory
//! database is used. With `LOG_DIR`, core logging is written there at the
//! build's default level.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use student_core::db::migrations::current_version;
use student_core::db::{open_db, open_db_in_memory};
use student_core::{
    default_log_level, init_logging, SqliteStudentIdCardRepository, SqliteStudentRepository,
    StudentIdCardRepository, StudentRepository,
};

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    db_path: Option<PathBuf>,
    log_dir: Option<PathBuf>,
}

impl CliArgs {
    // Paths stay `OsString`-backed; non-UTF-8 names are valid on Unix.
    fn parse(args: impl IntoIterator<Item = OsString>) -> Self {
        let mut args = args.into_iter().map(PathBuf::from);
        Self {
            db_path: args.next(),
            log_dir: args.next(),
        }
    }
}

fn main() -> ExitCode {
    println!("student_core ping={}", student_core::ping());
    println!("student_core version={}", student_core::core_version());

    match run(CliArgs::parse(std::env::args_os().skip(1))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(log_dir) = args.log_dir.as_deref() {
        let log_dir = log_dir
            .to_str()
            .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", log_dir.display()))?;
        init_logging(default_log_level().as_str(), log_dir)?;
    }

    let conn = match args.db_path.as_deref() {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };

    let students = SqliteStudentRepository::try_new(&conn)?;
    let cards = SqliteStudentIdCardRepository::try_new(&conn)?;

    println!("schema_version={}", current_version(&conn)?);
    println!("students={}", students.count_students()?);
    println!("student_id_cards={}", cards.count_cards()?);
    Ok(())
}
