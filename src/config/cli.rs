use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::CourseKind;
use crate::utils::error::{PlatformError, Result};
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "course-platform")]
#[command(about = "Manage a roster of courses and their enrolled students")]
pub struct CliConfig {
    /// Path to the JSON data file
    #[arg(long)]
    pub data: Option<String>,

    /// Platform name
    #[arg(long)]
    pub name: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Do not write changes back to the data file")]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Build a sample platform, save it and load it back
    Demo,
    /// Print every course
    List,
    /// Print one course
    Show { title: String },
    /// Print the most popular courses
    Popular {
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Add a course
    Add {
        #[arg(value_enum)]
        kind: KindArg,
        title: String,
        instructor: String,
        start_date: String,
        end_date: String,
        max_students: usize,
        /// Language, software or field, depending on the course kind
        #[arg(long)]
        attribute: Option<String>,
    },
    /// Enroll a student in a course
    Enroll { title: String, student: String },
    /// Remove a course
    Remove { title: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Course,
    Programming,
    Design,
    Science,
}

impl KindArg {
    pub fn into_kind(self, attribute: Option<String>) -> Result<CourseKind> {
        if self == KindArg::Course {
            return Ok(CourseKind::Base);
        }

        let value = attribute.ok_or_else(|| PlatformError::MissingConfigError {
            field: format!("--attribute (required for {:?} courses)", self).to_lowercase(),
        })?;

        Ok(match self {
            KindArg::Programming => CourseKind::Programming { language: value },
            KindArg::Design => CourseKind::Design { software: value },
            KindArg::Science => CourseKind::Science { field: value },
            KindArg::Course => CourseKind::Base,
        })
    }
}

impl CliConfig {
    /// Resolve the effective settings, reading the TOML file when one is given.
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                Some(file)
            }
            None => None,
        };

        let mut settings = Settings::merge(self.name.clone(), self.data.clone(), file.as_ref());
        settings.dry_run = self.dry_run;
        settings.validate()?;
        Ok(settings)
    }
}
