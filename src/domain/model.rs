use crate::utils::error::{PlatformError, Result};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which course subtype a course is, together with its discriminating attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseKind {
    Base,
    Programming { language: String },
    Design { software: String },
    Science { field: String },
}

impl CourseKind {
    /// Tag written to the `type` field of a persisted record.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Self::Base => "Course",
            Self::Programming { .. } => "ProgrammingCourse",
            Self::Design { .. } => "DesignCourse",
            Self::Science { .. } => "ScienceCourse",
        }
    }

    /// Label used by `Course::describe` for the variant line.
    fn attribute_label(&self) -> Option<&'static str> {
        match self {
            Self::Base => None,
            Self::Programming { .. } => Some("Programming language"),
            Self::Design { .. } => Some("Software"),
            Self::Science { .. } => Some("Scientific field"),
        }
    }

    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::Base => None,
            Self::Programming { language } => Some(language),
            Self::Design { software } => Some(software),
            Self::Science { field } => Some(field),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    title: String,
    instructor: String,
    start_date: String,
    end_date: String,
    max_students: usize,
    students: Vec<String>,
    kind: CourseKind,
}

impl Course {
    /// Create a plain course. Dates are stored as given and only parsed by
    /// [`Course::duration_days`].
    pub fn new(
        title: impl Into<String>,
        instructor: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        max_students: usize,
    ) -> Self {
        Self {
            title: title.into(),
            instructor: instructor.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            max_students,
            students: Vec::new(),
            kind: CourseKind::Base,
        }
    }

    pub fn programming(
        title: impl Into<String>,
        instructor: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        max_students: usize,
        language: impl Into<String>,
    ) -> Self {
        Self::new(title, instructor, start_date, end_date, max_students).with_kind(
            CourseKind::Programming {
                language: language.into(),
            },
        )
    }

    pub fn design(
        title: impl Into<String>,
        instructor: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        max_students: usize,
        software: impl Into<String>,
    ) -> Self {
        Self::new(title, instructor, start_date, end_date, max_students).with_kind(
            CourseKind::Design {
                software: software.into(),
            },
        )
    }

    pub fn science(
        title: impl Into<String>,
        instructor: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        max_students: usize,
        field: impl Into<String>,
    ) -> Self {
        Self::new(title, instructor, start_date, end_date, max_students).with_kind(
            CourseKind::Science {
                field: field.into(),
            },
        )
    }

    pub fn with_kind(mut self, kind: CourseKind) -> Self {
        self.kind = kind;
        self
    }

    /// Restore an enrollment list as-is, without capacity checks.
    pub(crate) fn with_students(mut self, students: Vec<String>) -> Self {
        self.students = students;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructor(&self) -> &str {
        &self.instructor
    }

    pub fn start_date(&self) -> &str {
        &self.start_date
    }

    pub fn end_date(&self) -> &str {
        &self.end_date
    }

    pub fn max_students(&self) -> usize {
        self.max_students
    }

    pub fn students(&self) -> &[String] {
        &self.students
    }

    pub fn kind(&self) -> &CourseKind {
        &self.kind
    }

    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            CourseKind::Programming { language } => Some(language),
            _ => None,
        }
    }

    pub fn software(&self) -> Option<&str> {
        match &self.kind {
            CourseKind::Design { software } => Some(software),
            _ => None,
        }
    }

    pub fn field(&self) -> Option<&str> {
        match &self.kind {
            CourseKind::Science { field } => Some(field),
            _ => None,
        }
    }

    /// Enroll a student. Fails without touching the list when the course is full.
    pub fn add_student(&mut self, name: impl Into<String>) -> Result<()> {
        if self.students.len() >= self.max_students {
            return Err(PlatformError::CapacityExceeded {
                title: self.title.clone(),
            });
        }
        let name = name.into();
        tracing::debug!("Enrolling '{}' in '{}'", name, self.title);
        self.students.push(name);
        Ok(())
    }

    /// Enrollment as a percentage of capacity; `0.0` for a zero-capacity course.
    pub fn completion_rate(&self) -> f64 {
        if self.max_students == 0 {
            return 0.0;
        }
        self.students.len() as f64 / self.max_students as f64 * 100.0
    }

    /// Days from `start_date` to `end_date`. Negative when the course ends
    /// before it starts.
    pub fn duration_days(&self) -> Result<i64> {
        let start = parse_date(&self.start_date)?;
        let end = parse_date(&self.end_date)?;
        Ok((end - start).num_days())
    }

    pub fn describe(&self) -> Result<String> {
        let mut lines = vec![
            format!("Course: {}", self.title),
            format!("Instructor: {}", self.instructor),
            format!(
                "Dates: {} - {} ({} days)",
                self.start_date,
                self.end_date,
                self.duration_days()?
            ),
            format!("Students: {}/{}", self.students.len(), self.max_students),
        ];

        if let (Some(label), Some(value)) = (self.kind.attribute_label(), self.kind.attribute()) {
            lines.push(format!("{}: {}", label, value));
        }

        Ok(lines.join("\n"))
    }
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| {
        PlatformError::InvalidDateFormat {
            value: value.to_string(),
            source,
        }
    })
}
