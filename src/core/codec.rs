use crate::domain::model::{Course, CourseKind};
use crate::domain::record::CourseRecord;
use crate::utils::error::{PlatformError, Result};
use serde::Serialize;
use std::path::Path;

const INDENT: &[u8] = b"    ";

impl From<&Course> for CourseRecord {
    fn from(course: &Course) -> Self {
        let mut record = CourseRecord {
            kind: Some(course.kind().type_tag().to_string()),
            title: Some(course.title().to_string()),
            instructor: Some(course.instructor().to_string()),
            start_date: Some(course.start_date().to_string()),
            end_date: Some(course.end_date().to_string()),
            max_students: Some(course.max_students()),
            students: course.students().to_vec(),
            ..Default::default()
        };

        match course.kind() {
            CourseKind::Base => {}
            CourseKind::Programming { language } => record.language = Some(language.clone()),
            CourseKind::Design { software } => record.software = Some(software.clone()),
            CourseKind::Science { field } => record.field = Some(field.clone()),
        }

        record
    }
}

impl TryFrom<CourseRecord> for Course {
    type Error = PlatformError;

    /// Rebuild a course from its record. The enrollment list is restored
    /// verbatim, even past capacity.
    fn try_from(record: CourseRecord) -> Result<Self> {
        let title = required("title", record.title)?;
        let instructor = required("instructor", record.instructor)?;
        let start_date = required("start_date", record.start_date)?;
        let end_date = required("end_date", record.end_date)?;
        let max_students = required("max_students", record.max_students)?;

        let kind = match record.kind.as_deref() {
            Some("ProgrammingCourse") => CourseKind::Programming {
                language: record.language.unwrap_or_default(),
            },
            Some("DesignCourse") => CourseKind::Design {
                software: record.software.unwrap_or_default(),
            },
            Some("ScienceCourse") => CourseKind::Science {
                field: record.field.unwrap_or_default(),
            },
            other => {
                if !matches!(other, Some("Course")) {
                    tracing::debug!("Unknown course type {:?} for '{}', using base course", other, title);
                }
                CourseKind::Base
            }
        };

        Ok(Course::new(title, instructor, start_date, end_date, max_students)
            .with_kind(kind)
            .with_students(record.students))
    }
}

fn required<T>(field: &str, value: Option<T>) -> Result<T> {
    value.ok_or_else(|| PlatformError::MalformedRecord {
        field: field.to_string(),
    })
}

/// Encode courses as a 4-space indented JSON array, in order. Non-ASCII text
/// is written as-is.
pub fn encode_document(courses: &[Course]) -> Result<Vec<u8>> {
    let records: Vec<CourseRecord> = courses.iter().map(CourseRecord::from).collect();

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    records.serialize(&mut serializer)?;
    buffer.push(b'\n');

    Ok(buffer)
}

/// Decode a document read from `origin` into courses, in document order.
pub fn decode_document(bytes: &[u8], origin: &Path) -> Result<Vec<Course>> {
    let records: Vec<CourseRecord> =
        serde_json::from_slice(bytes).map_err(|source| PlatformError::DecodeError {
            path: origin.display().to_string(),
            source,
        })?;

    records.into_iter().map(Course::try_from).collect()
}
