use crate::config::Settings;
use crate::core::{Course, Platform, Storage};
use crate::utils::error::{PlatformError, Result};
use std::io::Write;
use std::path::Path;

/// Load the platform from the configured data file. A missing file yields an
/// empty platform; any other load failure is returned so that a damaged file
/// is never overwritten.
pub fn open_platform<S: Storage>(storage: &S, settings: &Settings) -> Result<Platform> {
    let mut platform = Platform::new(settings.platform_name.clone());
    match platform.load_from(storage, Path::new(&settings.data_path)) {
        Ok(_) | Err(PlatformError::FileNotFound { .. }) => Ok(platform),
        Err(e) => Err(e),
    }
}

fn write_course<W: Write>(out: &mut W, course: &Course) -> Result<()> {
    match course.describe() {
        Ok(description) => writeln!(out, "{}", description)?,
        Err(e) => {
            tracing::warn!("Cannot describe '{}': {}", course.title(), e);
            writeln!(out, "Course: {}\n{}", course.title(), e)?;
        }
    }
    Ok(())
}

fn write_separator<W: Write>(out: &mut W, settings: &Settings) -> Result<()> {
    writeln!(out, "{}", "-".repeat(settings.separator_width))?;
    Ok(())
}

fn write_popular<W: Write>(out: &mut W, platform: &Platform, n: usize, settings: &Settings) -> Result<()> {
    for course in platform.get_most_popular(n) {
        write_course(out, course)?;
        writeln!(out, "Completion rate: {:.1}%", course.completion_rate())?;
        write_separator(out, settings)?;
    }
    Ok(())
}

pub fn sample_platform(name: &str) -> Result<Platform> {
    let mut python_course = Course::programming(
        "Python for Beginners",
        "Ivanov I.I.",
        "2025-01-10",
        "2025-04-10",
        30,
        "Python",
    );
    let mut design_course =
        Course::design("UI/UX Design", "Petrova A.S.", "2025-02-01", "2025-05-01", 25, "Figma");

    python_course.add_student("Sidorov Petr")?;
    python_course.add_student("Kozlova Anna")?;
    for i in 1..=10 {
        python_course.add_student(format!("Student {}", i))?;
    }
    for i in 1..=15 {
        design_course.add_student(format!("Designer {}", i))?;
    }

    let mut platform = Platform::new(name);
    platform.add_course(python_course);
    platform.add_course(design_course);
    Ok(platform)
}

pub fn demo<S: Storage, W: Write>(storage: &S, settings: &Settings, out: &mut W) -> Result<()> {
    let platform = sample_platform(&settings.platform_name)?;
    let path = Path::new(&settings.data_path);

    writeln!(out, "Most popular courses:")?;
    write_popular(out, &platform, 2, settings)?;

    platform.save_to(storage, path)?;

    let mut reloaded = Platform::new(format!("New{}", settings.platform_name));
    if let Err(e) = reloaded.load_from(storage, path) {
        writeln!(out, "{}", e.user_friendly_message())?;
    }

    writeln!(out, "\nLoaded from JSON:")?;
    for course in reloaded.get_all_courses() {
        write_course(out, &course)?;
        write_separator(out, settings)?;
    }
    Ok(())
}

pub fn list<S: Storage, W: Write>(storage: &S, settings: &Settings, out: &mut W) -> Result<()> {
    let platform = open_platform(storage, settings)?;

    writeln!(out, "{}", platform)?;
    for course in platform.get_all_courses() {
        write_course(out, &course)?;
        write_separator(out, settings)?;
    }
    Ok(())
}

pub fn show<S: Storage, W: Write>(storage: &S, settings: &Settings, title: &str, out: &mut W) -> Result<()> {
    let platform = open_platform(storage, settings)?;
    let course = platform
        .find_course(title)
        .ok_or_else(|| PlatformError::CourseNotFound {
            title: title.to_string(),
        })?;

    write_course(out, course)?;
    writeln!(out, "Completion rate: {:.1}%", course.completion_rate())?;
    Ok(())
}

pub fn popular<S: Storage, W: Write>(
    storage: &S,
    settings: &Settings,
    n: Option<usize>,
    out: &mut W,
) -> Result<()> {
    let platform = open_platform(storage, settings)?;

    writeln!(out, "Most popular courses:")?;
    write_popular(out, &platform, n.unwrap_or(settings.popular_count), settings)
}

pub fn add<S: Storage, W: Write>(storage: &S, settings: &Settings, course: Course, out: &mut W) -> Result<()> {
    let mut platform = open_platform(storage, settings)?;

    writeln!(out, "Added course '{}'", course.title())?;
    platform.add_course(course);
    platform.save_to(storage, Path::new(&settings.data_path))
}

pub fn enroll<S: Storage, W: Write>(
    storage: &S,
    settings: &Settings,
    title: &str,
    student: &str,
    out: &mut W,
) -> Result<()> {
    let mut platform = open_platform(storage, settings)?;
    let course = platform
        .find_course_mut(title)
        .ok_or_else(|| PlatformError::CourseNotFound {
            title: title.to_string(),
        })?;

    course.add_student(student)?;
    writeln!(
        out,
        "Enrolled '{}' in '{}' ({}/{})",
        student,
        course.title(),
        course.students().len(),
        course.max_students()
    )?;

    platform.save_to(storage, Path::new(&settings.data_path))
}

pub fn remove<S: Storage, W: Write>(storage: &S, settings: &Settings, title: &str, out: &mut W) -> Result<()> {
    let mut platform = open_platform(storage, settings)?;

    if platform.remove_course(title) {
        writeln!(out, "Removed course '{}'", title)?;
        platform.save_to(storage, Path::new(&settings.data_path))
    } else {
        writeln!(out, "Course '{}' not found, nothing removed", title)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryStorage;

    fn settings() -> Settings {
        Settings {
            data_path: "platform_data.json".to_string(),
            ..Settings::default()
        }
    }

    fn run<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_demo_saves_and_reloads() {
        let storage = MemoryStorage::new();
        let settings = settings();

        let output = run(|out| demo(&storage, &settings, out));

        let popular_section = output.split("Loaded from JSON:").next().unwrap();
        let design_at = popular_section.find("Course: UI/UX Design").unwrap();
        let python_at = popular_section.find("Course: Python for Beginners").unwrap();
        assert!(design_at < python_at);
        assert!(popular_section.contains("Completion rate: 60.0%"));
        assert!(popular_section.contains("Completion rate: 40.0%"));
        assert!(output.contains("Programming language: Python"));
        assert!(storage.get_file("platform_data.json").is_some());
    }

    #[test]
    fn test_list_with_missing_file_prints_empty_platform() {
        let storage = MemoryStorage::new();
        let output = run(|out| list(&storage, &settings(), out));
        assert_eq!(output.trim(), "Platform: SuperLearn, courses: 0");
    }

    #[test]
    fn test_corrupt_file_is_not_overwritten() {
        let storage = MemoryStorage::new();
        storage.insert_file("platform_data.json", "{ not json");

        let course = Course::new("New", "Smith", "2025-01-01", "2025-01-02", 1);
        let mut out = Vec::new();
        let err = add(&storage, &settings(), course, &mut out).unwrap_err();

        assert!(matches!(err, PlatformError::DecodeError { .. }));
        assert_eq!(storage.get_file("platform_data.json").unwrap(), b"{ not json");
    }

    #[test]
    fn test_add_enroll_and_remove() {
        let storage = MemoryStorage::new();
        let settings = settings();

        let course = Course::science("Genetics", "Mendel G.", "2025-02-01", "2025-05-01", 1, "Biology");
        run(|out| add(&storage, &settings, course, out));
        run(|out| enroll(&storage, &settings, "Genetics", "Zoe", out));

        let mut out = Vec::new();
        let err = enroll(&storage, &settings, "Genetics", "Adam", &mut out).unwrap_err();
        assert!(matches!(err, PlatformError::CapacityExceeded { .. }));

        let output = run(|out| show(&storage, &settings, "Genetics", out));
        assert!(output.contains("Students: 1/1"));
        assert!(output.contains("Scientific field: Biology"));
        assert!(output.contains("Completion rate: 100.0%"));

        let output = run(|out| remove(&storage, &settings, "Genetics", out));
        assert!(output.contains("Removed course 'Genetics'"));

        let mut out = Vec::new();
        let err = show(&storage, &settings, "Genetics", &mut out).unwrap_err();
        assert!(matches!(err, PlatformError::CourseNotFound { .. }));
    }

    #[test]
    fn test_list_reports_bad_dates_per_course() {
        let storage = MemoryStorage::new();
        let settings = settings();
        let mut platform = Platform::new("SuperLearn");
        platform.add_course(Course::new("Broken", "Smith", "someday", "2025-01-02", 1));
        platform.save_to(&storage, Path::new(&settings.data_path)).unwrap();

        let output = run(|out| list(&storage, &settings, out));
        assert!(output.contains("Course: Broken"));
        assert!(output.contains("Invalid date format 'someday'"));
    }

    #[test]
    fn test_popular_uses_configured_default() {
        let storage = MemoryStorage::new();
        let settings = Settings {
            popular_count: 1,
            ..settings()
        };
        sample_platform("SuperLearn")
            .unwrap()
            .save_to(&storage, Path::new(&settings.data_path))
            .unwrap();

        let output = run(|out| popular(&storage, &settings, None, out));
        assert!(output.contains("UI/UX Design"));
        assert!(!output.contains("Python for Beginners"));
    }
}
