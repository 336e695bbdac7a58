//! # Course Catalog & Pagination
//!
//! The static course catalog and the pagination math used by the courses
//! screen. The catalog is supplied at startup and never mutated; pages are
//! windows of [`PAGE_SIZE`] items with the requested page clamped into the
//! valid range.

use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Number of courses shown per page
pub const PAGE_SIZE: usize = 3;

/// A single course entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: i32,
    pub title: String,
    pub description: String,
}

impl Course {
    pub fn new(id: i32, title: &str, description: &str) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

/// The fixed course catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
}

impl Catalog {
    pub fn new(courses: Vec<Course>) -> Self {
        Self { courses }
    }

    /// The default 10-course catalog shipped with the bot
    pub fn default_catalog() -> Self {
        Self::new(vec![
            Course::new(1, "Основы Python", "Введение в программирование на Python с нуля"),
            Course::new(2, "Веб-разработка", "HTML, CSS и JavaScript для начинающих"),
            Course::new(3, "Базы данных", "SQL и проектирование реляционных баз данных"),
            Course::new(4, "Алгоритмы", "Классические алгоритмы и структуры данных"),
            Course::new(5, "Git и командная работа", "Система контроля версий и работа в команде"),
            Course::new(6, "Linux для разработчика", "Командная строка, процессы и сетевые утилиты"),
            Course::new(7, "Тестирование ПО", "Модульные и интеграционные тесты на практике"),
            Course::new(8, "Docker и контейнеры", "Сборка, запуск и оркестрация контейнеров"),
            Course::new(9, "Сетевые протоколы", "TCP/IP, HTTP и основы сетевой безопасности"),
            Course::new(10, "Машинное обучение", "Первые модели: регрессия и классификация"),
        ])
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Find a course by its id
    pub fn find(&self, id: i32) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    /// Total number of pages, never less than 1
    pub fn total_pages(&self) -> usize {
        self.courses.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Clamp a requested page into `[0, total_pages - 1]`
    pub fn clamp_page(&self, page: usize) -> usize {
        page.min(self.total_pages() - 1)
    }

    /// The courses visible on a (clamped) page, with their 1-based catalog
    /// positions
    pub fn page_items(&self, page: usize) -> impl Iterator<Item = (usize, &Course)> {
        let page = self.clamp_page(page);
        let start = page * PAGE_SIZE;
        let end = (start + PAGE_SIZE).min(self.courses.len());
        self.courses[start..end]
            .iter()
            .enumerate()
            .map(move |(offset, course)| (start + offset + 1, course))
    }

    /// Render the text body of a course page
    pub fn render_page(&self, page: usize) -> String {
        let page = self.clamp_page(page);
        let mut text = format!(
            "📚 Доступные курсы (страница {}/{}):\n\n",
            page + 1,
            self.total_pages()
        );
        for (position, course) in self.page_items(page) {
            text.push_str(&format!(
                "{}. {}\n{}\n\n",
                position, course.title, course.description
            ));
        }
        text
    }

    /// Render the detail screen for a single course
    pub fn render_course(&self, course: &Course) -> String {
        format!("📚 {}\n\n{}", course.title, course.description)
    }
}

/// Load the catalog, honoring a JSON override file.
///
/// `BOT_CATALOG_PATH` may point at a JSON array of course entries; a missing
/// or unparseable file falls back to the built-in catalog with a warning.
pub fn load_catalog() -> Catalog {
    if let Ok(path) = std::env::var("BOT_CATALOG_PATH") {
        match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<Vec<Course>>(&content) {
                Ok(courses) => {
                    let catalog = Catalog::new(courses);
                    if catalog.is_empty() {
                        warn!(path = %path, "Catalog override is empty, using built-in catalog");
                    } else {
                        info!(path = %path, count = catalog.len(), "Loaded course catalog override");
                        return catalog;
                    }
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to parse catalog override, using built-in catalog");
                }
            },
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to read catalog override, using built-in catalog");
            }
        }
    }
    Catalog::default_catalog()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_has_ten_courses() {
        let catalog = Catalog::default_catalog();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.total_pages(), 4);
    }

    #[test]
    fn test_page_clamping() {
        let catalog = Catalog::default_catalog();
        assert_eq!(catalog.clamp_page(0), 0);
        assert_eq!(catalog.clamp_page(3), 3);
        assert_eq!(catalog.clamp_page(99), 3);
    }

    #[test]
    fn test_page_items_window() {
        let catalog = Catalog::default_catalog();

        let first: Vec<usize> = catalog.page_items(0).map(|(pos, _)| pos).collect();
        assert_eq!(first, vec![1, 2, 3]);

        // Last page only holds the single remaining course
        let last: Vec<usize> = catalog.page_items(3).map(|(pos, _)| pos).collect();
        assert_eq!(last, vec![10]);
    }

    #[test]
    fn test_find_course() {
        let catalog = Catalog::default_catalog();
        assert_eq!(catalog.find(4).unwrap().title, "Алгоритмы");
        assert!(catalog.find(999).is_none());
    }

    #[test]
    fn test_render_page_header_and_entries() {
        let catalog = Catalog::default_catalog();
        let text = catalog.render_page(2);
        assert!(text.starts_with("📚 Доступные курсы (страница 3/4):"));
        assert!(text.contains("7. Тестирование ПО"));
        assert!(text.contains("9. Сетевые протоколы"));
        assert!(!text.contains("10. Машинное обучение"));
    }

    #[test]
    fn test_catalog_override_json_format() {
        let json = r#"[{"id": 1, "title": "Курс", "description": "Описание"}]"#;
        let courses: Vec<Course> = serde_json::from_str(json).unwrap();
        assert_eq!(courses[0], Course::new(1, "Курс", "Описание"));
    }

    /// Single test for every BOT_CATALOG_PATH branch; the env var is shared
    /// process state, so the cases run sequentially here
    #[test]
    fn test_catalog_override_loading_and_fallback() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        // A valid override file replaces the built-in catalog
        let mut valid = NamedTempFile::new().unwrap();
        write!(
            valid,
            r#"[{{"id": 1, "title": "Курс", "description": "Описание"}}]"#
        )
        .unwrap();
        std::env::set_var("BOT_CATALOG_PATH", valid.path());
        let catalog = load_catalog();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find(1).unwrap().title, "Курс");

        // An unparseable file falls back to the built-in catalog
        let mut garbage = NamedTempFile::new().unwrap();
        write!(garbage, "not json at all").unwrap();
        std::env::set_var("BOT_CATALOG_PATH", garbage.path());
        assert_eq!(load_catalog().len(), 10);

        // An empty course array falls back as well
        let mut empty = NamedTempFile::new().unwrap();
        write!(empty, "[]").unwrap();
        std::env::set_var("BOT_CATALOG_PATH", empty.path());
        assert_eq!(load_catalog().len(), 10);

        // A missing file falls back
        std::env::set_var("BOT_CATALOG_PATH", "/nonexistent/catalog.json");
        assert_eq!(load_catalog().len(), 10);

        // No override set: built-in catalog
        std::env::remove_var("BOT_CATALOG_PATH");
        assert_eq!(load_catalog().len(), 10);
    }

    #[test]
    fn test_empty_catalog_still_has_one_page() {
        let catalog = Catalog::new(Vec::new());
        assert_eq!(catalog.total_pages(), 1);
        assert_eq!(catalog.clamp_page(5), 0);
    }
}
