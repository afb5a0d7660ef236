//! Home page composition.
//!
//! Loads the six section documents behind the index route and extracts the
//! fields the template consumes, applying a fallback to each one.

use serde_yaml::Value;

use crate::content::{ContentError, ContentStore};
use crate::renderer::PageContext;

/// Fallback heading for the work section.
pub const DEFAULT_WORK_HEADING: &str = "MY WORK";
/// Fallback heading for the shows section.
pub const DEFAULT_SHOWS_HEADING: &str = "UPCOMING SHOWS";
/// Fallback heading for the testimonials section.
pub const DEFAULT_TESTIMONIALS_HEADING: &str = "TESTIMONIALS";

/// Template variables for the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct HomePage {
    pub hero: Value,
    pub about: Value,
    pub work: Vec<Value>,
    pub work_heading: String,
    pub shows: Vec<Value>,
    pub shows_heading: String,
    pub countdown_target: String,
    pub countdown_venue: String,
    pub testimonials: Vec<Value>,
    pub testimonials_heading: String,
    pub contact: Value,
}

impl HomePage {
    /// Load every home page section from `store`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContentError`] hit; no partial page is built.
    pub fn compose(store: &ContentStore) -> Result<Self, ContentError> {
        let hero = store.load_section("hero")?;
        let about = store.load_section("about")?;
        let work = store.load_section("work")?;
        let shows = store.load_section("shows")?;
        let testimonials = store.load_section("testimonials")?;
        let contact = store.load_section("contact")?;

        Ok(Self {
            work: work.list_or_empty("videos"),
            work_heading: work.text_or("heading", DEFAULT_WORK_HEADING),
            shows: shows.list_or_empty("shows"),
            shows_heading: shows.text_or("heading", DEFAULT_SHOWS_HEADING),
            countdown_target: shows.text_or("countdown_target", ""),
            countdown_venue: shows.text_or("countdown_venue", ""),
            testimonials: testimonials.list_or_empty("testimonials"),
            testimonials_heading: testimonials.text_or("heading", DEFAULT_TESTIMONIALS_HEADING),
            hero: hero.into_value(),
            about: about.into_value(),
            contact: contact.into_value(),
        })
    }

    /// Convert into named template variables.
    #[must_use]
    pub fn into_context(self) -> PageContext {
        let mut ctx = PageContext::new();
        ctx.insert("hero", &self.hero);
        ctx.insert("about", &self.about);
        ctx.insert("work", &self.work);
        ctx.insert("work_heading", &self.work_heading);
        ctx.insert("shows", &self.shows);
        ctx.insert("shows_heading", &self.shows_heading);
        ctx.insert("countdown_target", &self.countdown_target);
        ctx.insert("countdown_venue", &self.countdown_venue);
        ctx.insert("testimonials", &self.testimonials);
        ctx.insert("testimonials_heading", &self.testimonials_heading);
        ctx.insert("contact", &self.contact);
        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SECTIONS: [&str; 6] = ["hero", "about", "work", "shows", "testimonials", "contact"];

    fn store_with(overrides: &[(&str, &str)]) -> (tempfile::TempDir, ContentStore) {
        let temp = tempfile::tempdir().unwrap();
        for name in SECTIONS {
            std::fs::write(temp.path().join(format!("{name}.yml")), "{}\n").unwrap();
        }
        for (name, content) in overrides {
            std::fs::write(temp.path().join(format!("{name}.yml")), content).unwrap();
        }
        let store = ContentStore::new(temp.path());
        (temp, store)
    }

    #[test]
    fn test_compose_defaults() {
        let (_temp, store) = store_with(&[]);

        let page = HomePage::compose(&store).unwrap();

        assert!(page.work.is_empty());
        assert_eq!(page.work_heading, DEFAULT_WORK_HEADING);
        assert!(page.shows.is_empty());
        assert_eq!(page.shows_heading, DEFAULT_SHOWS_HEADING);
        assert_eq!(page.countdown_target, "");
        assert_eq!(page.countdown_venue, "");
        assert!(page.testimonials.is_empty());
        assert_eq!(page.testimonials_heading, DEFAULT_TESTIMONIALS_HEADING);
    }

    #[test]
    fn test_compose_reads_fields() {
        let (_temp, store) = store_with(&[
            ("work", "heading: Clips\nvideos:\n  - id: abc\n  - id: def\n"),
            (
                "shows",
                "heading: Tour\ncountdown_target: '2026-12-31T20:00:00'\ncountdown_venue: Apollo\nshows:\n  - city: Leeds\n",
            ),
            ("testimonials", "heading: Praise\ntestimonials:\n  - quote: Great\n"),
            ("hero", "name: Jane\n"),
        ]);

        let page = HomePage::compose(&store).unwrap();

        assert_eq!(page.work_heading, "Clips");
        assert_eq!(page.work.len(), 2);
        assert_eq!(page.shows_heading, "Tour");
        assert_eq!(page.countdown_target, "2026-12-31T20:00:00");
        assert_eq!(page.countdown_venue, "Apollo");
        assert_eq!(page.shows.len(), 1);
        assert_eq!(page.testimonials_heading, "Praise");
        assert_eq!(page.testimonials.len(), 1);
        assert_eq!(page.hero["name"], Value::from("Jane"));
    }

    #[test]
    fn test_compose_missing_section_fails() {
        let (temp, store) = store_with(&[]);
        std::fs::remove_file(temp.path().join("contact.yml")).unwrap();

        let err = HomePage::compose(&store).unwrap_err();

        assert!(matches!(err, ContentError::NotFound { section, .. } if section == "contact"));
    }

    #[test]
    fn test_into_context_has_all_variables() {
        let (_temp, store) = store_with(&[]);
        let ctx = HomePage::compose(&store).unwrap().into_context();

        let mut keys: Vec<&str> = ctx.keys().collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "about",
                "contact",
                "countdown_target",
                "countdown_venue",
                "hero",
                "shows",
                "shows_heading",
                "testimonials",
                "testimonials_heading",
                "work",
                "work_heading",
            ]
        );
    }
}
