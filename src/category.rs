//! Category taxonomy. URL slugs resolve by exact slug, then by title substring.

use serde::{Deserialize, Serialize};

/// Slug that means "every category".
pub const ALL_CATEGORIES: &str = "all";

/// An entry in the category taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Category {
    pub fn new(slug: &str, title: &str, description: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    /// Name events carry in their `category` field ("Food & Drink Events" -> "Food & Drink").
    pub fn display_name(&self) -> &str {
        self.title.strip_suffix(" Events").unwrap_or(&self.title)
    }

    /// Case-insensitive comparison against an event's category field.
    pub fn matches(&self, event_category: &str) -> bool {
        self.display_name().to_lowercase() == event_category.to_lowercase()
    }
}

/// The category taxonomy used for slug resolution.
#[derive(Debug, Clone)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Resolve a URL slug to a category.
    ///
    /// An exact (case-insensitive) slug match wins. Otherwise the slug with
    /// hyphens turned into spaces is looked up as a substring of each title.
    /// `all` and empty slugs never resolve.
    pub fn resolve(&self, slug: &str) -> Option<&Category> {
        let slug = slug.trim().to_lowercase();
        if slug.is_empty() || slug == ALL_CATEGORIES {
            return None;
        }

        let name = slug.replace('-', " ");
        self.categories
            .iter()
            .find(|c| c.slug.to_lowercase() == slug)
            .or_else(|| {
                self.categories
                    .iter()
                    .find(|c| c.title.to_lowercase().contains(&name))
            })
    }

    /// Whether any category has this display name.
    pub fn has_display_name(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.matches(name))
    }

    /// Load the taxonomy from a JSON file, falling back to the built-in one.
    pub fn load(path: Option<&std::path::Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<Vec<Category>>(&content) {
                Ok(categories) => return Self::new(categories),
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}", path.display(), e);
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
            }
        }

        Self::default()
    }
}

impl Default for CategoryCatalog {
    fn default() -> Self {
        Self::new(vec![
            Category::new(
                "music",
                "Music Events",
                "Concerts, festivals, live performances, and musical gatherings of all genres.",
            ),
            Category::new(
                "technology",
                "Technology Events",
                "Tech conferences, hackathons, meetups, and workshops on the latest innovations.",
            ),
            Category::new(
                "food-drink",
                "Food & Drink Events",
                "Food festivals, culinary workshops, wine tastings, and gastronomic experiences.",
            ),
            Category::new(
                "arts-culture",
                "Arts & Culture Events",
                "Exhibitions, performances, cultural celebrations, and creative workshops.",
            ),
            Category::new(
                "sports-fitness",
                "Sports & Fitness Events",
                "Marathons, tournaments, fitness classes, and sporting competitions.",
            ),
            Category::new(
                "business",
                "Business Events",
                "Networking events, conferences, seminars, and professional development.",
            ),
            Category::new(
                "education",
                "Education Events",
                "Workshops, seminars, courses, and educational gatherings.",
            ),
            Category::new(
                "travel",
                "Travel Events",
                "Travel fairs, adventure meetups, cultural tours, and expedition planning.",
            ),
        ])
    }
}
