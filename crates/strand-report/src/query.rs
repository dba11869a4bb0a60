use std::fmt;

use strand_core::ReportError;

/// First level of the query grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Fibers.
    Fiber,
    /// Beads.
    Bead,
    /// Solids.
    Solid,
    /// Spatial boundaries.
    Space,
    /// Spheres.
    Sphere,
    /// Singles.
    Single,
    /// Couples.
    Couple,
    /// Organizers.
    Organizer,
    /// Simulated time.
    Time,
    /// Configuration records.
    Parameters,
    /// Free-form report.
    Custom,
}

impl Category {
    /// Every category in grammar order.
    pub const ALL: [Category; 11] = [
        Category::Fiber,
        Category::Bead,
        Category::Solid,
        Category::Space,
        Category::Sphere,
        Category::Single,
        Category::Couple,
        Category::Organizer,
        Category::Time,
        Category::Parameters,
        Category::Custom,
    ];

    /// Query token of the category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Fiber => "fiber",
            Category::Bead => "bead",
            Category::Solid => "solid",
            Category::Space => "space",
            Category::Sphere => "sphere",
            Category::Single => "single",
            Category::Couple => "couple",
            Category::Organizer => "organizer",
            Category::Time => "time",
            Category::Parameters => "parameters",
            Category::Custom => "custom",
        }
    }

    /// Position in [`Category::ALL`].
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Case-sensitive lookup of a category token.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == token)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed `category[:subcategory]` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Category before the first `:`.
    pub category: Category,
    /// Everything after the first `:`, empty when absent.
    pub subcategory: String,
}

impl Query {
    /// Splits `raw` once on the first `:` and resolves the category.
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        let (category, subcategory) = raw.split_once(':').unwrap_or((raw, ""));
        let allowed: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
        let category = Category::from_token(category)
            .ok_or_else(|| ReportError::unknown_category(category, &allowed))?;
        Ok(Self {
            category,
            subcategory: subcategory.to_string(),
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subcategory.is_empty() {
            write!(f, "{}", self.category)
        } else {
            write!(f, "{}:{}", self.category, self.subcategory)
        }
    }
}
