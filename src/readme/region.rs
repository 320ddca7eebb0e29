use thiserror::Error;

/// Classic leaderboard heading, also the start marker of its region
pub const CLASSIC_START: &str = "## 🏆 Top 10 Leaderboard";
pub const CLASSIC_END: &str = "<!-- END_CLASSIC_LEADERBOARD -->";
pub const PACKAGE_START: &str = "## 🚀 Package Challenges Leaderboard";
pub const PACKAGE_END: &str = "<!-- END_PACKAGE_LEADERBOARD -->";

pub const CLASSIC_REGION: &str = "classic";
pub const PACKAGE_REGION: &str = "packages";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("Could not find insertion point for region '{region}' (tried: {tried})")]
    NoInsertionPoint { region: String, tried: String },

    #[error("Unknown managed region '{0}'")]
    UnknownRegion(String),
}

/// Where a region goes when its start marker is missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    /// Insert right before the marker
    Before(String),
    /// Insert after the line containing the marker
    AfterLine(String),
}

impl Anchor {
    fn marker(&self) -> &str {
        match self {
            Anchor::Before(m) | Anchor::AfterLine(m) => m,
        }
    }

    /// Byte offset to insert at, if the marker is present
    fn position(&self, document: &str) -> Option<usize> {
        match self {
            Anchor::Before(marker) => document.find(marker.as_str()),
            Anchor::AfterLine(marker) => document
                .find(marker.as_str())
                .map(|pos| line_end(document, pos)),
        }
    }
}

/// A marker-delimited span of a document owned by the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedRegion {
    pub name: String,
    pub start: String,
    pub end: String,
    /// Replace through the end of the end marker's line, rather than
    /// stopping right before the end marker
    pub end_inclusive: bool,
    /// Tried in order when the start marker is missing
    pub insert: Vec<Anchor>,
    /// Tried in order when the start marker exists but the end marker does not
    pub next_sections: Vec<String>,
}

/// Offset just past the newline ending the line that contains `pos`,
/// or the document length for the last line
fn line_end(document: &str, pos: usize) -> usize {
    document[pos..]
        .find('\n')
        .map_or(document.len(), |nl| pos + nl + 1)
}

/// Body with exactly one trailing newline
fn normalize_body(body: &str) -> String {
    let mut body = body.trim_end_matches('\n').to_string();
    body.push('\n');
    body
}

impl ManagedRegion {
    /// Byte range currently covered by the region, if its start marker exists
    fn span(&self, document: &str) -> Option<(usize, usize)> {
        let start = document.find(self.start.as_str())?;
        let search_from = start + self.start.len();

        let end = match document[search_from..].find(self.end.as_str()) {
            Some(offset) => {
                let end_pos = search_from + offset;
                if self.end_inclusive {
                    line_end(document, end_pos)
                } else {
                    end_pos
                }
            }
            None => self
                .next_sections
                .iter()
                .find_map(|marker| document[search_from..].find(marker.as_str()))
                .map_or(document.len(), |offset| search_from + offset),
        };

        Some((start, end))
    }

    /// Replace the region in `document` with `body`, or insert it at the
    /// first available anchor when the region does not exist yet.
    ///
    /// Splicing the same body twice gives the same document.
    pub fn splice(&self, document: &str, body: &str) -> Result<String, SpliceError> {
        let body = normalize_body(body);

        if let Some((start, end)) = self.span(document) {
            let mut out = String::with_capacity(document.len() + body.len());
            out.push_str(&document[..start]);
            out.push_str(&body);
            out.push_str(&document[end..]);
            return Ok(out);
        }

        let position = self
            .insert
            .iter()
            .find_map(|anchor| anchor.position(document))
            .ok_or_else(|| SpliceError::NoInsertionPoint {
                region: self.name.clone(),
                tried: self
                    .insert
                    .iter()
                    .map(|a| format!("'{}'", a.marker()))
                    .collect::<Vec<_>>()
                    .join(", "),
            })?;

        let mut out = String::with_capacity(document.len() + body.len() + 2);
        out.push_str(&document[..position]);
        // The body must start on its own line
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&body);
        out.push('\n');
        out.push_str(&document[position..]);
        Ok(out)
    }
}

/// Named managed regions of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionRegistry {
    regions: Vec<ManagedRegion>,
}

impl RegionRegistry {
    pub fn new(regions: Vec<ManagedRegion>) -> Self {
        Self { regions }
    }

    pub fn get(&self, name: &str) -> Option<&ManagedRegion> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Splice `body` into the named region of `document`
    pub fn apply(&self, document: &str, name: &str, body: &str) -> Result<String, SpliceError> {
        let region = self
            .get(name)
            .ok_or_else(|| SpliceError::UnknownRegion(name.to_string()))?;
        region.splice(document, body)
    }
}

impl Default for RegionRegistry {
    /// The classic and package leaderboard regions of the root README
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self::new(vec![
            ManagedRegion {
                name: CLASSIC_REGION.to_string(),
                start: CLASSIC_START.to_string(),
                end: CLASSIC_END.to_string(),
                end_inclusive: true,
                insert: vec![
                    Anchor::Before("## 🌟 Key Features".to_string()),
                    Anchor::Before("## Key Features".to_string()),
                ],
                next_sections: strings(&[
                    PACKAGE_START,
                    "## 🌟 Key Features",
                    "## Key Features",
                    "## Getting Started",
                    "## Challenge Categories",
                ]),
            },
            ManagedRegion {
                name: PACKAGE_REGION.to_string(),
                start: PACKAGE_START.to_string(),
                end: PACKAGE_END.to_string(),
                end_inclusive: true,
                insert: vec![
                    Anchor::AfterLine(CLASSIC_END.to_string()),
                    Anchor::Before("## Key Features".to_string()),
                    Anchor::Before("## 🌟 Key Features".to_string()),
                ],
                next_sections: strings(&[
                    "## Key Features",
                    "## 🌟 Key Features",
                    "## Getting Started",
                    "## Challenge Categories",
                ]),
            },
        ])
    }
}
