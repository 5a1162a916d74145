//! In-memory registry over the extractor's output.
//!
//! The series service loads the emitted JSON files at startup and
//! answers lookups by work id, series title, and universe title.  This
//! module is that consumer: it accepts the framed stream verbatim,
//! including the dangling comma, and builds the linked registries in
//! three passes -- universes, then series, then works.
use std::collections::HashMap;
use std::collections::HashSet;

use json::JsonValue;

/// One work and its place within a series and universe.
#[derive(Debug)]
pub struct Work {
    work_id: String,
    series_title: Option<String>,
    number_in_series: Vec<String>,
    number_in_universe: Option<String>,
    read_first: bool,
    can_be_read_independently: bool,
    universe_title: Option<String>,
}

impl Work {
    pub fn work_id(&self) -> &str {
        &self.work_id
    }
    pub fn series_title(&self) -> Option<&str> {
        self.series_title.as_deref()
    }
    pub fn number_in_series(&self) -> &[String] {
        &self.number_in_series
    }
    pub fn number_in_universe(&self) -> Option<&str> {
        self.number_in_universe.as_deref()
    }
    pub fn read_first(&self) -> bool {
        self.read_first
    }
    pub fn can_be_read_independently(&self) -> bool {
        self.can_be_read_independently
    }
    pub fn universe_title(&self) -> Option<&str> {
        self.universe_title.as_deref()
    }
}

/// A series and the works known to belong to it.
#[derive(Debug)]
pub struct Series {
    title: String,
    description: Option<String>,
    alternative_titles: Vec<String>,
    universe_title: Option<String>,
    included_works: HashSet<String>,
}

impl Series {
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn alternative_titles(&self) -> &[String] {
        &self.alternative_titles
    }
    pub fn universe_title(&self) -> Option<&str> {
        self.universe_title.as_deref()
    }
    pub fn included_works(&self) -> &HashSet<String> {
        &self.included_works
    }
}

/// A universe with its member series and works.
#[derive(Debug)]
pub struct Universe {
    title: String,
    description: Option<String>,
    alternative_title: Option<String>,
    included_series: HashSet<String>,
    included_works: HashSet<String>,
}

impl Universe {
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    pub fn alternative_title(&self) -> Option<&str> {
        self.alternative_title.as_deref()
    }
    pub fn included_series(&self) -> &HashSet<String> {
        &self.included_series
    }
    pub fn included_works(&self) -> &HashSet<String> {
        &self.included_works
    }
}

#[derive(Debug, Default)]
pub struct SeriesRegistry {
    works: HashMap<String, Work>,
    series: HashMap<String, Series>,
    universes: HashMap<String, Universe>,
}

impl SeriesRegistry {
    /// Build a registry from one framed output run.
    ///
    /// The first occurrence of a work id, series title, or universe
    /// title wins; later occurrences only contribute membership links.
    pub fn from_output(text: &str) -> Result<Self, String> {
        let objects = parse_output(text)?;
        let mut registry = SeriesRegistry::default();

        log::debug!("Reading universes from {} objects", objects.len());
        for obj in &objects {
            registry.add_universe(obj);
        }

        log::debug!("Reading series");
        for obj in &objects {
            registry.add_series(obj);
        }

        log::debug!("Reading works");
        for obj in &objects {
            registry.add_work(obj);
        }

        Ok(registry)
    }

    pub fn work(&self, work_id: &str) -> Option<&Work> {
        self.works.get(work_id)
    }
    pub fn series(&self, title: &str) -> Option<&Series> {
        self.series.get(title)
    }
    pub fn universe(&self, title: &str) -> Option<&Universe> {
        self.universes.get(title)
    }
    pub fn work_count(&self) -> usize {
        self.works.len()
    }
    pub fn series_count(&self) -> usize {
        self.series.len()
    }
    pub fn universe_count(&self) -> usize {
        self.universes.len()
    }

    fn add_universe(&mut self, obj: &JsonValue) {
        let Some(title) = str_key(obj, "universeTitle") else {
            return;
        };

        if self.universes.contains_key(&title) {
            return;
        }

        let universe = Universe {
            title: title.clone(),
            description: str_key(obj, "universeDescription"),
            alternative_title: str_key(obj, "universeAlternativeTitle"),
            included_series: HashSet::new(),
            included_works: HashSet::new(),
        };

        self.universes.insert(title, universe);
    }

    fn add_series(&mut self, obj: &JsonValue) {
        let Some(title) = str_key(obj, "seriesTitle") else {
            return;
        };

        let universe_title = str_key(obj, "universeTitle");

        if let Some(ut) = &universe_title {
            if let Some(universe) = self.universes.get_mut(ut) {
                universe.included_series.insert(title.clone());
            }
        }

        if self.series.contains_key(&title) {
            return;
        }

        let series = Series {
            title: title.clone(),
            description: str_key(obj, "seriesDescription"),
            alternative_titles: arr_key(obj, "seriesAlternativeTitle"),
            universe_title,
            included_works: HashSet::new(),
        };

        self.series.insert(title, series);
    }

    fn add_work(&mut self, obj: &JsonValue) {
        let Some(work_id) = str_key(obj, "workId") else {
            return;
        };

        let series_title = str_key(obj, "seriesTitle");
        let universe_title = str_key(obj, "universeTitle");

        if let Some(st) = &series_title {
            if let Some(series) = self.series.get_mut(st) {
                series.included_works.insert(work_id.clone());
            }
        }

        if let Some(ut) = &universe_title {
            if let Some(universe) = self.universes.get_mut(ut) {
                universe.included_works.insert(work_id.clone());
            }
        }

        if self.works.contains_key(&work_id) {
            return;
        }

        let work = Work {
            work_id: work_id.clone(),
            series_title,
            number_in_series: arr_key(obj, "numberInSeries"),
            number_in_universe: str_key(obj, "numberInUniverse"),
            read_first: obj["readFirst"].as_bool().unwrap_or(false),
            can_be_read_independently: obj["canBeReadIndependently"].as_bool().unwrap_or(false),
            universe_title,
        };

        self.works.insert(work_id, work);
    }
}

/// Unwrap the bracket framing and hand the interior to the JSON
/// parser, dropping the dangling comma a non-empty run leaves behind.
fn parse_output(text: &str) -> Result<Vec<JsonValue>, String> {
    let trimmed = text.trim();

    let interior = trimmed
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .ok_or_else(|| "Series output is not bracket framed".to_string())?
        .trim();

    let interior = interior.strip_suffix(',').unwrap_or(interior);

    let parsed = json::parse(&format!("[{interior}]"))
        .map_err(|e| format!("Cannot parse series output: {e}"))?;

    match parsed {
        JsonValue::Array(list) => Ok(list),
        _ => Err("Series output is not a list of objects".to_string()),
    }
}

fn str_key(obj: &JsonValue, key: &str) -> Option<String> {
    obj[key].as_str().map(str::to_owned)
}

fn arr_key(obj: &JsonValue, key: &str) -> Vec<String> {
    obj[key]
        .members()
        .filter_map(|v| v.as_str())
        .map(str::to_owned)
        .collect()
}
