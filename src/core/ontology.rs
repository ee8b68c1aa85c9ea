//! Domain → ontology term mapping loaded from a `pfam2go`-style file.

use crate::utils::error::{AnnotatorError, Result};
use crate::utils::text::for_each_lossy_line;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use std::path::Path;
use std::sync::LazyLock;

const COMMENT_MARKER: char = '!';

static DOMAIN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Pfam:(\w+)").expect("domain pattern is valid"));
static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GO:(\d+)").expect("term pattern is valid"));

static EMPTY_TERMS: BTreeSet<String> = BTreeSet::new();

/// Read-only mapping shared by all workers.
#[derive(Debug, Clone, Default)]
pub struct OntologyMap {
    terms: HashMap<String, BTreeSet<String>>,
}

impl OntologyMap {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |source| AnnotatorError::OntologySourceUnreadable {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path).map_err(unreadable)?;
        let map = Self::from_reader(std::io::BufReader::new(file)).map_err(unreadable)?;
        tracing::debug!(
            "Loaded ontology terms for {} domains from {}",
            map.len(),
            path.display()
        );
        Ok(map)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut builder = OntologyMapBuilder::new();
        for_each_lossy_line(reader, |line| builder.ingest_line(line))?;
        Ok(builder.build())
    }

    /// Terms for `domain_id`; unknown ids yield an empty set.
    pub fn lookup(&self, domain_id: &str) -> &BTreeSet<String> {
        self.terms.get(domain_id).unwrap_or(&EMPTY_TERMS)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct OntologyMapBuilder {
    terms: HashMap<String, BTreeSet<String>>,
}

impl OntologyMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<I, S>(&mut self, domain_id: &str, terms: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.terms
            .entry(domain_id.to_string())
            .or_default()
            .extend(terms.into_iter().map(Into::into));
        self
    }

    /// Merges one mapping-file line. Comments and lines missing either a
    /// domain token or any term token are ignored.
    pub fn ingest_line(&mut self, line: &str) {
        if line.starts_with(COMMENT_MARKER) {
            return;
        }
        let Some(domain) = DOMAIN_PATTERN.captures(line).map(|c| c[1].to_string()) else {
            return;
        };
        let terms: Vec<String> = TERM_PATTERN
            .captures_iter(line)
            .map(|c| format!("GO:{}", &c[1]))
            .collect();
        if terms.is_empty() {
            return;
        }
        self.insert(&domain, terms);
    }

    pub fn build(self) -> OntologyMap {
        OntologyMap { terms: self.terms }
    }
}
