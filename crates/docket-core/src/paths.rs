use crate::error::DocketError;
use regex::Regex;

/// Pattern used when a docket lists no base paths.
pub const MATCH_ALL: &str = "/**";

/// Ant-style path glob.
///
/// `?` matches one character and `*` any run of characters within a
/// segment, `**` any number of segments, `{name}` exactly one non-empty
/// segment.
#[derive(Debug, Clone)]
pub struct AntPattern {
    source: String,
    regex: Regex,
}

impl AntPattern {
    pub fn new(pattern: &str) -> Result<Self, DocketError> {
        let regex = Regex::new(&ant_to_regex(pattern)).map_err(|source| {
            DocketError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }
}

fn ant_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("/**") {
            if tail.is_empty() || tail.starts_with('/') {
                out.push_str("(?:/.*)?");
                rest = tail;
                continue;
            }
        }
        if out.len() == 1 {
            if let Some(tail) = rest.strip_prefix("**/") {
                out.push_str("(?:.*/)?");
                rest = tail;
                continue;
            }
        }
        if let Some(tail) = rest.strip_prefix("**") {
            out.push_str(".*");
            rest = tail;
            continue;
        }

        match c {
            '*' => out.push_str("[^/]*"),
            '?' => out.push_str("[^/]"),
            '{' => {
                if let Some(end) = rest.find('}') {
                    out.push_str("[^/]+");
                    rest = &rest[end + 1..];
                    continue;
                }
                out.push_str(&regex::escape("{"));
            }
            other => out.push_str(&regex::escape(other.encode_utf8(&mut [0; 4]))),
        }
        rest = &rest[c.len_utf8()..];
    }

    out.push('$');
    out
}

/// `OR(base paths) AND NOT OR(exclude paths)`.
#[derive(Debug, Clone)]
pub struct PathSelector {
    include: Vec<AntPattern>,
    exclude: Vec<AntPattern>,
}

impl PathSelector {
    /// An empty `base_path` list includes every path.
    pub fn new(base_path: &[String], exclude_path: &[String]) -> Result<Self, DocketError> {
        let include = if base_path.is_empty() {
            vec![AntPattern::new(MATCH_ALL)?]
        } else {
            compile_all(base_path)?
        };

        Ok(Self {
            include,
            exclude: compile_all(exclude_path)?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.include.iter().any(|p| p.matches(path)) && !self.exclude.iter().any(|p| p.matches(path))
    }

    pub fn include_patterns(&self) -> impl Iterator<Item = &str> {
        self.include.iter().map(AntPattern::as_str)
    }

    pub fn exclude_patterns(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(AntPattern::as_str)
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<AntPattern>, DocketError> {
    patterns.iter().map(|p| AntPattern::new(p)).collect()
}
