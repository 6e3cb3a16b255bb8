use rustc_hash::FxHashMap;

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    /// A `[name]` segment, matching any single non-empty path segment.
    Param(String),
}

/// Parameters extracted from a location for a dynamic route. Empty for static routes.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct RouteParams(pub FxHashMap<String, String>);

impl RouteParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A navigation target, with the site base already stripped from its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: Option<String>,
    pub fragment: Option<String>,
}

impl Location {
    /// Parses a root-relative location such as `/projects?tab=1#top`.
    ///
    /// When `base` is set, it is stripped from the start of the path. A path outside of the base is kept as-is,
    /// which will simply not match any route.
    pub fn parse(raw: &str, base: Option<&str>) -> Self {
        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(fragment.to_string())),
            None => (raw, None),
        };
        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (rest, None),
        };

        let path = normalize_path(path);
        let path = match base.map(normalize_path) {
            Some(base) if base != "/" => strip_base(&path, &base).unwrap_or(path),
            _ => path,
        };

        Self {
            path,
            query: query.filter(|q| !q.is_empty()),
            fragment: fragment.filter(|f| !f.is_empty()),
        }
    }

    /// The location as it would appear in the address bar, with `base` prepended.
    pub fn href(&self, base: Option<&str>) -> String {
        let mut href = with_base(&self.path, base);
        if let Some(query) = &self.query {
            href.push('?');
            href.push_str(query);
        }
        if let Some(fragment) = &self.fragment {
            href.push('#');
            href.push_str(fragment);
        }
        href
    }
}

fn strip_base(path: &str, base: &str) -> Option<String> {
    let rest = path.strip_prefix(base)?;
    if rest.is_empty() {
        Some("/".to_string())
    } else if rest.starts_with('/') {
        Some(rest.to_string())
    } else {
        // `/matsu.fi-old` is not under `/matsu.fi`
        None
    }
}

/// Collapses repeated slashes, ensures a leading slash and drops the trailing one (except for the root).
pub fn normalize_path(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", parts.join("/"))
}

/// Prepends the site base to a root-relative path.
pub fn with_base(path: &str, base: Option<&str>) -> String {
    match base.map(normalize_path) {
        Some(base) if base != "/" => {
            if path == "/" {
                format!("{}/", base)
            } else {
                format!("{}{}", base, normalize_path(path))
            }
        }
        _ => path.to_string(),
    }
}

pub fn parse_pattern(raw_route: &str) -> Vec<Segment> {
    raw_route
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            match segment
                .strip_prefix('[')
                .and_then(|inner| inner.strip_suffix(']'))
            {
                Some(key) if !key.is_empty() => Segment::Param(key.to_string()),
                _ => Segment::Static(segment.replace("\\[", "[").replace("\\]", "]")),
            }
        })
        .collect()
}

pub fn is_dynamic(pattern: &[Segment]) -> bool {
    pattern.iter().any(|s| matches!(s, Segment::Param(_)))
}

/// Matches a normalized path against a dynamic pattern, returning the extracted parameters.
pub fn match_pattern(pattern: &[Segment], path: &str) -> Option<RouteParams> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() != pattern.len() {
        return None;
    }

    let mut params = FxHashMap::default();
    for (expected, actual) in pattern.iter().zip(segments) {
        match expected {
            Segment::Static(value) if value == actual => {}
            Segment::Static(_) => return None,
            Segment::Param(key) => {
                params.insert(key.clone(), decode_segment(actual));
            }
        }
    }

    Some(RouteParams(params))
}

/// Percent-decodes a path segment. Segments that do not decode to UTF-8 are kept as-is.
fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

/// The normalized pattern, used to compare routes with each other.
///
/// Brackets in static segments are escaped again so that `\[year\]` and `[year]` keep distinct keys.
pub fn pattern_key(pattern: &[Segment]) -> String {
    let parts: Vec<String> = pattern
        .iter()
        .map(|s| match s {
            Segment::Static(value) => value.replace('[', "\\[").replace(']', "\\]"),
            Segment::Param(key) => format!("[{}]", key),
        })
        .collect();
    format!("/{}", parts.join("/"))
}
