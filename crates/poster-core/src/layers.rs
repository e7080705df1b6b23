//! Per-feature geometry selection and transforms.
//!
//! A [`LayerSpec`] tells the renderer, for every drawn feature class, which
//! tagged geometries belong to it ([`TagFilter`]) and how they are shaped
//! before painting: clipped to a circle or a square, dilated, unioned.
//!
//! Tag filters are ordered lists of `(key, predicate)` entries. A table entry
//! may name the same key more than once; how those entries combine is decided
//! by an explicit [`DuplicateKeyPolicy`].

use std::collections::BTreeMap;

use poster_common::{ClipShape, FeatureClass};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

/// Dilation applied to water when rivers overflow the poster outline.
pub const RIVER_OVERFLOW_DILATION: f64 = 100.0;

/// What a tag value must satisfy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagPredicate {
    /// Key is present (`true`) or absent (`false`), any value.
    Present(bool),
    /// Exactly this value.
    Value(String),
    /// Any of these values.
    AnyOf(Vec<String>),
    /// Key is absent, or has one of these values.
    AbsentOr { absent_or: Vec<String> },
    /// Every feature, with or without the key. Serialized as `null`.
    Any,
}

impl TagPredicate {
    pub fn value(v: &str) -> Self {
        TagPredicate::Value(v.to_string())
    }

    pub fn any_of(values: &[&str]) -> Self {
        TagPredicate::AnyOf(values.iter().map(|v| v.to_string()).collect())
    }

    pub fn absent_or(values: &[&str]) -> Self {
        TagPredicate::AbsentOr {
            absent_or: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    /// `(accepts absent key, accepts any value, accepted values)`
    fn parts(&self) -> (bool, bool, Vec<String>) {
        match self {
            TagPredicate::Present(true) => (false, true, Vec::new()),
            TagPredicate::Present(false) => (true, false, Vec::new()),
            TagPredicate::Value(v) => (false, false, vec![v.clone()]),
            TagPredicate::AnyOf(values) => (false, false, values.clone()),
            TagPredicate::AbsentOr { absent_or } => (true, false, absent_or.clone()),
            TagPredicate::Any => (true, true, Vec::new()),
        }
    }

    fn from_parts(absent: bool, any_value: bool, mut values: Vec<String>) -> Self {
        match (absent, any_value) {
            (true, true) => TagPredicate::Any,
            (false, true) => TagPredicate::Present(true),
            (true, false) if values.is_empty() => TagPredicate::Present(false),
            (true, false) => TagPredicate::AbsentOr { absent_or: values },
            (false, false) if values.len() == 1 => TagPredicate::Value(values.remove(0)),
            (false, false) => TagPredicate::AnyOf(values),
        }
    }

    /// Predicate accepting everything either side accepts.
    fn union(self, other: TagPredicate) -> TagPredicate {
        let (absent, any_value, mut values) = self.parts();
        let (other_absent, other_any_value, other_values) = other.parts();
        for v in other_values {
            if !values.contains(&v) {
                values.push(v);
            }
        }
        let any_value = any_value || other_any_value;
        if any_value {
            values.clear();
        }
        TagPredicate::from_parts(absent || other_absent, any_value, values)
    }

    /// Does a feature whose tag `key` has `value` (or is missing) satisfy this?
    pub fn matches(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (TagPredicate::Any, _) => true,
            (TagPredicate::Present(present), v) => *present == v.is_some(),
            (TagPredicate::Value(expected), Some(v)) => expected == v,
            (TagPredicate::AnyOf(values), Some(v)) => values.iter().any(|e| e == v),
            (TagPredicate::AbsentOr { .. }, None) => true,
            (TagPredicate::AbsentOr { absent_or }, Some(v)) => absent_or.iter().any(|e| e == v),
            (_, None) => false,
        }
    }

    /// Overpass QL selectors for `key`, any one of which matches.
    fn overpass_selectors(&self, key: &str) -> Vec<String> {
        let absent = format!("[!\"{}\"]", key);
        let present = format!("[\"{}\"]", key);
        let values = |values: &[String]| format!("[\"{}\"~\"{}\"]", key, values.join("|"));
        match self {
            TagPredicate::Present(true) => vec![present],
            TagPredicate::Present(false) => vec![absent],
            TagPredicate::Value(v) => vec![format!("[\"{}\"=\"{}\"]", key, v)],
            TagPredicate::AnyOf(vs) => vec![values(vs)],
            TagPredicate::AbsentOr { absent_or } => vec![absent, values(absent_or)],
            TagPredicate::Any => vec![present, absent],
        }
    }
}

/// How repeated keys in a filter table entry are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeyPolicy {
    /// Accept the union of every value given for the key.
    #[default]
    Union,
    /// Keep only the last value given; the key keeps its first position.
    LastWriteWins,
}

/// Ordered `(key, predicate)` pairs with unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagFilter {
    entries: Vec<(String, TagPredicate)>,
}

impl TagFilter {
    /// Build a filter, resolving repeated keys with `policy`.
    pub fn from_entries<K, I>(entries: I, policy: DuplicateKeyPolicy) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, TagPredicate)>,
    {
        let mut filter = TagFilter::default();
        for (key, predicate) in entries {
            let key = key.into();
            match filter.entries.iter_mut().find(|(k, _)| *k == key) {
                None => filter.entries.push((key, predicate)),
                Some((_, existing)) => match policy {
                    DuplicateKeyPolicy::LastWriteWins => {
                        warn!(key = %key, discarded = ?existing, kept = ?predicate, "Duplicate tag key, keeping last value");
                        *existing = predicate;
                    }
                    DuplicateKeyPolicy::Union => {
                        let merged = std::mem::replace(existing, TagPredicate::Present(false));
                        *existing = merged.union(predicate);
                    }
                },
            }
        }
        filter
    }

    pub fn entries(&self) -> &[(String, TagPredicate)] {
        &self.entries
    }

    pub fn get(&self, key: &str) -> Option<&TagPredicate> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Does a feature with these tags belong to the class?
    ///
    /// A feature matches when any entry matches. An empty filter matches nothing.
    pub fn matches(&self, tags: &BTreeMap<String, String>) -> bool {
        self.entries
            .iter()
            .any(|(key, predicate)| predicate.matches(tags.get(key).map(String::as_str)))
    }

    /// Overpass QL selectors whose union selects what [`TagFilter::matches`] accepts.
    ///
    /// Chained brackets would mean every key must match, so each entry
    /// contributes its own selectors instead.
    pub fn overpass_selectors(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|(key, predicate)| predicate.overpass_selectors(key))
            .collect()
    }
}

impl Serialize for TagFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, predicate) in &self.entries {
            map.serialize_entry(key, predicate)?;
        }
        map.end()
    }
}

/// Fixed selection constants for one class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassFilter {
    /// Raw entries, possibly repeating keys.
    pub tags: Vec<(String, TagPredicate)>,
    pub union: bool,
    /// Stroke width per road classification.
    pub widths: Option<BTreeMap<String, f64>>,
    /// Also emit the filter as an Overpass selector.
    pub overpass: bool,
}

impl ClassFilter {
    fn new(tags: Vec<(&str, TagPredicate)>) -> Self {
        Self {
            tags: tags.into_iter().map(|(k, p)| (k.to_string(), p)).collect(),
            union: true,
            widths: None,
            overpass: false,
        }
    }
}

/// Fixed selection constants for every drawn class.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterTable {
    classes: BTreeMap<FeatureClass, ClassFilter>,
}

impl FilterTable {
    pub fn get(&self, class: FeatureClass) -> Option<&ClassFilter> {
        self.classes.get(&class)
    }

    pub fn classes(&self) -> impl Iterator<Item = FeatureClass> + '_ {
        self.classes.keys().copied()
    }

    /// Replace or add the constants for one class.
    pub fn with_class(mut self, class: FeatureClass, filter: ClassFilter) -> Self {
        self.classes.insert(class, filter);
        self
    }
}

impl Default for FilterTable {
    fn default() -> Self {
        use TagPredicate as P;

        let road_classes = [
            ("motorway", 5.0),
            ("trunk", 5.0),
            ("primary", 4.5),
            ("secondary", 4.0),
            ("tertiary", 3.5),
            ("residential", 3.0),
            ("service", 2.0),
            ("unclassified", 2.0),
            ("pedestrian", 2.0),
            ("footway", 1.0),
        ];
        let road_names: Vec<&str> = road_classes.iter().map(|(name, _)| *name).collect();

        let mut streets = ClassFilter::new(vec![("highway", P::any_of(&road_names))]);
        streets.widths = Some(
            road_classes
                .iter()
                .map(|(name, width)| (name.to_string(), *width))
                .collect(),
        );
        streets.overpass = true;

        let mut building = ClassFilter::new(vec![
            ("building", P::Present(true)),
            ("landuse", P::value("construction")),
        ]);
        building.union = false;

        let classes = BTreeMap::from([
            (FeatureClass::Perimeter, ClassFilter::new(Vec::new())),
            (FeatureClass::Streets, streets),
            (
                FeatureClass::Park,
                ClassFilter::new(vec![
                    ("leisure", P::value("park")),
                    ("landuse", P::value("golf_course")),
                    ("landuse", P::value("meadow")),
                    ("leisure", P::value("nature_reserve")),
                    ("boundary", P::value("protected_area")),
                    ("place", P::value("square")),
                    ("natural", P::value("grassland")),
                    ("landuse", P::value("military")),
                    ("amenity", P::value("hospital")),
                ]),
            ),
            (FeatureClass::Building, building),
            (
                FeatureClass::Water,
                ClassFilter::new(vec![(
                    "natural",
                    P::any_of(&["water", "bay", "river", "stream", "waterway"]),
                )]),
            ),
            (
                FeatureClass::Green,
                ClassFilter::new(vec![
                    ("landuse", P::value("grass")),
                    ("natural", P::any_of(&["island", "wood"])),
                    ("leisure", P::value("park")),
                ]),
            ),
            (
                FeatureClass::Forest,
                ClassFilter::new(vec![("landuse", P::value("forest"))]),
            ),
            (
                FeatureClass::Parking,
                ClassFilter::new(vec![
                    ("amenity", P::value("parking")),
                    ("highway", P::value("pedestrian")),
                    ("man_made", P::value("pier")),
                ]),
            ),
            (
                FeatureClass::Pedestrian,
                ClassFilter::new(vec![("area:highway", P::value("pedestrian"))]),
            ),
            (
                FeatureClass::Wetland,
                ClassFilter::new(vec![
                    ("natural", P::value("wetland")),
                    ("natural", P::value("scrub")),
                ]),
            ),
            (
                FeatureClass::Beach,
                ClassFilter::new(vec![("natural", P::value("beach"))]),
            ),
            (
                FeatureClass::Garden,
                ClassFilter::new(vec![("leisure", P::value("garden"))]),
            ),
        ]);

        Self { classes }
    }
}

/// Selection and geometry flags for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRule {
    pub tags: TagFilter,
    /// Overpass selectors to union, for classes fetched with a custom query.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_filter: Option<Vec<String>>,
    pub circle: bool,
    pub dilate: f64,
    pub union: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<BTreeMap<String, f64>>,
}

/// Layer rules for every drawn class.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LayerSpec {
    layers: BTreeMap<FeatureClass, LayerRule>,
}

impl LayerSpec {
    pub fn get(&self, class: FeatureClass) -> Option<&LayerRule> {
        self.layers.get(&class)
    }

    pub fn classes(&self) -> impl Iterator<Item = FeatureClass> + '_ {
        self.layers.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeatureClass, &LayerRule)> {
        self.layers.iter().map(|(class, rule)| (*class, rule))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Builds layer specs from a fixed filter table.
#[derive(Debug, Clone, Copy)]
pub struct LayerSpecBuilder<'a> {
    table: &'a FilterTable,
    policy: DuplicateKeyPolicy,
}

impl<'a> LayerSpecBuilder<'a> {
    pub fn new(table: &'a FilterTable) -> Self {
        Self {
            table,
            policy: DuplicateKeyPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Build the layer spec for a poster shape.
    ///
    /// With `river_overflow`, water is clipped to the opposite shape and dilated
    /// so rivers run past the poster outline.
    pub fn build(&self, shape: ClipShape, river_overflow: bool) -> LayerSpec {
        let layers = self
            .table
            .classes
            .iter()
            .map(|(&class, filter)| {
                let tags = TagFilter::from_entries(filter.tags.iter().cloned(), self.policy);
                let (clip, dilate) = if class == FeatureClass::Water && river_overflow {
                    (shape.inverted(), RIVER_OVERFLOW_DILATION)
                } else {
                    (shape, 0.0)
                };
                let rule = LayerRule {
                    custom_filter: filter.overpass.then(|| tags.overpass_selectors()),
                    tags,
                    circle: clip.is_circle(),
                    dilate,
                    union: filter.union,
                    width: filter.widths.clone(),
                };
                (class, rule)
            })
            .collect();

        debug!(shape = %shape, river_overflow, policy = ?self.policy, "Built layer spec");
        LayerSpec { layers }
    }
}
