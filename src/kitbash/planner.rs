use std::collections::HashSet;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::foundation::core::Vec3;
use crate::foundation::error::{PrimkitError, PrimkitResult};
use crate::kitbash::flatten::flatten_part;
use crate::kitbash::model::KitbashDocument;
use crate::normalize::pass::normalize;
use crate::scene::document::{from_str_lenient, read_text};
use crate::scene::model::{Color, ObjectKind, ObjectSpec, PrimitiveKind, ScenePlan, Transform};

/// Highest accepted reality factor.
pub const MAX_REALITY_FACTOR: u32 = 100;
/// Reality factor used when none is configured.
pub const DEFAULT_REALITY_FACTOR: u32 = 5;

/// Knobs for object planning, passed explicitly to every planning call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Detail dial in `[0, 100]`; 0 skips synthesis and emits a placeholder box.
    pub reality_factor: u32,
    /// Optional hard cap on parts per object.
    pub max_parts_cap: Option<u32>,
    /// Report stage timings only, suppressing per-object output.
    pub timings_only: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            reality_factor: DEFAULT_REALITY_FACTOR,
            max_parts_cap: None,
            timings_only: false,
        }
    }
}

impl PlannerConfig {
    /// Load a config file, tolerating comments.
    pub fn from_path(path: impl AsRef<Path>) -> PrimkitResult<Self> {
        from_str_lenient(&read_text(path)?)
    }

    /// The reality factor clamped into range.
    pub fn reality_factor(&self) -> u32 {
        self.reality_factor.min(MAX_REALITY_FACTOR)
    }

    /// Parts allowed per object: the reality factor in `[1, 100]`, then the cap.
    pub fn max_parts(&self) -> u32 {
        let mp = self.reality_factor.clamp(1, MAX_REALITY_FACTOR);
        match self.max_parts_cap {
            Some(cap) => mp.min(cap.max(1)),
            None => mp,
        }
    }

    /// Budget handed to a part synthesizer.
    pub fn budget(&self) -> PartBudget {
        PartBudget {
            reality_factor: self.reality_factor(),
            max_parts: self.max_parts(),
        }
    }
}

/// Size limits for one synthesis request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartBudget {
    /// Requested detail level.
    pub reality_factor: u32,
    /// Upper bound on parts per object.
    pub max_parts: u32,
}

/// An object recognized in a prompt.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedObject {
    /// Object name.
    #[serde(default)]
    pub name: String,
    /// Broad category, e.g. "boat".
    #[serde(default)]
    pub category: String,
    /// Preferred base color for every part.
    #[serde(default)]
    pub color: Option<Color>,
}

impl ExtractedObject {
    /// An object without a preferred color.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            color: None,
        }
    }
}

/// Finds the objects a prompt describes.
pub trait ObjectExtractor {
    /// Extract objects from natural language.
    fn extract(&self, prompt: &str) -> PrimkitResult<Vec<ExtractedObject>>;
}

/// Decomposes objects into primitive parts.
pub trait PartSynthesizer {
    /// Synthesize parts for `objects` within `budget`.
    fn synthesize(
        &self,
        objects: &[ExtractedObject],
        budget: PartBudget,
    ) -> PrimkitResult<KitbashDocument>;
}

/// Extractor that returns a fixed object list regardless of the prompt.
#[derive(Clone, Debug, Default)]
pub struct FixedExtractor(pub Vec<ExtractedObject>);

impl ObjectExtractor for FixedExtractor {
    fn extract(&self, _prompt: &str) -> PrimkitResult<Vec<ExtractedObject>> {
        Ok(self.0.clone())
    }
}

/// One part as presented to a user: cleaned part name and primitive display name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    /// Part name without the object prefix.
    pub name: String,
    /// Primitive display name, e.g. "Box".
    pub primitive: String,
}

impl Component {
    fn new(name: impl Into<String>, primitive: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primitive: primitive.into(),
        }
    }
}

/// A normalized single-object plan and its component list.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectSketch {
    /// Normalized plan holding only this object's parts.
    pub plan: ScenePlan,
    /// Parts in plan order.
    pub components: Vec<Component>,
}

/// Drop repeated objects, keeping the first of each.
///
/// Objects are keyed by lowercase name with a naive plural `s` removed, or by category when
/// the name is empty. Objects with neither are dropped.
pub fn dedupe_objects(objects: Vec<ExtractedObject>) -> Vec<ExtractedObject> {
    let mut seen = HashSet::new();
    objects
        .into_iter()
        .filter(|o| {
            let key = dedupe_key(o);
            !key.is_empty() && seen.insert(key)
        })
        .collect()
}

fn dedupe_key(o: &ExtractedObject) -> String {
    let mut name = o.name.trim().to_lowercase();
    if name.chars().count() > 3 && name.ends_with('s') {
        name.pop();
    }
    if name.is_empty() {
        o.category.trim().to_lowercase()
    } else {
        name
    }
}

/// Build the sketch for one object.
///
/// A reality factor of 0 yields a placeholder box without calling the synthesizer. Otherwise
/// the synthesizer is called once and each returned object contributes at most
/// [`PlannerConfig::max_parts`] parts. The object's preferred color overrides part colors.
#[tracing::instrument(skip(entry, synth, cfg), fields(name = %entry.name))]
pub fn plan_object(
    entry: &ExtractedObject,
    synth: &dyn PartSynthesizer,
    cfg: &PlannerConfig,
) -> PrimkitResult<ObjectSketch> {
    let name = display_object_name(entry);

    if cfg.reality_factor() == 0 {
        let cube = placeholder_cube(name, entry.color.unwrap_or(Color::NEUTRAL_GRAY));
        return Ok(ObjectSketch {
            plan: normalize(ScenePlan::with_objects(vec![cube]).described(format!(
                "placeholder for {name}"
            ))),
            components: vec![Component::new("Body", "Box")],
        });
    }

    let budget = cfg.budget();
    let doc = synth.synthesize(std::slice::from_ref(entry), budget)?;

    let mut objects = Vec::new();
    let mut components = Vec::new();
    for kb in &doc.objects {
        let prefix = [kb.name.trim(), entry.name.trim()]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or("Object");
        for part in kb.parts.iter().take(budget.max_parts as usize) {
            let mut obj = flatten_part(prefix, part);
            if let Some(c) = entry.color {
                obj.color = c;
            }
            components.push(Component::new(
                clean_part_name(&part.name, prefix),
                display_primitive_name(&part.kind),
            ));
            objects.push(obj);
        }
    }

    if objects.is_empty() {
        tracing::warn!("synthesis returned no parts; using a placeholder box");
        objects.push(placeholder_cube(name, Color::NEUTRAL_GRAY));
        components = vec![Component::new("Body", "Box")];
    }

    Ok(ObjectSketch {
        plan: normalize(ScenePlan::with_objects(objects).described(format!("kitbash for {name}"))),
        components,
    })
}

/// Merge every sketch's objects into one normalized plan.
pub fn combine_sketches(prompt: &str, sketches: &[ObjectSketch]) -> ScenePlan {
    let objects = sketches
        .iter()
        .flat_map(|s| s.plan.objects.iter().cloned())
        .collect();
    normalize(ScenePlan::with_objects(objects).described(format!("Iterative build for: {prompt}")))
}

/// Time spent in each planning stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageTimings {
    /// Object extraction.
    pub extract: Duration,
    /// All per-object sketches together.
    pub sketch: Duration,
}

/// Result of planning a whole prompt.
#[derive(Clone, Debug, PartialEq)]
pub struct PromptPlan {
    /// Deduplicated objects that were sketched.
    pub objects: Vec<ExtractedObject>,
    /// One sketch per object, in order.
    pub sketches: Vec<ObjectSketch>,
    /// All sketches merged.
    pub combined: ScenePlan,
    /// Stage timings.
    pub timings: StageTimings,
}

/// Extract, deduplicate and sketch every object of a prompt, then combine the sketches.
#[tracing::instrument(skip(extractor, synth, cfg))]
pub fn plan_prompt(
    prompt: &str,
    extractor: &dyn ObjectExtractor,
    synth: &dyn PartSynthesizer,
    cfg: &PlannerConfig,
) -> PrimkitResult<PromptPlan> {
    let t0 = Instant::now();
    let objects = dedupe_objects(extractor.extract(prompt)?);
    let extract = t0.elapsed();
    if objects.is_empty() {
        return Err(PrimkitError::synthesis("no objects found in prompt"));
    }

    let t1 = Instant::now();
    let sketches = objects
        .iter()
        .map(|o| plan_object(o, synth, cfg))
        .collect::<PrimkitResult<Vec<_>>>()?;
    let sketch = t1.elapsed();

    let combined = combine_sketches(prompt, &sketches);
    tracing::debug!(
        objects = objects.len(),
        parts = combined.objects.len(),
        "prompt planned"
    );
    Ok(PromptPlan {
        objects,
        sketches,
        combined,
        timings: StageTimings { extract, sketch },
    })
}

/// Display name of a primitive type: "Box" for cubes, title case otherwise, "Part" if empty.
pub fn display_primitive_name(kind: &ObjectKind) -> String {
    match kind {
        ObjectKind::Primitive(k) => k.display_name().to_string(),
        ObjectKind::Unsupported(s) => match kind.primitive() {
            Some(k) => k.display_name().to_string(),
            None if s.trim().is_empty() => "Part".to_string(),
            None => title_case(s.trim()),
        },
    }
}

/// Part name for display: object prefix removed, underscores as spaces, first letter upper.
pub fn clean_part_name(name: &str, prefix: &str) -> String {
    let mut s = name.trim();
    let head = format!("{}_", prefix.trim());
    if head.len() > 1
        && s.len() >= head.len()
        && s.is_char_boundary(head.len())
        && s[..head.len()].eq_ignore_ascii_case(&head)
    {
        s = &s[head.len()..];
    }
    let spaced = s.replace('_', " ");
    let spaced = spaced.trim();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Part".to_string(),
    }
}

/// File stem for a saved sketch: ASCII letters and digits, lowercase, or "object".
pub fn sketch_file_stem(name: &str) -> String {
    let s: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if s.is_empty() { "object".to_string() } else { s }
}

fn display_object_name(entry: &ExtractedObject) -> &str {
    Some(entry.name.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or("Object")
}

fn placeholder_cube(name: &str, color: Color) -> ObjectSpec {
    ObjectSpec::new(format!("{name}_Cube"), PrimitiveKind::Cube)
        .with_color(color)
        .with_transform(Transform::at(Vec3::new(0.0, 0.0, 0.5)))
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/kitbash/planner.rs"]
mod tests;
