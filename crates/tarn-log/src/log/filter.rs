use core::str::FromStr;

use compact_str::CompactString;

use rustc_hash::FxHashMap;

use super::Level;

/// Per-target maximum levels.
///
/// Parsed from a comma-separated list of `level` and `target=level`
/// entries, the format of `RUST_LOG`. A target applies to itself and to
/// every module below it.
#[derive(Clone, Debug)]
pub struct Filters {
    target_levels: FxHashMap<CompactString, Level>,
    base_level: Level,
}

impl Default for Filters {

    fn default() -> Self {
        Self {
            target_levels: FxHashMap::default(),
            base_level: Level::Error,
        }
    }
}

impl Filters {

    pub fn parse(spec: &str) -> Self {
        let mut filters = Self::default();
        for arg in spec.split(',') {
            let (target, level) = match arg.find('=') {
                Some(i) => (Some(arg[..i].trim()), arg[i + 1..].trim()),
                None => (None, arg.trim()),
            };
            // unknown levels are skipped
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            if let Some(target) = target {
                let entry = filters.target_levels
                    .entry(CompactString::new(target))
                    .or_insert(level);
                *entry = (*entry).min(level);
            }
            else {
                filters.base_level = level;
            }
        }
        filters
    }

    pub fn from_env() -> Self {
        std::env::var("RUST_LOG")
            .map(|spec| Self::parse(&spec))
            .unwrap_or_default()
    }

    pub fn base_level(&self) -> Level {
        self.base_level
    }

    /// Most verbose level enabled for `target`.
    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        self.base_level
    }

    #[inline(always)]
    pub fn enabled(&self, target: &str, level: Level) -> bool {
        level <= self.target_level(target)
    }
}
