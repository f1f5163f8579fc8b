//! Optional features of the template and the edits that remove them.
//!
//! Each [`FeatureToggle`] maps to a fixed [`FeatureRules`] table. The tables
//! are data, the pruning service applies them; keeping them here lets the
//! tests assert on the rules without touching a filesystem.

use std::fmt;

use crate::domain::{error::DomainError, layout};

/// An optional capability of the generated project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureToggle {
    /// Type definitions for browser DOM APIs.
    DomTypings,
    /// Type definitions for the runtime platform (Node.js).
    RuntimeTypings,
}

impl FeatureToggle {
    pub const ALL: [Self; 2] = [Self::DomTypings, Self::RuntimeTypings];

    pub fn rules(self) -> &'static FeatureRules {
        match self {
            Self::DomTypings => &DOM_RULES,
            Self::RuntimeTypings => &RUNTIME_RULES,
        }
    }
}

impl fmt::Display for FeatureToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomTypings => f.write_str("DOM typings"),
            Self::RuntimeTypings => f.write_str("runtime typings"),
        }
    }
}

// ── Text rewrites ─────────────────────────────────────────────────────────────

/// Exact, first-occurrence substitution of a literal fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRewrite {
    pub from: &'static str,
    pub to: &'static str,
}

/// What applying a [`TextRewrite`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    Rewritten(String),
    /// The replacement is already in place.
    AlreadyApplied,
}

impl TextRewrite {
    pub const fn new(from: &'static str, to: &'static str) -> Self {
        Self { from, to }
    }

    /// Apply to `content`, which was read from `path`.
    ///
    /// Finding neither `from` nor a non-empty `to` means the template and
    /// these rules disagree; that is reported as [`DomainError::TemplateDrift`].
    pub fn apply(&self, path: &str, content: &str) -> Result<RewriteOutcome, DomainError> {
        if content.contains(self.from) {
            return Ok(RewriteOutcome::Rewritten(content.replacen(self.from, self.to, 1)));
        }
        if !self.to.is_empty() && content.contains(self.to) {
            return Ok(RewriteOutcome::AlreadyApplied);
        }
        Err(DomainError::TemplateDrift {
            path: path.into(),
            expected: self.from.into(),
        })
    }

    /// Apply in place, returning whether `content` changed.
    pub fn apply_to(&self, path: &str, content: &mut String) -> Result<bool, DomainError> {
        match self.apply(path, content)? {
            RewriteOutcome::Rewritten(next) => {
                *content = next;
                Ok(true)
            }
            RewriteOutcome::AlreadyApplied => Ok(false),
        }
    }
}

// ── Module rules ──────────────────────────────────────────────────────────────

/// A source module together with the entry-module line that exports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRule {
    /// Exact line (including newline) in the entry module.
    pub export: &'static str,
    /// Implementation module, relative to the project root.
    pub source: &'static str,
    /// Companion test module, relative to the project root.
    pub test: &'static str,
}

impl ModuleRule {
    pub const fn files(&self) -> [&'static str; 2] {
        [self.source, self.test]
    }
}

/// Everything that must go when a feature is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRules {
    pub toggle: FeatureToggle,
    /// Rewrites applied to the compiler configuration.
    pub compiler_config: &'static [TextRewrite],
    /// Modules removed from the entry module and the source tree.
    pub modules: &'static [ModuleRule],
}

impl FeatureRules {
    /// Every file this feature deletes.
    pub fn files(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.modules.iter().flat_map(ModuleRule::files)
    }
}

const HASH_BROWSER: ModuleRule = ModuleRule {
    export: "export * from './lib/hash.browser';\n",
    source: "src/lib/hash.browser.ts",
    test: "src/lib/hash.browser.spec.ts",
};

const ASYNC: ModuleRule = ModuleRule {
    export: "export * from './lib/async';\n",
    source: "src/lib/async.ts",
    test: "src/lib/async.spec.ts",
};

const HASH: ModuleRule = ModuleRule {
    export: "export * from './lib/hash';\n",
    source: "src/lib/hash.ts",
    test: "src/lib/hash.spec.ts",
};

pub static DOM_RULES: FeatureRules = FeatureRules {
    toggle: FeatureToggle::DomTypings,
    compiler_config: &[TextRewrite::new(
        r#""lib": ["es2017", "dom"]"#,
        r#""lib": ["es2017"]"#,
    )],
    modules: &[HASH_BROWSER],
};

/// The browser hash module wraps the runtime hash module, so it cannot
/// outlive it: runtime pruning removes it as well.
pub static RUNTIME_RULES: FeatureRules = FeatureRules {
    toggle: FeatureToggle::RuntimeTypings,
    compiler_config: &[TextRewrite::new(r#""types": ["node"]"#, r#""types": []"#)],
    modules: &[ASYNC, HASH, HASH_BROWSER],
};

/// Edits to the ignore file that every generated project receives.
pub const IGNORE_FILE_REWRITES: &[TextRewrite] = &[TextRewrite::new("diff\n", "")];

/// Extra ignore-file edit when the alternate package manager is chosen:
/// ignore npm's lockfile instead of yarn's.
pub const ALTERNATE_LOCKFILE_REWRITE: TextRewrite =
    TextRewrite::new("yarn.lock", layout::NPM_LOCKFILE);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_replaces_first_occurrence_only() {
        let rule = TextRewrite::new("a", "b");
        assert_eq!(
            rule.apply("f", "a a").unwrap(),
            RewriteOutcome::Rewritten("b a".into())
        );
    }

    #[test]
    fn rewrite_is_literal_not_regex() {
        let rule = TextRewrite::new("a.c", "x");
        assert!(matches!(
            rule.apply("f", "abc"),
            Err(DomainError::TemplateDrift { .. })
        ));
    }

    #[test]
    fn rewrite_detects_already_applied() {
        let rule = DOM_RULES.compiler_config[0];
        let reduced = r#"{ "lib": ["es2017"] }"#;
        assert_eq!(
            rule.apply("tsconfig.json", reduced).unwrap(),
            RewriteOutcome::AlreadyApplied
        );
    }

    #[test]
    fn rewrite_reports_drift_with_path() {
        let err = DOM_RULES.compiler_config[0]
            .apply("tsconfig.json", "{}")
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::TemplateDrift {
                path: "tsconfig.json".into(),
                expected: r#""lib": ["es2017", "dom"]"#.into(),
            }
        );
    }

    #[test]
    fn removal_rewrite_with_missing_fragment_is_drift() {
        let mut content = String::from("node_modules\n");
        assert!(IGNORE_FILE_REWRITES[0].apply_to(".gitignore", &mut content).is_err());
    }

    #[test]
    fn runtime_rules_share_the_browser_export_with_dom_rules() {
        let shared: Vec<_> = RUNTIME_RULES
            .modules
            .iter()
            .filter(|m| DOM_RULES.modules.contains(m))
            .collect();
        assert_eq!(shared.len(), 1);
        assert!(shared[0].export.contains("hash.browser"));
    }

    #[test]
    fn every_module_has_a_test_companion() {
        for toggle in FeatureToggle::ALL {
            for module in toggle.rules().modules {
                assert!(module.test.ends_with(".spec.ts"));
                assert!(module.source.starts_with("src/lib/"));
            }
        }
    }

    #[test]
    fn export_lines_do_not_match_each_other() {
        // `./lib/hash` must not be found inside `./lib/hash.browser`.
        assert!(!HASH_BROWSER.export.contains(HASH.export));
    }
}
