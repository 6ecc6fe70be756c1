//! Technology currency signals from snippet text.
//!
//! Two static, ordered term tables are scanned with a literal, case-sensitive
//! substring test. Terms may embed their own boundary characters (`"var "`
//! needs the trailing space so identifiers like `variable` do not match).

use serde::Serialize;

use self::Severity::{Danger, Info, Risk};

/// Urgency of a legacy technology finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Danger,
    Risk,
    Info,
}

impl Severity {
    /// Sort rank, lowest is most urgent.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Danger => 0,
            Severity::Risk => 1,
            Severity::Info => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Danger => "danger",
            Severity::Risk => "risk",
            Severity::Info => "info",
        }
    }
}

/// A single entry of a term table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TechPattern {
    pub term: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

impl TechPattern {
    const fn legacy(term: &'static str, label: &'static str, severity: Severity) -> Self {
        Self {
            term,
            label,
            severity: Some(severity),
        }
    }

    const fn modern(term: &'static str, label: &'static str) -> Self {
        Self {
            term,
            label,
            severity: None,
        }
    }

    /// Literal substring test against `text`.
    pub fn matches(&self, text: &str) -> bool {
        text.contains(self.term)
    }

    /// Severity rank, with unranked patterns sorting last.
    fn rank(&self) -> u8 {
        self.severity.map(|s| s.rank()).unwrap_or(u8::MAX)
    }
}

/// A table entry matched against some text.
pub type TechFinding = &'static TechPattern;

/// Signatures of legacy or deprecated technology.
pub static LEGACY_PATTERNS: &[TechPattern] = &[
    TechPattern::legacy("var ", "ES5 (Pre-2015)", Risk),
    TechPattern::legacy("mysql_connect", "PHP 5 (Insecure)", Danger),
    TechPattern::legacy("mysql_query", "PHP 5 (Insecure)", Danger),
    TechPattern::legacy("Python 2", "EOL", Risk),
    TechPattern::legacy("python2", "EOL", Risk),
    TechPattern::legacy("React.createClass", "React Legacy", Risk),
    TechPattern::legacy("componentWillMount", "React Deprecated", Danger),
    TechPattern::legacy("componentWillReceiveProps", "React Deprecated", Danger),
    TechPattern::legacy("componentWillUpdate", "React Deprecated", Danger),
    TechPattern::legacy("AngularJS", "Angular 1.x", Risk),
    TechPattern::legacy("angular.module", "Angular 1.x", Risk),
    TechPattern::legacy("get_magic_quotes", "PHP Deprecated", Risk),
    TechPattern::legacy("cv2.cv.", "OpenCV 2", Risk),
    TechPattern::legacy("javax.servlet", "Java EE (Old)", Info),
    TechPattern::legacy("jQuery", "jQuery", Info),
    TechPattern::legacy("$.ajax", "jQuery", Info),
    TechPattern::legacy("require(", "CommonJS", Info),
    TechPattern::legacy("module.exports", "CommonJS", Info),
    TechPattern::legacy("XMLHttpRequest", "Pre-Fetch API", Info),
    TechPattern::legacy("document.write", "Legacy DOM", Risk),
    TechPattern::legacy("innerHTML =", "XSS Risk", Risk),
    TechPattern::legacy("eval(", "Security Risk", Danger),
    TechPattern::legacy("with (", "Deprecated JS", Risk),
    TechPattern::legacy("__proto__", "Deprecated", Risk),
    TechPattern::legacy("arguments.callee", "Deprecated", Risk),
    TechPattern::legacy("escape(", "Deprecated", Info),
    TechPattern::legacy("unescape(", "Deprecated", Info),
];

/// Signatures of current technology. Unranked.
pub static MODERN_PATTERNS: &[TechPattern] = &[
    TechPattern::modern("useState", "React Hooks"),
    TechPattern::modern("useEffect", "React Hooks"),
    TechPattern::modern("useContext", "React Hooks"),
    TechPattern::modern("useReducer", "React Hooks"),
    TechPattern::modern("async/await", "Modern JS"),
    TechPattern::modern("async ", "Modern JS"),
    TechPattern::modern("await ", "Modern JS"),
    TechPattern::modern("const ", "ES6+"),
    TechPattern::modern("let ", "ES6+"),
    TechPattern::modern("import ", "ES Modules"),
    TechPattern::modern("export ", "ES Modules"),
    TechPattern::modern("fetch(", "Fetch API"),
    TechPattern::modern("Promise", "Modern JS"),
    TechPattern::modern("arrow function", "ES6+"),
    TechPattern::modern("=>", "ES6+"),
    TechPattern::modern("TypeScript", "TypeScript"),
    TechPattern::modern("Deno", "Modern Runtime"),
    TechPattern::modern("Bun", "Modern Runtime"),
];

fn scan(table: &'static [TechPattern], text: &str) -> Vec<TechFinding> {
    table.iter().filter(|p| p.matches(text)).collect()
}

/// Find legacy technology mentions, most severe first.
///
/// Equal severities keep table order (the sort is stable).
pub fn scan_debt(text: &str) -> Vec<TechFinding> {
    let mut found = scan(LEGACY_PATTERNS, text);
    found.sort_by_key(|p| p.rank());
    tracing::trace!("Tech debt scan: {} findings", found.len());
    found
}

/// Find modern technology mentions in table order.
pub fn scan_modern(text: &str) -> Vec<TechFinding> {
    let found = scan(MODERN_PATTERNS, text);
    tracing::trace!("Modern tech scan: {} findings", found.len());
    found
}
