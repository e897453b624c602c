use std::fmt;

/// A regular-expression value: source pattern plus the three JS-style flags
/// the editor exposes. `global` is a matching-mode flag with no compile-time
/// counterpart in the `regex` crate, so only `i` and `m` take part in
/// compile validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegexValue {
    source: String,
    pub global: bool,
    pub ignore_case: bool,
    pub multiline: bool,
}

impl RegexValue {
    /// Builds the value, rejecting sources the engine cannot compile.
    /// The error is the engine's own message.
    pub fn new(source: impl Into<String>, global: bool, ignore_case: bool, multiline: bool) -> Result<Self, String> {
        let source = source.into();
        compile_check(&source, ignore_case, multiline)?;
        Ok(Self {
            source,
            global,
            ignore_case,
            multiline,
        })
    }

    pub fn empty() -> Self {
        Self {
            source: String::new(),
            global: false,
            ignore_case: false,
            multiline: false,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Flag suffix in the conventional `gim` order.
    pub fn flags(&self) -> String {
        let mut flags = String::new();
        if self.global {
            flags.push('g');
        }
        if self.ignore_case {
            flags.push('i');
        }
        if self.multiline {
            flags.push('m');
        }
        flags
    }
}

impl fmt::Display for RegexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags())
    }
}

/// Validate `source` under the given flags, returning the engine's error
/// message on failure.
pub fn compile_check(source: &str, ignore_case: bool, multiline: bool) -> Result<(), String> {
    let mut pattern = String::new();
    let mut inline = String::new();
    if ignore_case {
        inline.push('i');
    }
    if multiline {
        inline.push('m');
    }
    if !inline.is_empty() {
        pattern.push_str("(?");
        pattern.push_str(&inline);
        pattern.push(')');
    }
    pattern.push_str(source);
    regex::Regex::new(&pattern)
        .map(|_| ())
        .map_err(|err| err.to_string())
}
