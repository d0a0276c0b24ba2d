// # Placeholder Replacer
//
// Expands `{key}` placeholders in configuration values at provisioning time.
//
// ## Known placeholders
//
// - `{env.NAME}`: environment variable `NAME` (empty when unset)
// - `{system.os}`, `{system.arch}`: target OS and architecture
// - `{system.wd}`: current working directory
// - anything registered with [`Replacer::set`]
//
// `\{` and `\}` produce literal braces. A `{` without a closing `}` is copied
// verbatim.

use std::collections::HashMap;

/// Where `{env.*}` placeholders are looked up
#[derive(Debug, Clone)]
enum EnvSource {
    /// The process environment
    Process,
    /// A fixed map (tests, sandboxed hosts)
    Fixed(HashMap<String, String>),
}

/// Placeholder replacer
#[derive(Debug, Clone)]
pub struct Replacer {
    vars: HashMap<String, String>,
    env: EnvSource,
}

impl Default for Replacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Replacer {
    /// Create a replacer backed by the process environment
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
            env: EnvSource::Process,
        }
    }

    /// Create a replacer whose `{env.*}` values come from `env`
    pub fn with_env(env: HashMap<String, String>) -> Self {
        Self {
            vars: HashMap::new(),
            env: EnvSource::Fixed(env),
        }
    }

    /// Register a custom placeholder
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    /// Remove a custom placeholder
    pub fn delete(&mut self, key: &str) {
        self.vars.remove(key);
    }

    /// Resolve a single placeholder key (without braces)
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.vars.get(key) {
            return Some(value.clone());
        }

        if let Some(name) = key.strip_prefix("env.") {
            return Some(match &self.env {
                EnvSource::Process => std::env::var(name).unwrap_or_default(),
                EnvSource::Fixed(map) => map.get(name).cloned().unwrap_or_default(),
            });
        }

        match key {
            "system.os" => Some(std::env::consts::OS.to_string()),
            "system.arch" => Some(std::env::consts::ARCH.to_string()),
            "system.wd" => std::env::current_dir()
                .ok()
                .map(|p| p.display().to_string()),
            _ => None,
        }
    }

    /// Replace every placeholder; unknown ones become `empty`
    pub fn replace_all(&self, input: &str, empty: &str) -> String {
        self.replace(input, Some(empty))
    }

    /// Replace known placeholders and leave unknown ones untouched
    pub fn replace_known(&self, input: &str) -> String {
        self.replace(input, None)
    }

    fn replace(&self, input: &str, empty: Option<&str>) -> String {
        if !input.contains(['{', '\\']) {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(pos) = rest.find(['{', '\\']) {
            out.push_str(&rest[..pos]);
            let tail = &rest[pos..];

            if let Some(escaped) = tail.strip_prefix('\\') {
                match escaped.chars().next() {
                    Some(brace @ ('{' | '}')) => {
                        out.push(brace);
                        rest = &escaped[1..];
                    }
                    _ => {
                        out.push('\\');
                        rest = escaped;
                    }
                }
                continue;
            }

            // tail starts with '{'
            let body = &tail[1..];
            let Some(close) = body.find('}') else {
                out.push_str(tail);
                return out;
            };

            let key = &body[..close];
            if key.is_empty() || key.contains('{') {
                out.push('{');
                rest = body;
                continue;
            }

            match (self.get(key), empty) {
                (Some(value), _) => out.push_str(&value),
                (None, Some(empty)) => out.push_str(empty),
                (None, None) => {
                    out.push('{');
                    out.push_str(key);
                    out.push('}');
                }
            }
            rest = &body[close + 1..];
        }

        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> Replacer {
        Replacer::with_env(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_plain_strings_unchanged() {
        let repl = env(&[]);
        assert_eq!(
            repl.replace_all("https://api.neodigit.net/v1", ""),
            "https://api.neodigit.net/v1"
        );
        assert_eq!(repl.replace_all("", ""), "");
    }

    #[test]
    fn test_env_placeholders() {
        let repl = env(&[("TOKEN", "abc"), ("SUFFIX", "xyz")]);

        assert_eq!(repl.replace_all("{env.TOKEN}", ""), "abc");
        assert_eq!(repl.replace_all("prefix_{env.SUFFIX}", ""), "prefix_xyz");
        assert_eq!(repl.replace_all("{env.TOKEN}-{env.SUFFIX}", ""), "abc-xyz");
        assert_eq!(repl.replace_all("{env.MISSING}", "-"), "");
    }

    #[test]
    fn test_unknown_placeholders() {
        let repl = env(&[]);

        assert_eq!(repl.replace_all("a{nope}b", ""), "ab");
        assert_eq!(repl.replace_all("a{nope}b", "?"), "a?b");
        assert_eq!(repl.replace_known("a{nope}b"), "a{nope}b");
    }

    #[test]
    fn test_custom_vars_take_precedence() {
        let mut repl = env(&[("X", "from-env")]);
        repl.set("env.X", "custom");
        repl.set("zone", "example.com");

        assert_eq!(repl.replace_all("{env.X}/{zone}", ""), "custom/example.com");

        repl.delete("env.X");
        assert_eq!(repl.replace_all("{env.X}", ""), "from-env");
    }

    #[test]
    fn test_escapes_and_malformed_input() {
        let repl = env(&[("X", "v")]);

        assert_eq!(repl.replace_all(r"\{env.X\}", ""), "{env.X}");
        assert_eq!(repl.replace_all(r"a\b", ""), r"a\b");
        assert_eq!(repl.replace_all("open {env.X", ""), "open {env.X");
        assert_eq!(repl.replace_all("{}", ""), "{}");
        assert_eq!(repl.replace_all("{{env.X}", ""), "{v");
    }

    #[test]
    fn test_system_placeholders() {
        let repl = env(&[]);
        assert_eq!(repl.replace_all("{system.os}", ""), std::env::consts::OS);
        assert_eq!(repl.replace_all("{system.arch}", ""), std::env::consts::ARCH);
    }
}
