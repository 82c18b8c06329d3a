//! Command templating
//!
//! Turns a leaf into the command line (or URL) that launches it. Templates
//! hold `{protocol}`, `{host}`, `{port}` and `{variables}` placeholders.
//!
//! A template is scanned once, left to right, so substituted text is never read
//! again as a placeholder. Template text outside placeholders is copied byte
//! for byte. A placeholder that comes out empty also takes one separating run
//! of whitespace with it, which keeps an unset `{variables}` or `{port}` from
//! leaving stray spaces behind.

use crate::connections::{Leaf, Protocol};
use crate::launcher::LaunchError;
use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_SSH_TEMPLATE: &str = "ssh {variables} {host}";
pub const DEFAULT_TELNET_TEMPLATE: &str = "telnet {variables} {host}";
pub const DEFAULT_GENERIC_TEMPLATE: &str = "{protocol} {variables} {host} {port}";

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(protocol|host|port|variables)\}").expect("placeholder pattern is valid"));

/// Command templates keyed by protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub ssh: String,
    pub telnet: String,
    pub generic: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            ssh: DEFAULT_SSH_TEMPLATE.to_string(),
            telnet: DEFAULT_TELNET_TEMPLATE.to_string(),
            generic: DEFAULT_GENERIC_TEMPLATE.to_string(),
        }
    }
}

impl Templates {
    pub fn for_protocol(&self, protocol: &Protocol) -> &str {
        match protocol {
            Protocol::Ssh => &self.ssh,
            Protocol::Telnet => &self.telnet,
            _ => &self.generic,
        }
    }
}

/// What launching a leaf means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// Shell command line to run in a terminal.
    Command(String),
    /// Address to open in the browser.
    Url(String),
}

/// Web leaves become URLs, everything else a templated command.
pub fn resolve_target(leaf: &Leaf, templates: &Templates) -> Result<LaunchTarget, LaunchError> {
    match leaf.protocol {
        Some(Protocol::Web) => resolve_url(leaf).map(LaunchTarget::Url),
        _ => resolve_command(leaf, templates).map(LaunchTarget::Command),
    }
}

/// Build the command line for `leaf` from the template matching its protocol.
///
/// `{port}` is the stored port, or the protocol's standard port when unset
/// (22 for ssh, 23 for telnet), or empty for protocols without one.
pub fn resolve_command(leaf: &Leaf, templates: &Templates) -> Result<String, LaunchError> {
    let host = leaf.target_host().ok_or_else(|| LaunchError::missing_target(leaf, "host"))?;
    let protocol = leaf.target_protocol().ok_or_else(|| LaunchError::missing_target(leaf, "protocol"))?;
    let port = leaf.effective_port().map(|port| port.to_string()).unwrap_or_default();

    let values = Placeholders {
        protocol: protocol.as_str(),
        host,
        port: &port,
        variables: leaf.variables.as_deref().unwrap_or_default(),
    };

    Ok(render(templates.for_protocol(protocol), &values))
}

/// The address a web leaf opens; the host is used as-is.
pub fn resolve_url(leaf: &Leaf) -> Result<String, LaunchError> {
    leaf.target_host().map(str::to_string).ok_or_else(|| LaunchError::missing_target(leaf, "host"))
}

struct Placeholders<'a> {
    protocol: &'a str,
    host: &'a str,
    port: &'a str,
    variables: &'a str,
}

impl Placeholders<'_> {
    fn lookup(&self, key: &str) -> &str {
        match key {
            "protocol" => self.protocol,
            "host" => self.host,
            "port" => self.port,
            "variables" => self.variables,
            _ => "",
        }
    }
}

fn render(template: &str, values: &Placeholders<'_>) -> String {
    let mut output = String::with_capacity(template.len());
    let mut cursor = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let Some(placeholder) = caps.get(0) else {
            continue;
        };
        output.push_str(&template[cursor..placeholder.start()]);
        cursor = placeholder.end();

        let value = values.lookup(&caps[1]).trim();
        if !value.is_empty() {
            output.push_str(value);
            continue;
        }

        // An empty placeholder standing alone as a word takes one separator with it.
        if !output.is_empty() && !output.ends_with(char::is_whitespace) {
            continue;
        }
        let rest = &template[cursor..];
        let after = rest.trim_start();
        if after.len() < rest.len() && !after.is_empty() {
            cursor += rest.len() - after.len();
        } else if after.is_empty() {
            output.truncate(output.trim_end().len());
            cursor = template.len();
        }
    }

    output.push_str(&template[cursor..]);
    output
}

#[cfg(test)]
#[path = "test/template.rs"]
mod tests;
